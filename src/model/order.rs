use crate::model::{Address, AddressId, OrderId, ProductId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Upi,
    Cod,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

/// Payment is recorded, never executed: `status` is a flag for the fulfillment side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInfo {
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub status: PaymentStatus,
}

/// Fulfillment state of an order.
///
/// ```text
/// processing -> confirmed -> shipped -> delivered
///      \____________\____________\______-> cancelled
/// ```
///
/// Fulfillment only moves forward but may skip steps, so `processing -> delivered` is
/// allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Processing,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Processing, Confirmed)
                | (Processing | Confirmed, Shipped)
                | (Processing | Confirmed | Shipped, Delivered)
                | (Processing | Confirmed | Shipped, Cancelled)
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Processing => "processing",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusUpdate {
    pub status: OrderStatus,
    pub date: DateTime<Utc>,
    pub note: String,
}

/// Snapshot of one cart line. Later catalog edits do not reach it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_ref: ProductId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub price: Decimal,
    pub quantity: u32,
}

/// A placed order.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait,
/// allowing it to be managed by a [`ResourceActor`](actor_framework::ResourceActor).
///
/// Orders are built by checkout ([`OrderCreate`]): the actor's `on_create` hook reads the
/// cart, resolves the address, snapshots the items and clears the cart before the order
/// is stored. Afterwards only the status fields change, through
/// [`OrderAction`](crate::order_actor::OrderAction). Money fields are never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub owner: UserId,
    pub items: Vec<OrderItem>,
    pub shipping_address: Address,
    pub payment_info: PaymentInfo,
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping_cost: Decimal,
    pub discount: Decimal,
    pub total_amount: Decimal,
    pub order_status: OrderStatus,
    pub status_updates: Vec<StatusUpdate>,
    pub delivery_expected: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Saved address chosen at checkout, resolved into `shipping_address` by `on_create`.
    #[serde(skip)]
    pub(crate) pending_address: Option<AddressId>,
}

/// Where a checkout ships to.
#[derive(Debug, Clone, PartialEq)]
pub enum ShippingSelection {
    Inline(Address),
    Saved(AddressId),
}

/// Checkout request: everything else is read from the owner's cart.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub owner: UserId,
    pub shipping: ShippingSelection,
    pub payment: PaymentInfo,
}

/// Per-user order statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStats {
    pub total_orders: usize,
    pub total_amount: Decimal,
    pub orders_by_status: BTreeMap<OrderStatus, usize>,
}

impl OrderStats {
    pub fn from_orders<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Self {
        orders.into_iter().fold(Self::default(), |mut stats, order| {
            stats.total_orders += 1;
            stats.total_amount += order.total_amount;
            *stats.orders_by_status.entry(order.order_status).or_default() += 1;
            stats
        })
    }
}
