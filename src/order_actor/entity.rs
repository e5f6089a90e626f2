//! [`ActorEntity`] implementation for [`Order`].

use super::actions::OrderAction;
use super::error::OrderError;
use super::OrderContext;
use crate::cart_actor::CartError;
use crate::clients::ActorClient;
use crate::model::{
    Address, Order, OrderCreate, OrderId, OrderItem, OrderStatus, PaymentInfo, PaymentMethod,
    PaymentStatus, ShippingSelection, StatusUpdate,
};
use crate::pricing;
use crate::user_actor::UserError;
use actor_framework::ActorEntity;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use tracing::debug;

pub const DELIVERY_DAYS: i64 = 7;
pub const DEFAULT_CANCEL_REASON: &str = "No reason provided";

fn validate_payment(payment: &mut PaymentInfo) -> Result<(), OrderError> {
    match payment.method {
        PaymentMethod::Upi => {
            let valid = payment
                .transaction_id
                .as_deref()
                .is_some_and(|id| id.contains('@'));
            if !valid {
                return Err(OrderError::InvalidPayment(
                    "UPI payments require a transaction id such as name@bank".into(),
                ));
            }
        }
        PaymentMethod::Cod => payment.transaction_id = None,
    }
    payment.status = PaymentStatus::Pending;
    Ok(())
}

fn advance_note(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Processing => "Order received",
        OrderStatus::Confirmed => "Order confirmed",
        OrderStatus::Shipped => "Order shipped",
        OrderStatus::Delivered => "Order delivered",
        OrderStatus::Cancelled => "Order cancelled",
    }
}

impl Order {
    fn record(&mut self, status: OrderStatus, note: String) {
        self.order_status = status;
        self.status_updates.push(StatusUpdate {
            status,
            date: Utc::now(),
            note,
        });
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = ();
    type Action = OrderAction;
    type ActionResult = Order;
    type Context = OrderContext;
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        let (shipping_address, pending_address) = match params.shipping {
            ShippingSelection::Inline(address) => (address, None),
            ShippingSelection::Saved(address_id) => (Address::default(), Some(address_id)),
        };
        let created_at = Utc::now();
        Ok(Self {
            id,
            owner: params.owner,
            items: Vec::new(),
            shipping_address,
            payment_info: params.payment,
            subtotal: Decimal::ZERO,
            tax: Decimal::ZERO,
            shipping_cost: Decimal::ZERO,
            discount: Decimal::ZERO,
            total_amount: Decimal::ZERO,
            order_status: OrderStatus::Processing,
            status_updates: Vec::new(),
            delivery_expected: created_at + Duration::days(DELIVERY_DAYS),
            cancel_reason: None,
            created_at,
            pending_address,
        })
    }

    /// Turns the owner's cart into this order. Nothing outside the order actor changes
    /// unless every check passes; the cart clear is the last step.
    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), Self::Error> {
        let cart = ctx
            .carts
            .get(self.owner)
            .await?
            .filter(|cart| !cart.is_empty())
            .ok_or(OrderError::EmptyCart)?;

        if let Some(address_id) = self.pending_address.take() {
            let unknown = || OrderError::InvalidAddress(format!("Unknown saved address {address_id}"));
            let saved = match ctx.users.saved_address(self.owner, address_id).await {
                Ok(saved) => saved.ok_or_else(unknown)?,
                Err(UserError::NotFound(_)) => return Err(unknown()),
                Err(e) => return Err(e.into()),
            };
            self.shipping_address = saved.address;
        }
        let missing = self.shipping_address.missing_fields();
        if !missing.is_empty() {
            return Err(OrderError::InvalidAddress(format!(
                "missing {}",
                missing.join(", ")
            )));
        }

        validate_payment(&mut self.payment_info)?;

        let mut items = Vec::with_capacity(cart.items.len());
        for line in &cart.items {
            let product = ctx
                .products
                .get(line.product_ref)
                .await?
                .ok_or(OrderError::ProductNotFound(line.product_ref))?;
            items.push(OrderItem {
                product_ref: line.product_ref,
                name: product.name,
                image: product.image,
                price: line.unit_price,
                quantity: line.quantity,
            });
        }

        // The cart coupon is not carried over.
        let breakdown = pricing::quote(items.iter().map(|i| (i.price, i.quantity)), Decimal::ZERO);
        debug!(order_id = %self.id, ?breakdown, "Priced");

        ctx.carts
            .clear_for_checkout(self.owner, cart.revision)
            .await
            .map_err(|e| match e {
                CartError::RevisionConflict { .. } | CartError::CartNotFound => {
                    OrderError::CartChanged
                }
                other => other.into(),
            })?;

        self.items = items;
        self.subtotal = breakdown.subtotal;
        self.tax = breakdown.tax;
        self.shipping_cost = breakdown.shipping_cost;
        self.discount = breakdown.discount;
        self.total_amount = breakdown.total;
        self.record(OrderStatus::Processing, advance_note(OrderStatus::Processing).into());
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &OrderContext) -> Result<(), Self::Error> {
        Err(OrderError::Immutable)
    }

    async fn on_delete(&self, _ctx: &OrderContext) -> Result<(), Self::Error> {
        Err(OrderError::Immutable)
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        _ctx: &OrderContext,
    ) -> Result<Order, Self::Error> {
        match action {
            OrderAction::Cancel {
                requested_by,
                reason,
            } => {
                if requested_by != self.owner {
                    return Err(OrderError::Forbidden("cancel"));
                }
                if self.order_status.is_terminal() {
                    return Err(OrderError::NotCancellable(self.order_status));
                }
                let reason = reason
                    .map(|r| r.trim().to_string())
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| DEFAULT_CANCEL_REASON.to_string());
                self.cancel_reason = Some(reason.clone());
                self.record(OrderStatus::Cancelled, reason);
            }
            OrderAction::Advance { status, note } => {
                if status == OrderStatus::Cancelled || !self.order_status.can_transition_to(status)
                {
                    return Err(OrderError::InvalidTransition {
                        from: self.order_status,
                        to: status,
                    });
                }
                let note = note.unwrap_or_else(|| advance_note(status).to_string());
                self.record(status, note);
            }
        }
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductId, UserId};
    use rust_decimal_macros::dec;

    fn payment(method: PaymentMethod, transaction_id: Option<&str>) -> PaymentInfo {
        PaymentInfo {
            method,
            transaction_id: transaction_id.map(String::from),
            status: PaymentStatus::Failed,
        }
    }

    fn placed() -> Order {
        let mut order = Order::from_create_params(
            OrderId(1),
            OrderCreate {
                owner: UserId(1),
                shipping: ShippingSelection::Inline(Address::default()),
                payment: payment(PaymentMethod::Cod, None),
            },
        )
        .unwrap();
        order.items.push(OrderItem {
            product_ref: ProductId(1),
            name: "Mug".into(),
            image: None,
            price: dec!(10),
            quantity: 1,
        });
        order.record(OrderStatus::Processing, "Order received".into());
        order
    }

    #[test]
    fn test_upi_needs_at_sign() {
        let mut bad = payment(PaymentMethod::Upi, Some("foo"));
        assert!(matches!(
            validate_payment(&mut bad),
            Err(OrderError::InvalidPayment(_))
        ));
        let mut missing = payment(PaymentMethod::Upi, None);
        assert!(validate_payment(&mut missing).is_err());

        let mut good = payment(PaymentMethod::Upi, Some("alice@bank"));
        validate_payment(&mut good).unwrap();
        assert_eq!(good.status, PaymentStatus::Pending);
    }

    #[test]
    fn test_cod_drops_transaction_id() {
        let mut cod = payment(PaymentMethod::Cod, Some("ignored"));
        validate_payment(&mut cod).unwrap();
        assert_eq!(cod.transaction_id, None);
    }

    #[test]
    fn test_delivery_expected_a_week_out() {
        let order = placed();
        assert_eq!(order.delivery_expected - order.created_at, Duration::days(7));
    }
}
