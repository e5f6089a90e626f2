use crate::coupons::{Coupon, CouponKind};
use crate::model::{ProductId, UserId};
use crate::pricing::{self, PriceBreakdown};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_ref: ProductId,
    pub quantity: u32,
    /// Catalog price at the time the line was first added.
    pub unit_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedCoupon {
    pub code: String,
    pub kind: CouponKind,
    pub value: Decimal,
    /// Resolved against the current subtotal on every recalculation.
    pub discount_amount: Decimal,
}

impl AppliedCoupon {
    pub fn new(coupon: Coupon, subtotal: Decimal) -> Self {
        Self {
            discount_amount: pricing::coupon_discount(coupon.kind, coupon.value, subtotal),
            code: coupon.code,
            kind: coupon.kind,
            value: coupon.value,
        }
    }

    fn refresh(&mut self, subtotal: Decimal) {
        self.discount_amount = pricing::coupon_discount(self.kind, self.value, subtotal);
    }
}

/// A user's shopping cart.
///
/// # Actor Framework
/// This struct implements the [`ActorEntity`](actor_framework::ActorEntity) trait and is
/// keyed by its owner's [`UserId`]: there is at most one cart per user. It is created by
/// the first `AddItem` (an upsert) and dropped from the store when its last line is
/// removed.
///
/// See [`impl ActorEntity for Cart`](#impl-ActorEntity-for-Cart) and
/// [`CartAction`](crate::cart_actor::CartAction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    pub owner: UserId,
    pub items: Vec<CartItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_coupon: Option<AppliedCoupon>,
    pub total_amount: Decimal,
    /// Bumped by every mutation. Checkout only clears the revision it priced.
    pub revision: u64,
}

impl Cart {
    /// The shape returned for a user who has no cart.
    pub fn empty(owner: UserId) -> Self {
        Self {
            owner,
            items: Vec::new(),
            applied_coupon: None,
            total_amount: Decimal::ZERO,
            revision: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item_mut(&mut self, product: ProductId) -> Option<&mut CartItem> {
        self.items.iter_mut().find(|i| i.product_ref == product)
    }

    pub fn subtotal(&self) -> Decimal {
        pricing::subtotal(self.lines())
    }

    fn lines(&self) -> impl Iterator<Item = (Decimal, u32)> + '_ {
        self.items.iter().map(|i| (i.unit_price, i.quantity))
    }

    /// Re-resolves the coupon discount, then `total = max(0, subtotal - discount)`.
    pub fn recalculate_total(&mut self) {
        let subtotal = self.subtotal();
        let discount = self.applied_coupon.as_mut().map_or(Decimal::ZERO, |c| {
            c.refresh(subtotal);
            c.discount_amount
        });
        self.total_amount = (subtotal - discount).max(Decimal::ZERO);
    }

    /// Full price breakdown of the cart including shipping and tax.
    pub fn summary(&self) -> CartSummary {
        let subtotal = self.subtotal();
        let discount = self
            .applied_coupon
            .as_ref()
            .map_or(Decimal::ZERO, |c| c.discount_amount.min(subtotal));
        CartSummary {
            item_count: self.items.iter().map(|i| i.quantity).sum(),
            coupon_code: self.applied_coupon.as_ref().map(|c| c.code.clone()),
            pricing: pricing::quote(self.lines(), discount),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub item_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coupon_code: Option<String>,
    #[serde(flatten)]
    pub pricing: PriceBreakdown,
}
