//! # Pricing Engine
//!
//! Pure functions shared by the cart summary and by checkout. Nothing here reads the
//! catalog: callers pass the prices they captured.
//!
//! | Component | Rule |
//! |---|---|
//! | subtotal | `sum(price * quantity)` |
//! | shipping | `0` when subtotal is above 100, otherwise a flat 10 |
//! | tax | 8% of the subtotal, rounded to cents |
//! | discount | fixed coupon value, or `subtotal * value / 100` rounded to cents |
//! | total | `subtotal + shipping + tax - discount` |

use crate::coupons::CouponKind;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

pub const FREE_SHIPPING_THRESHOLD: Decimal = dec!(100);
pub const FLAT_SHIPPING: Decimal = dec!(10);
pub const TAX_RATE: Decimal = dec!(0.08);

/// Rounds half away from zero to two decimal places.
pub fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub fn subtotal<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (Decimal, u32)>,
{
    lines
        .into_iter()
        .map(|(price, quantity)| price * Decimal::from(quantity))
        .sum()
}

pub fn shipping_cost(subtotal: Decimal) -> Decimal {
    if subtotal > FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        FLAT_SHIPPING
    }
}

pub fn tax(subtotal: Decimal) -> Decimal {
    to_cents(subtotal * TAX_RATE)
}

pub fn coupon_discount(kind: CouponKind, value: Decimal, subtotal: Decimal) -> Decimal {
    match kind {
        CouponKind::Fixed => value,
        CouponKind::Percentage => to_cents(subtotal * value / Decimal::ONE_HUNDRED),
    }
}

/// Every money component of a cart or order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceBreakdown {
    pub subtotal: Decimal,
    pub shipping_cost: Decimal,
    pub tax: Decimal,
    pub discount: Decimal,
    pub total: Decimal,
}

/// Prices a set of `(unit price, quantity)` lines with an already computed discount.
pub fn quote<I>(lines: I, discount: Decimal) -> PriceBreakdown
where
    I: IntoIterator<Item = (Decimal, u32)>,
{
    let subtotal = subtotal(lines);
    let shipping_cost = shipping_cost(subtotal);
    let tax = tax(subtotal);
    PriceBreakdown {
        subtotal,
        shipping_cost,
        tax,
        discount,
        total: subtotal + shipping_cost + tax - discount,
    }
}
