//! # Coupon Registry
//!
//! The cart only needs one question answered: "which coupon, if any, does this code
//! name?". [`CouponLookup`] is that seam; [`StaticCoupons`] answers it from the list in
//! the configuration file.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CouponKind {
    /// `value` is a currency amount.
    Fixed,
    /// `value` is a percentage of the cart subtotal.
    Percentage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    pub code: String,
    pub kind: CouponKind,
    pub value: Decimal,
}

impl Coupon {
    fn is_valid(&self) -> bool {
        !self.code.trim().is_empty()
            && self.value >= Decimal::ZERO
            && (self.kind == CouponKind::Fixed || self.value <= Decimal::ONE_HUNDRED)
    }
}

/// Resolves a coupon code.
pub trait CouponLookup: Send + Sync {
    fn find(&self, code: &str) -> Option<Coupon>;
}

/// In-memory registry. Codes are matched case-insensitively after trimming.
#[derive(Debug, Clone, Default)]
pub struct StaticCoupons {
    by_code: HashMap<String, Coupon>,
}

impl StaticCoupons {
    pub fn new(coupons: impl IntoIterator<Item = Coupon>) -> Self {
        let mut by_code = HashMap::new();
        for coupon in coupons {
            if !coupon.is_valid() {
                warn!(code = %coupon.code, "Skipping invalid coupon");
                continue;
            }
            by_code.insert(normalize(&coupon.code), coupon);
        }
        Self { by_code }
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

fn normalize(code: &str) -> String {
    code.trim().to_uppercase()
}

impl CouponLookup for StaticCoupons {
    fn find(&self, code: &str) -> Option<Coupon> {
        self.by_code.get(&normalize(code)).cloned()
    }
}
