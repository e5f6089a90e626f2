//! # Cart Actor
//!
//! One mutable cart per user, keyed by the owner's [`UserId`](crate::model::UserId).
//!
//! ## Lifecycle
//!
//! | Event | Effect |
//! |---|---|
//! | first `AddItem` | cart created (upsert) |
//! | last line removed | cart deleted (evicted) |
//! | checkout | items cleared, cart kept |
//!
//! Every mutation recomputes `totalAmount` and bumps `revision`. Checkout reads the
//! cart, prices it, and then sends `ClearForCheckout` with the revision it read; if the
//! cart changed in between the clear fails and no order is created.
//!
//! ## Context
//!
//! The cart reads prices from the catalog and resolves coupon codes, so its context is a
//! [`CartContext`] holding a [`ProductClient`] and the coupon registry.

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use entity::validate_quantity;
pub use error::*;

use crate::clients::{CartClient, ProductClient};
use crate::coupons::CouponLookup;
use crate::model::Cart;
use actor_framework::ResourceActor;
use std::sync::Arc;

/// Dependencies injected into the cart actor by [`ResourceActor::run`].
#[derive(Clone)]
pub struct CartContext {
    pub products: ProductClient,
    pub coupons: Arc<dyn CouponLookup>,
}

/// Creates a new Cart actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Cart>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CartClient::new(generic_client))
}
