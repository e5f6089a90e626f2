//! # Order Actor
//!
//! Orders are the immutable, price-locked result of a checkout. This actor is both the
//! Order Factory (its `on_create` hook turns a cart into an order) and the Order
//! Lifecycle (its actions move the status along).
//!
//! ## Checkout
//!
//! ```text
//! OrderClient::place_order
//!   -> ResourceActor<Order> Create
//!        Order::from_create_params   owner, shipping selection, payment
//!        Order::on_create
//!          1. CartClient::get            empty or missing cart -> EmptyCart
//!          2. UserClient::saved_address  saved address selection only
//!          3. payment check              upi needs "x@y", cod drops the transaction id
//!          4. ProductClient::get         name and image for every line
//!          5. pricing::quote             discount 0
//!          6. CartClient::clear_for_checkout(revision read in 1)
//!   <- stored only if every step succeeded
//! ```
//!
//! Steps 1 to 5 only read. Step 6 is the single mutation outside this actor and is
//! guarded by the cart revision, so two concurrent checkouts of one cart produce one
//! order and one [`OrderError::CartChanged`].
//!
//! ## Context
//!
//! ```rust,ignore
//! impl ActorEntity for Order {
//!     type Context = OrderContext; // carts, catalog, users
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::{CartClient, OrderClient, ProductClient, UserClient};
use crate::model::Order;
use actor_framework::ResourceActor;

/// Dependencies injected into the order actor by [`ResourceActor::run`].
#[derive(Clone)]
pub struct OrderContext {
    pub carts: CartClient,
    pub products: ProductClient,
    pub users: UserClient,
}

/// Creates a new Order actor and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
