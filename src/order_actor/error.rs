//! Error types for the Order actor.

use crate::cart_actor::CartError;
use crate::model::{OrderStatus, ProductId};
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use thiserror::Error;

/// Errors that can occur during checkout and order lifecycle operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The caller does not own the order. Carries the attempted verb.
    #[error("You don't have permission to {0} this order")]
    Forbidden(&'static str),

    #[error("Your cart is empty")]
    EmptyCart,

    #[error("Invalid shipping address: {0}")]
    InvalidAddress(String),

    #[error("Invalid payment info: {0}")]
    InvalidPayment(String),

    /// A cart line refers to a product that is no longer in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The cart was modified between being read and being cleared.
    #[error("Your cart changed during checkout, please review it and try again")]
    CartChanged,

    #[error("Order cannot be cancelled as it is already {0}")]
    NotCancellable(OrderStatus),

    #[error("Order cannot move from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Orders are never edited or deleted, only moved through their statuses.
    #[error("Orders cannot be modified or deleted")]
    Immutable,

    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] ProductError),

    #[error("User directory error: {0}")]
    Directory(#[from] UserError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
