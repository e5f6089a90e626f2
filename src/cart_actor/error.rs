//! Error types for the Cart actor.

use crate::model::ProductId;
use crate::product_actor::ProductError;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// Quantities must be at least 1.
    #[error("Valid quantity is required")]
    InvalidQuantity,

    /// The product does not exist in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The user has no cart.
    #[error("Cart not found")]
    CartNotFound,

    /// The cart has no line for this product.
    #[error("Product not found in cart: {0}")]
    ItemNotFound(ProductId),

    /// The cart was modified after checkout read it.
    #[error("Cart changed during checkout (expected revision {expected}, found {actual})")]
    RevisionConflict { expected: u64, actual: u64 },

    /// The catalog could not be queried.
    #[error("Catalog error: {0}")]
    Catalog(#[from] ProductError),

    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
