//! Custom actions for the Cart actor.
//!
//! Every cart mutation is an action, so it runs inside the cart actor and can never
//! interleave with another mutation of the same cart.

use crate::model::{Cart, ProductId};

#[derive(Debug, Clone)]
pub enum CartAction {
    /// Adds `quantity` units. A new line copies the current catalog price; an existing
    /// line keeps the price it was first added with.
    AddItem { product: ProductId, quantity: u32 },
    /// Overwrites the quantity of an existing line.
    SetQuantity { product: ProductId, quantity: u32 },
    /// Drops a line. Removing the last line removes the cart.
    RemoveItem { product: ProductId },
    /// Applies the coupon named by `code`. An unknown code leaves the cart untouched.
    ApplyCoupon { code: String },
    RemoveCoupon,
    /// Empties the cart for checkout, provided nothing changed since `expected_revision`.
    ClearForCheckout { expected_revision: u64 },
}

/// Results from CartActions.
#[derive(Debug, Clone, PartialEq)]
pub enum CartActionResult {
    /// The cart after the action.
    Updated(Cart),
    /// The action emptied the cart and it was deleted.
    Removed,
}
