//! [`ActorEntity`] implementation for [`Cart`].
//!
//! Carts are keyed by their owner's id and created through `upsert`, so there is no
//! separate "create cart" call: the first `AddItem` builds an empty cart and the action
//! fills it. If that first action fails nothing is stored.

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use super::CartContext;
use crate::clients::ActorClient;
use crate::model::{AppliedCoupon, Cart, CartItem, UserId};
use actor_framework::ActorEntity;
use async_trait::async_trait;

pub fn validate_quantity(quantity: u32) -> Result<u32, CartError> {
    if quantity < 1 {
        return Err(CartError::InvalidQuantity);
    }
    Ok(quantity)
}

impl Cart {
    /// Recomputes the total and bumps the revision after a mutation.
    fn touch(&mut self) {
        self.recalculate_total();
        self.revision += 1;
    }
}

#[async_trait]
impl ActorEntity for Cart {
    type Id = UserId;
    type Create = ();
    type Update = ();
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = CartContext;
    type Error = CartError;

    fn from_create_params(id: UserId, _params: ()) -> Result<Self, Self::Error> {
        Ok(Cart::empty(id))
    }

    async fn on_update(&mut self, _update: (), _ctx: &CartContext) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        ctx: &CartContext,
    ) -> Result<CartActionResult, Self::Error> {
        match action {
            CartAction::AddItem { product, quantity } => {
                validate_quantity(quantity)?;
                let listed = ctx
                    .products
                    .get(product)
                    .await?
                    .ok_or(CartError::ProductNotFound(product))?;

                match self.item_mut(product) {
                    Some(line) => {
                        line.quantity = line
                            .quantity
                            .checked_add(quantity)
                            .ok_or(CartError::InvalidQuantity)?;
                    }
                    None => self.items.push(CartItem {
                        product_ref: product,
                        quantity,
                        unit_price: listed.price,
                    }),
                }
                self.touch();
            }
            CartAction::SetQuantity { product, quantity } => {
                validate_quantity(quantity)?;
                let line = self
                    .item_mut(product)
                    .ok_or(CartError::ItemNotFound(product))?;
                line.quantity = quantity;
                self.touch();
            }
            CartAction::RemoveItem { product } => {
                let index = self
                    .items
                    .iter()
                    .position(|i| i.product_ref == product)
                    .ok_or(CartError::ItemNotFound(product))?;
                self.items.remove(index);
                self.touch();
                if self.items.is_empty() {
                    return Ok(CartActionResult::Removed);
                }
            }
            CartAction::ApplyCoupon { code } => {
                let Some(coupon) = ctx.coupons.find(&code) else {
                    return Ok(CartActionResult::Updated(self.clone()));
                };
                self.applied_coupon = Some(AppliedCoupon::new(coupon, self.subtotal()));
                self.touch();
            }
            CartAction::RemoveCoupon => {
                self.applied_coupon = None;
                self.touch();
            }
            CartAction::ClearForCheckout { expected_revision } => {
                if self.revision != expected_revision {
                    return Err(CartError::RevisionConflict {
                        expected: expected_revision,
                        actual: self.revision,
                    });
                }
                self.items.clear();
                self.touch();
            }
        }
        Ok(CartActionResult::Updated(self.clone()))
    }

    fn should_evict(&self, result: &CartActionResult) -> bool {
        matches!(result, CartActionResult::Removed)
    }
}
