//! # Cart Client
//!
//! The Cart Ledger API. Carts are addressed by their owner's [`UserId`].
use crate::cart_actor::{validate_quantity, CartAction, CartActionResult, CartError};
use crate::model::{Cart, CartSummary, ProductId, UserId};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<Cart>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<Cart>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Cart> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<Cart> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<CartError>() {
            Ok(cart_error) => cart_error,
            Err(FrameworkError::NotFound(_)) => CartError::CartNotFound,
            Err(other) => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn updated(result: CartActionResult) -> Result<Cart, CartError> {
    match result {
        CartActionResult::Updated(cart) => Ok(cart),
        CartActionResult::Removed => Err(CartError::CartNotFound),
    }
}

impl CartClient {
    async fn act(&self, owner: UserId, action: CartAction) -> Result<CartActionResult, CartError> {
        self.inner
            .perform_action(owner, action)
            .await
            .map_err(Self::map_error)
    }

    /// The user's cart, or the empty shape when they have none.
    #[instrument(skip(self))]
    pub async fn get_cart(&self, owner: UserId) -> Result<Cart, CartError> {
        debug!("Sending request");
        Ok(self.get(owner).await?.unwrap_or_else(|| Cart::empty(owner)))
    }

    #[instrument(skip(self))]
    pub async fn summary(&self, owner: UserId) -> Result<CartSummary, CartError> {
        Ok(self.get_cart(owner).await?.summary())
    }

    /// Adds `quantity` units of a product, creating the cart on first use.
    #[instrument(skip(self))]
    pub async fn add_item(
        &self,
        owner: UserId,
        product: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        validate_quantity(quantity)?;
        debug!("Sending request");
        let result = self
            .inner
            .upsert(owner, (), CartAction::AddItem { product, quantity })
            .await
            .map_err(Self::map_error)?;
        updated(result)
    }

    /// Overwrites a line's quantity. The quantity is checked before the cart is looked up.
    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        owner: UserId,
        product: ProductId,
        quantity: u32,
    ) -> Result<Cart, CartError> {
        validate_quantity(quantity)?;
        debug!("Sending request");
        updated(self.act(owner, CartAction::SetQuantity { product, quantity }).await?)
    }

    /// Removes a line. Returns `None` when that was the last line and the cart is gone.
    #[instrument(skip(self))]
    pub async fn remove_item(
        &self,
        owner: UserId,
        product: ProductId,
    ) -> Result<Option<Cart>, CartError> {
        debug!("Sending request");
        match self.act(owner, CartAction::RemoveItem { product }).await? {
            CartActionResult::Updated(cart) => Ok(Some(cart)),
            CartActionResult::Removed => Ok(None),
        }
    }

    /// Applies a coupon. An unknown code, or a user without a cart, is a no-op: the
    /// returned cart then carries no coupon with that code.
    #[instrument(skip(self))]
    pub async fn apply_coupon(&self, owner: UserId, code: String) -> Result<Cart, CartError> {
        debug!("Sending request");
        match self.act(owner, CartAction::ApplyCoupon { code }).await {
            Err(CartError::CartNotFound) => Ok(Cart::empty(owner)),
            other => updated(other?),
        }
    }

    #[instrument(skip(self))]
    pub async fn remove_coupon(&self, owner: UserId) -> Result<Cart, CartError> {
        debug!("Sending request");
        match self.act(owner, CartAction::RemoveCoupon).await {
            Err(CartError::CartNotFound) => Ok(Cart::empty(owner)),
            other => updated(other?),
        }
    }

    /// Empties the cart for checkout. Fails with [`CartError::RevisionConflict`] when
    /// the cart changed after `expected_revision` was read.
    #[instrument(skip(self))]
    pub async fn clear_for_checkout(
        &self,
        owner: UserId,
        expected_revision: u64,
    ) -> Result<Cart, CartError> {
        debug!("Sending request");
        updated(
            self.act(owner, CartAction::ClearForCheckout { expected_revision })
                .await?,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::{create_mock_client, expect_upsert, MockClient};

    #[tokio::test]
    async fn test_add_item_upserts_owner_cart() {
        let (client, mut receiver) = create_mock_client::<Cart>(10);
        let cart_client = CartClient::new(client);

        let task =
            tokio::spawn(async move { cart_client.add_item(UserId(1), ProductId(5), 2).await });

        let (id, (), action, responder) = expect_upsert(&mut receiver)
            .await
            .expect("Expected Upsert request");
        assert_eq!(id, UserId(1));
        assert!(matches!(
            action,
            CartAction::AddItem { product: ProductId(5), quantity: 2 }
        ));
        responder
            .send(Ok(CartActionResult::Updated(Cart::empty(UserId(1)))))
            .unwrap();

        assert!(task.await.unwrap().is_ok());
    }

    #[tokio::test]
    async fn test_bad_quantity_never_reaches_actor() {
        let mock = MockClient::<Cart>::new();
        let client = CartClient::new(mock.client());

        assert_eq!(
            client.set_quantity(UserId(1), ProductId(1), 0).await.unwrap_err(),
            CartError::InvalidQuantity
        );
        assert_eq!(
            client.add_item(UserId(1), ProductId(1), 0).await.unwrap_err(),
            CartError::InvalidQuantity
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_missing_cart_shapes() {
        let mut mock = MockClient::<Cart>::new();
        mock.expect_get(UserId(2)).return_ok(None);
        mock.expect_action(UserId(2))
            .return_err(FrameworkError::NotFound("user_2".into()));
        mock.expect_action(UserId(2))
            .return_err(FrameworkError::NotFound("user_2".into()));
        let client = CartClient::new(mock.client());

        let cart = client.get_cart(UserId(2)).await.unwrap();
        assert!(cart.is_empty());

        let coupon = client.apply_coupon(UserId(2), "SAVE".into()).await.unwrap();
        assert!(coupon.applied_coupon.is_none());

        let err = client.remove_item(UserId(2), ProductId(1)).await.unwrap_err();
        assert_eq!(err, CartError::CartNotFound);
        mock.verify();
    }
}
