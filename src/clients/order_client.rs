use crate::model::{Order, OrderCreate, OrderId, OrderStats, OrderStatus, UserId};
use crate::order_actor::{OrderAction, OrderError};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
///
/// Checkout orchestration (cart read, address and payment checks, snapshot, cart
/// clear) happens in the Order actor's `on_create` hook; this client only sends the
/// request and enforces ownership on reads.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<OrderError>() {
            Ok(order_error) => order_error,
            Err(FrameworkError::NotFound(id)) => OrderError::NotFound(id),
            Err(other) => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl OrderClient {
    /// Checks out the owner's cart.
    #[instrument(skip(self, request), fields(owner = %request.owner))]
    pub async fn place_order(&self, request: OrderCreate) -> Result<Order, OrderError> {
        debug!(?request, "place_order called");
        let id = self.inner.create(request).await.map_err(Self::map_error)?;
        info!(order_id = %id, "Order placed");
        self.get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))
    }

    /// Fetches an order on behalf of `caller`.
    #[instrument(skip(self))]
    pub async fn get_order(&self, caller: UserId, id: OrderId) -> Result<Order, OrderError> {
        let order = self
            .get(id)
            .await?
            .ok_or_else(|| OrderError::NotFound(id.to_string()))?;
        if order.owner != caller {
            return Err(OrderError::Forbidden("view"));
        }
        Ok(order)
    }

    /// The caller's orders, newest first.
    #[instrument(skip(self))]
    pub async fn list_orders(&self, owner: UserId) -> Result<Vec<Order>, OrderError> {
        debug!("Sending request");
        let mut orders = self
            .inner
            .find(move |order: &Order| order.owner == owner)
            .await
            .map_err(Self::map_error)?;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(orders)
    }

    #[instrument(skip(self))]
    pub async fn order_stats(&self, owner: UserId) -> Result<OrderStats, OrderError> {
        let orders = self.list_orders(owner).await?;
        Ok(OrderStats::from_orders(&orders))
    }

    #[instrument(skip(self))]
    pub async fn cancel_order(
        &self,
        caller: UserId,
        id: OrderId,
        reason: Option<String>,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(
                id,
                OrderAction::Cancel {
                    requested_by: caller,
                    reason,
                },
            )
            .await
            .map_err(Self::map_error)
    }

    /// Fulfillment-side status change. Not exposed over HTTP.
    #[instrument(skip(self))]
    pub async fn advance_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        note: Option<String>,
    ) -> Result<Order, OrderError> {
        debug!("Sending request");
        self.inner
            .perform_action(id, OrderAction::Advance { status, note })
            .await
            .map_err(Self::map_error)
    }
}
