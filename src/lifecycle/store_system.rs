use crate::cart_actor::CartContext;
use crate::clients::{CartClient, OrderClient, ProductClient, UserClient};
use crate::config::SeedConfig;
use crate::coupons::CouponLookup;
use crate::model::{ProductId, UserCreate, UserId};
use crate::order_actor::OrderContext;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum ShutdownError {
    #[error("Actor task failed: {0}")]
    ActorTask(#[from] JoinError),
}

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Failed to seed product: {0}")]
    Product(#[from] ProductError),
    #[error("Failed to seed user: {0}")]
    User(#[from] UserError),
}

/// Ids assigned to seeded documents, in configuration order.
#[derive(Debug, Default)]
pub struct Seeded {
    pub products: Vec<ProductId>,
    pub users: Vec<UserId>,
}

/// The running storefront: four actors and the clients that reach them.
///
/// # Wiring
///
/// ```text
/// user     ()
/// product  ()
/// cart     CartContext  { products, coupons }
/// order    OrderContext { carts, products, users }
/// ```
///
/// Every actor is created first and receives its context in `run`, so the order of
/// spawning does not matter.
///
/// # Example
///
/// ```rust,no_run
/// # use std::sync::Arc;
/// # use storefront::coupons::StaticCoupons;
/// # use storefront::lifecycle::StoreSystem;
/// # use storefront::model::UserId;
/// # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let system = StoreSystem::new(32, Arc::new(StaticCoupons::default()));
/// let cart = system.cart_client.get_cart(UserId(1)).await?;
/// assert!(cart.is_empty());
/// system.shutdown().await?;
/// # Ok(())
/// # }
/// ```
pub struct StoreSystem {
    pub user_client: UserClient,
    pub product_client: ProductClient,
    pub cart_client: CartClient,
    pub order_client: OrderClient,
    handles: Vec<JoinHandle<()>>,
}

impl StoreSystem {
    /// Spawns all actors. Must be called inside a Tokio runtime.
    pub fn new(channel_buffer: usize, coupons: Arc<dyn CouponLookup>) -> Self {
        let channel_buffer = channel_buffer.max(1);
        let (user_actor, user_client) = crate::user_actor::new(channel_buffer);
        let (product_actor, product_client) = crate::product_actor::new(channel_buffer);
        let (cart_actor, cart_client) = crate::cart_actor::new(channel_buffer);
        let (order_actor, order_client) = crate::order_actor::new(channel_buffer);

        let user_handle = tokio::spawn(user_actor.run(()));
        let product_handle = tokio::spawn(product_actor.run(()));
        let cart_handle = tokio::spawn(cart_actor.run(CartContext {
            products: product_client.clone(),
            coupons,
        }));
        let order_handle = tokio::spawn(order_actor.run(OrderContext {
            carts: cart_client.clone(),
            products: product_client.clone(),
            users: user_client.clone(),
        }));

        Self {
            user_client,
            product_client,
            cart_client,
            order_client,
            handles: vec![user_handle, product_handle, cart_handle, order_handle],
        }
    }

    /// Loads catalog entries and users (with their address books) from configuration.
    pub async fn seed(&self, seed: &SeedConfig) -> Result<Seeded, SeedError> {
        let mut seeded = Seeded::default();
        for product in &seed.products {
            seeded
                .products
                .push(self.product_client.create_product(product.clone()).await?);
        }
        for user in &seed.users {
            let id = self
                .user_client
                .create_user(UserCreate {
                    name: user.name.clone(),
                    email: user.email.clone(),
                })
                .await?;
            for address in &user.addresses {
                self.user_client.add_address(id, address.clone()).await?;
            }
            seeded.users.push(id);
        }
        info!(
            products = seeded.products.len(),
            users = seeded.users.len(),
            "Seed data loaded"
        );
        Ok(seeded)
    }

    /// Drops every client and waits for the actors to drain.
    ///
    /// Actors stop once all senders to their channel are gone. The cart and order
    /// actors hold clients of the others in their context, so they are awaited first:
    /// their exit releases the last product, cart and user senders.
    pub async fn shutdown(self) -> Result<(), ShutdownError> {
        info!("Shutting down system...");
        drop(self.order_client);
        drop(self.cart_client);
        drop(self.user_client);
        drop(self.product_client);

        let mut handles = self.handles;
        // Spawn order: user, product, cart, order. Await dependents first.
        handles.reverse();
        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
