//! Type-safe wrappers around [`ResourceClient`](actor_framework::ResourceClient).
//!
//! Each client turns framework errors back into its collection's own error enum and
//! hides the action/result plumbing behind plain async methods.

pub mod cart_client;
pub mod order_client;
pub mod product_client;
pub mod user_client;

pub use actor_framework::ActorClient;
pub use cart_client::*;
pub use order_client::*;
pub use product_client::*;
pub use user_client::*;
