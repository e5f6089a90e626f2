//! # Actor Framework
//!
//! Building blocks for keeping document collections inside actors. Every collection
//! (carts, orders, catalog products, users) is owned by one [`ResourceActor`] task that
//! processes requests one at a time, so a read-modify-write on a single document can
//! never interleave with another request for the same collection.
//!
//! ## Layers
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the document type and its business rules
//! 2. **Runtime Layer** ([`ResourceActor`]) - message loop and the in-memory store
//! 3. **Interface Layer** ([`ResourceClient`]) - typed async requests over a channel
//!
//! ## Requests
//!
//! Besides plain CRUD the store understands three document-oriented requests:
//!
//! - **Upsert**: run an action against a caller-chosen id, building the document first
//!   when it does not exist yet (a cart is created on its first `add`).
//! - **Eviction**: after an action the entity may ask to be dropped from the store
//!   ([`ActorEntity::should_evict`]); a cart whose last line was removed disappears.
//! - **Find**: return clones of every document matching a predicate (orders of a user).
//!
//! ```rust
//! use actor_framework::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Counter { id: u32, hits: u32 }
//! #[derive(Debug)] struct CounterCreate;
//! #[derive(Debug)] struct CounterUpdate;
//! #[derive(Debug)] enum CounterAction { Hit }
//! #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
//!
//! #[async_trait]
//! impl ActorEntity for Counter {
//!     type Id = u32;
//!     type Create = CounterCreate;
//!     type Update = CounterUpdate;
//!     type Action = CounterAction;
//!     type ActionResult = u32;
//!     type Context = ();
//!     type Error = CounterError;
//!
//!     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, hits: 0 })
//!     }
//!     async fn on_update(&mut self, _: CounterUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<u32, Self::Error> {
//!         self.hits += 1;
//!         Ok(self.hits)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Counter>::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     // Id 7 does not exist yet: it is created, then hit.
//!     let hits = client.upsert(7, CounterCreate, CounterAction::Hit).await.unwrap();
//!     assert_eq!(hits, 1);
//!
//!     let busy = client.find(|c: &Counter| c.hits > 0).await.unwrap();
//!     assert_eq!(busy.len(), 1);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are handed to [`ResourceActor::run`] rather than to the constructor, so
//! the order actor can receive the cart and catalog clients after every actor exists.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations, which lets an
//! actor under test talk to fake collaborators.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{Filter, ResourceRequest, Response};
