//! # ActorEntity Trait
//!
//! The contract a document type implements to live inside a [`ResourceActor`](crate::ResourceActor).
//! Associated types pin down the id, the create/update payloads, the custom actions and
//! the error type, so a cart payload can never reach the order collection.
//!
//! Hooks with default bodies (`on_create`, `on_delete`, `should_evict`) only need an
//! implementation when the entity has something to do there.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any document must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are async so they can call other actors. The `Context` type is injected into
/// every hook by [`ResourceActor::run`](crate::ResourceActor::run).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Document identifier. Convertible from `u32` for generated ids.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload used to build a new document.
    type Create: Send + Sync + Debug;

    /// Payload used to modify an existing document.
    type Update: Send + Sync + Debug;

    /// Document-specific operations (e.g. `AddItem`, `Cancel`).
    type Action: Send + Sync + Debug;

    /// Result returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// Runtime dependencies injected into the actor. `()` when there are none.
    type Context: Send + Sync;

    /// One error enum per collection.
    ///
    /// It is the union of everything any action may fail with; clients recover it from
    /// [`FrameworkError::EntityError`](crate::FrameworkError::EntityError).
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the document from its id and creation payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Runs after `from_create_params` and before the document is stored.
    /// An error here means nothing is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs immediately before the document is removed by an explicit delete.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// Checked after every successful action. Returning `true` removes the document
    /// from the store; the caller still receives `result`.
    fn should_evict(&self, _result: &Self::ActionResult) -> bool {
        false
    }
}
