//! # ActorClient Trait
//!
//! Shared read/delete operations for domain-specific clients built on a
//! [`ResourceClient`].
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for domain clients (`CartClient`, `OrderClient`, ...) wrapping a
/// `ResourceClient`.
///
/// Implementors provide access to the inner client and a mapping from
/// [`FrameworkError`] into their own error enum; `get` and `delete` come for free.
///
/// ```rust,ignore
/// #[async_trait]
/// impl ActorClient<Cart> for CartClient {
///     type Error = CartError;
///
///     fn inner(&self) -> &ResourceClient<Cart> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> CartError {
///         e.into_entity_error::<CartError>()
///             .unwrap_or_else(|e| CartError::Storage(e.to_string()))
///     }
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch a document by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Delete a document by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
