//! # ActorClient Trait
//!
//! Common read/delete operations for resource-specific clients, built on a generic
//! `ResourceClient`.
use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Trait for resource-specific clients to inherit standard repository operations.
///
/// # Example
///
/// ```rust
/// use resource_framework::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Bean { id: u32 }
/// #[derive(Debug)] struct BeanCreate;
/// #[derive(Debug)] struct BeanUpdate;
/// #[derive(Debug)] enum BeanAction {}
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0}")]
/// struct BeanError(String);
///
/// impl From<String> for BeanError {
///     fn from(s: String) -> Self { BeanError(s) }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Bean {
///     type Id = u32;
///     type Create = BeanCreate;
///     type Update = BeanUpdate;
///     type Action = BeanAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = BeanError;
///
///     fn id(&self) -> u32 { self.id }
///     fn from_create_params(id: u32, _: BeanCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id })
///     }
///     async fn on_update(&mut self, _: BeanUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: BeanAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct BeanClient {
///     inner: ResourceClient<Bean>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Bean> for BeanClient {
///     type Error = BeanError;
///
///     fn inner(&self) -> &ResourceClient<Bean> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         BeanError(e.to_string())
///     }
/// }
///
/// async fn usage(client: BeanClient) {
///     // get(), list() and delete() are provided automatically
///     let _ = client.get(1).await;
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every stored entity, ordered by id.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Delete an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
