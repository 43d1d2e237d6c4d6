//! # ActorClient Trait
//!
//! Shared plumbing for resource-specific clients: default `get`, `list` and
//! `delete` built on a wrapped [`ResourceClient`], with errors mapped into the
//! caller's error type.
use crate::{ActorEntity, ResourceClient, StoreError};
use async_trait::async_trait;

/// Implemented by typed wrappers around a [`ResourceClient`].
///
/// # Example
///
/// ```rust
/// use canteen_store::{ActorClient, ActorEntity, ResourceClient, StoreError};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)]
/// struct Tray { id: u32 }
/// #[derive(Debug)] struct TrayCreate;
/// #[derive(Debug)] struct TrayUpdate;
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct TrayError(String);
///
/// #[async_trait]
/// impl ActorEntity for Tray {
///     type Id = u32;
///     type Create = TrayCreate;
///     type Update = TrayUpdate;
///     type Context = ();
///     type Error = TrayError;
///
///     fn from_create_params(id: u32, _: TrayCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id })
///     }
///     async fn on_update(&mut self, _: TrayUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct TrayClient {
///     inner: ResourceClient<Tray>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Tray> for TrayClient {
///     type Error = TrayError;
///
///     fn inner(&self) -> &ResourceClient<Tray> {
///         &self.inner
///     }
///
///     fn map_error(e: StoreError) -> Self::Error {
///         TrayError(e.to_string())
///     }
/// }
///
/// async fn usage(client: TrayClient) {
///     // get(), list() and delete() come for free.
///     let _ = client.get(1).await;
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// The wrapped generic client.
    fn inner(&self) -> &ResourceClient<T>;

    /// Maps store errors into [`Self::Error`].
    fn map_error(e: StoreError) -> Self::Error;

    /// Fetches a record by id.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetches every record, in id order.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Deletes a record by id.
    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
