//! # Store Client
//!
//! The typed async handle used to talk to a [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::StoreError;
use crate::message::{ResourceRequest, Upserted};
use tokio::sync::{mpsc, oneshot};

/// Async handle to a store actor.
///
/// Holds only the sending half of the request channel, so it is cheap to clone
/// and share between tasks. Every call sends one request and awaits the answer
/// on a one-shot channel.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> ResourceRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::ActorClosed)?;
        response.await.map_err(|_| StoreError::ActorDropped)?
    }

    /// Stores a new record and returns it as stored.
    pub async fn create(&self, params: T::Create) -> Result<T, StoreError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    /// Every record, in id order.
    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, StoreError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    /// Applies `update` to the record matching `params` by key, or creates
    /// one from `params` when none does. One request, so it is atomic with
    /// respect to every other call on this store.
    pub async fn upsert(
        &self,
        params: T::Create,
        update: T::Update,
    ) -> Result<Upserted<T>, StoreError> {
        self.request(|respond_to| ResourceRequest::Upsert {
            params,
            update,
            respond_to,
        })
        .await
    }
}
