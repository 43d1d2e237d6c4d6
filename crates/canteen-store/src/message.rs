//! # Store Messages
//!
//! Requests exchanged between [`ResourceClient`](crate::ResourceClient) and
//! [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::StoreError;
use tokio::sync::oneshot;

/// One-shot channel the actor answers on.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// A request to a store actor.
///
/// The variants are the CRUD vocabulary of the store. Payload types come from
/// the [`ActorEntity`] associated types, so an order payload can never reach
/// the meal store.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    /// Update the record matching `params` by key, or create it.
    Upsert {
        params: T::Create,
        update: T::Update,
        respond_to: Response<Upserted<T>>,
    },
}

/// What an upsert did.
#[derive(Debug, Clone, PartialEq)]
pub enum Upserted<T> {
    Created(T),
    Updated(T),
}

impl<T> Upserted<T> {
    pub fn into_inner(self) -> T {
        match self {
            Upserted::Created(item) | Upserted::Updated(item) => item,
        }
    }
}

impl<T: ActorEntity> ResourceRequest<T> {
    /// Short name of the operation, for logs and test diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ResourceRequest::Create { .. } => "Create",
            ResourceRequest::Get { .. } => "Get",
            ResourceRequest::List { .. } => "List",
            ResourceRequest::Update { .. } => "Update",
            ResourceRequest::Delete { .. } => "Delete",
            ResourceRequest::Upsert { .. } => "Upsert",
        }
    }
}
