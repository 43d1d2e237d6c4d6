//! # Store Actor
//!
//! [`ResourceActor`] is the server half of a store: it owns one collection and
//! the receiving end of the request channel, and processes requests strictly
//! one after another.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::StoreError;
use crate::message::{ResourceRequest, Upserted};
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The actor owning a collection of `T` records.
///
/// Each actor runs in its own Tokio task. Because requests are handled
/// sequentially inside that task, the collection needs no lock.
///
/// # Usage
///
/// 1. **Create**: `ResourceActor::new(buffer)` returns the actor and its client.
/// 2. **Wire**: pass the dependencies (other clients) to `run(context)`.
/// 3. **Run**: spawn the future returned by `run`.
///
/// # Operations
///
/// * **Create**: allocates the next id, builds the record with
///   [`ActorEntity::from_create_params`], runs `on_create`, stores it and
///   answers with the stored record.
/// * **Get**: answers with a clone of the record, or `None`.
/// * **List**: answers with clones of every record in id order.
/// * **Update**: runs `on_update` on a working copy and stores the copy only
///   if the hook succeeds, so a failed update leaves the record untouched.
/// * **Delete**: runs `on_delete`, then removes the record.
/// * **Upsert**: updates the first record whose [`ActorEntity::matches_key`]
///   accepts the create payload, or creates one. The lookup and the write
///   happen within one request, so two upserts for the same key cannot both
///   create.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` is the request channel capacity; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Runs the request loop until every client has been dropped.
    ///
    /// `context` is handed to every hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Store started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(&id, &context).await;
                    match &result {
                        Ok(()) => info!(entity_type, %id, size = self.store.len(), "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Upsert {
                    params,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, ?params, ?update, "Upsert");
                    let result = self.upsert(params, update, &context).await;
                    match &result {
                        Ok(Upserted::Created(_)) => {
                            info!(entity_type, size = self.store.len(), "Created")
                        }
                        Ok(Upserted::Updated(_)) => info!(entity_type, "Updated"),
                        Err(e) => warn!(entity_type, error = %e, "Upsert failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(&mut self, params: T::Create, context: &T::Context) -> Result<T, StoreError> {
        let id = T::Id::from(self.next_id);
        let mut item = T::from_create_params(id.clone(), params)
            .map_err(|e| StoreError::EntityError(Box::new(e)))?;
        item.on_create(context)
            .await
            .map_err(|e| StoreError::EntityError(Box::new(e)))?;
        // Ids are only consumed by records that made it into the store.
        self.next_id += 1;
        self.store.insert(id, item.clone());
        Ok(item)
    }

    async fn update(
        &mut self,
        id: &T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, StoreError> {
        let current = self
            .store
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let mut working = current.clone();
        working
            .on_update(update, context)
            .await
            .map_err(|e| StoreError::EntityError(Box::new(e)))?;
        self.store.insert(id.clone(), working.clone());
        Ok(working)
    }

    async fn delete(&mut self, id: &T::Id, context: &T::Context) -> Result<(), StoreError> {
        let item = self
            .store
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        item.on_delete(context)
            .await
            .map_err(|e| StoreError::EntityError(Box::new(e)))?;
        self.store.remove(id);
        Ok(())
    }

    async fn upsert(
        &mut self,
        params: T::Create,
        update: T::Update,
        context: &T::Context,
    ) -> Result<Upserted<T>, StoreError> {
        let existing = self
            .store
            .iter()
            .find(|(_, item)| item.matches_key(&params))
            .map(|(id, _)| id.clone());
        match existing {
            Some(id) => self.update(&id, update, context).await.map(Upserted::Updated),
            None => self.create(params, context).await.map(Upserted::Created),
        }
    }
}
