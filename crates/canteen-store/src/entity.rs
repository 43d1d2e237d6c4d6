//! # ActorEntity Trait
//!
//! The contract every stored record implements so a [`ResourceActor`](crate::ResourceActor)
//! can manage it: associated types for the id, the create and update payloads,
//! the injected context and the error, plus async lifecycle hooks.

use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// A record managed by a [`ResourceActor`](crate::ResourceActor).
///
/// Hooks receive the `Context` handed to `run()`, which is how a store reaches
/// other stores (late binding).
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier type. Ids are allocated by the actor from a `u32` counter,
    /// and ordered so listings come back in creation order.
    type Id: Ord + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Payload used to create a record.
    type Create: Send + Sync + Debug;

    /// Payload used to update a record in place.
    type Update: Send + Sync + Debug;

    /// Runtime dependencies injected into every hook. Use `()` if none.
    type Context: Send + Sync;

    /// Error raised by construction and hooks.
    ///
    /// It is boxed into [`StoreError::EntityError`](crate::StoreError::EntityError)
    /// on the way back to the caller, so callers can downcast it.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the record from its allocated id and the create payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Whether this record is the one `params` would create, by the entity's
    /// natural key. Upserts update the first match instead of creating.
    ///
    /// The default never matches, so an upsert always creates.
    fn matches_key(&self, _params: &Self::Create) -> bool {
        false
    }

    /// Runs after construction, before the record is stored.
    /// An error here discards the record.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update. The record is only replaced when this returns `Ok`.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs before the record is removed. An error here keeps the record.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }
}
