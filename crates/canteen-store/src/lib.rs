//! # Canteen Store
//!
//! An in-memory, actor-backed resource store used by the canteen core as its
//! persistence collaborator. Every resource type (users, meals, orders,
//! feedback) lives in its own [`ResourceActor`], a Tokio task that owns the
//! collection and processes requests one at a time.
//!
//! ## Layers
//!
//! 1. **Entity Layer** ([`ActorEntity`]) - the record type and its lifecycle hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - the message loop and the collection
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed async access
//!
//! ## Operations
//!
//! The store speaks a small CRUD vocabulary ([`ResourceRequest`]):
//!
//! - **Create** stores a new record and answers with the stored record.
//! - **Get** answers with the record or `None`.
//! - **List** answers with every record, in id order.
//! - **Update** applies an update payload through [`ActorEntity::on_update`].
//! - **Delete** removes a record after [`ActorEntity::on_delete`] succeeds.
//! - **Upsert** updates the record matching [`ActorEntity::matches_key`] or
//!   creates one, as a single step.
//!
//! ```rust
//! use canteen_store::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)]
//! struct Dish {
//!     id: u32,
//!     name: String,
//! }
//!
//! #[derive(Debug)] struct DishCreate { name: String }
//! #[derive(Debug)] struct DishRename(String);
//! #[derive(Debug, thiserror::Error)] #[error("dish error")] struct DishError;
//!
//! #[async_trait]
//! impl ActorEntity for Dish {
//!     type Id = u32;
//!     type Create = DishCreate;
//!     type Update = DishRename;
//!     type Context = ();
//!     type Error = DishError;
//!
//!     fn from_create_params(id: u32, params: DishCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, name: params.name })
//!     }
//!
//!     async fn on_update(&mut self, update: DishRename, _ctx: &()) -> Result<(), Self::Error> {
//!         self.name = update.0;
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Dish>::new(10);
//!     tokio::spawn(actor.run(()));
//!
//!     let dish = client.create(DishCreate { name: "Jollof".into() }).await.unwrap();
//!     let renamed = client.update(dish.id, DishRename("Waakye".into())).await.unwrap();
//!     assert_eq!(renamed.name, "Waakye");
//!     assert_eq!(client.list().await.unwrap().len(), 1);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are handed to [`ResourceActor::run`], not to the constructor.
//! The order store, for instance, receives the user and feedback clients so its
//! hooks can check the owner exists and cascade deletes.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations, so code
//! built on a [`ResourceClient`] can be tested without spawning real actors.

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
pub use error::StoreError;
pub use message::{ResourceRequest, Response, Upserted};
