//! # User Store
//!
//! Mirrors the identity provider's users so orders can be checked against
//! them. The simplest store in the system: no dependencies (`Context = ()`)
//! and no updates once a user exists.
//!
//! ```rust
//! use canteen::user_actor;
//! use canteen::model::{Role, UserCreate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = user_actor::new(8);
//!     tokio::spawn(actor.run(()));
//!
//!     let user = client
//!         .create_user(UserCreate::new("Ama", "ama@example.com", Role::Worker))
//!         .await?;
//!     assert_eq!(user.id.to_string(), "user_1");
//!     Ok(())
//! }
//! ```

pub mod entity;

use crate::clients::UserClient;
use crate::model::User;
use canteen_store::ResourceActor;

/// Creates a new User store and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, UserClient::new(generic_client))
}
