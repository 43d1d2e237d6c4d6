//! # Order Store
//!
//! Orders depend on two other stores, injected through `run()`:
//!
//! - the [`UserClient`] to check that the owning user exists (`on_create`),
//! - the [`FeedbackClient`] to remove the order's feedback with it (`on_delete`).
//!
//! ```rust,ignore
//! let (order_actor, order_client) = order_actor::new(32);
//! tokio::spawn(order_actor.run((user_client.clone(), feedback_client.clone())));
//! ```
//!
//! Neither dependency points back at orders, so shutdown by dropping clients
//! stays deterministic.

pub mod entity;

use crate::clients::{FeedbackClient, OrderClient, UserClient};
use crate::model::Order;
use canteen_store::ResourceActor;

/// Context handed to the order store: `(users, feedback)`.
pub type OrderContext = (UserClient, FeedbackClient);

/// Creates a new Order store and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Order>, OrderClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, OrderClient::new(generic_client))
}
