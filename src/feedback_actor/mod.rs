//! # Feedback Store
//!
//! One record per order at most. The store itself does not enforce that;
//! the [`FeedbackReconciler`](crate::feedback::FeedbackReconciler) looks the
//! record up before deciding to create or merge.

pub mod entity;

use crate::clients::FeedbackClient;
use crate::model::Feedback;
use canteen_store::ResourceActor;

/// Creates a new Feedback store and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Feedback>, FeedbackClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, FeedbackClient::new(generic_client))
}
