use async_trait::async_trait;
use canteen_store::ActorEntity;

use crate::error::CanteenError;
use crate::model::{Feedback, FeedbackCreate, FeedbackId, FeedbackUpdate};

#[async_trait]
impl ActorEntity for Feedback {
    type Id = FeedbackId;
    type Create = FeedbackCreate;
    type Update = FeedbackUpdate;
    type Context = ();
    type Error = CanteenError;

    fn from_create_params(id: FeedbackId, params: FeedbackCreate) -> Result<Self, CanteenError> {
        Ok(Feedback::new(id, params))
    }

    /// One record per order.
    fn matches_key(&self, params: &FeedbackCreate) -> bool {
        self.order_id == params.order_id
    }

    /// Field-level merge; see [`Feedback::merge`].
    async fn on_update(&mut self, update: FeedbackUpdate, _ctx: &()) -> Result<(), CanteenError> {
        self.merge(update.fields);
        Ok(())
    }
}
