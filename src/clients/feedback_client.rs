//! # Feedback Client
use crate::error::CanteenError;
use crate::model::{Feedback, FeedbackCreate, FeedbackUpdate, OrderId};
use async_trait::async_trait;
use canteen_store::{ActorClient, ResourceClient, StoreError, Upserted};
use tracing::{debug, instrument};

/// Client for the Feedback store.
#[derive(Clone)]
pub struct FeedbackClient {
    inner: ResourceClient<Feedback>,
}

impl FeedbackClient {
    pub fn new(inner: ResourceClient<Feedback>) -> Self {
        Self { inner }
    }

    /// Creates the order's feedback from `params`, or merges `params.fields`
    /// into the existing record. The store runs this as one step, so an order
    /// never ends up with two records.
    #[instrument(skip(self, params), fields(order_id = %params.order_id))]
    pub async fn save_for_order(
        &self,
        params: FeedbackCreate,
    ) -> Result<Upserted<Feedback>, CanteenError> {
        debug!("Sending request");
        let update = FeedbackUpdate {
            fields: params.fields.clone(),
        };
        self.inner.upsert(params, update).await.map_err(Self::map_error)
    }

    /// The feedback recorded for `order_id`, if any.
    #[instrument(skip(self))]
    pub async fn for_order(&self, order_id: OrderId) -> Result<Option<Feedback>, CanteenError> {
        let all = self.list().await?;
        Ok(all.into_iter().find(|f| f.order_id == order_id))
    }
}

#[async_trait]
impl ActorClient<Feedback> for FeedbackClient {
    type Error = CanteenError;

    fn inner(&self) -> &ResourceClient<Feedback> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        CanteenError::from(e)
    }
}
