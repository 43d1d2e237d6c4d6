//! # Meal Client
use crate::error::CanteenError;
use crate::model::{Meal, MealCreate};
use async_trait::async_trait;
use canteen_store::{ActorClient, ResourceClient, StoreError};
use tracing::{debug, instrument};

/// Client for the Meal store.
#[derive(Clone)]
pub struct MealClient {
    inner: ResourceClient<Meal>,
}

impl MealClient {
    pub fn new(inner: ResourceClient<Meal>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_meal(&self, params: MealCreate) -> Result<Meal, CanteenError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Meal> for MealClient {
    type Error = CanteenError;

    fn inner(&self) -> &ResourceClient<Meal> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        CanteenError::from(e)
    }
}
