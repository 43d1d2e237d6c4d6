//! # Order Client
//!
//! Wraps a `ResourceClient<Order>`. The owner check and the feedback cascade
//! run inside the Order store's hooks, so this client stays thin.
use crate::error::CanteenError;
use crate::model::{Order, OrderCreate, OrderId, OrderStatus, OrderUpdate};
use async_trait::async_trait;
use canteen_store::{ActorClient, ResourceClient, StoreError};
use tracing::{debug, info, instrument};

/// Client for the Order store.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, params), fields(user_id = %params.user_id))]
    pub async fn create_order(&self, params: OrderCreate) -> Result<Order, CanteenError> {
        info!("Sending create_order to store");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn set_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, CanteenError> {
        debug!("Sending request");
        self.inner
            .update(id, OrderUpdate { status })
            .await
            .map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = CanteenError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        CanteenError::from(e)
    }
}
