//! [`ActorEntity`] implementation for [`Order`].
//!
//! Validation of the caller's input happens before the store is reached (see
//! [`OrderLifecycleManager`](crate::ordering::OrderLifecycleManager)); the
//! hooks here only guard references to other stores.

use async_trait::async_trait;
use canteen_store::{ActorClient, ActorEntity};
use tracing::{debug, info};

use super::OrderContext;
use crate::error::CanteenError;
use crate::model::{Order, OrderCreate, OrderId, OrderUpdate};

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    type Update = OrderUpdate;
    type Context = OrderContext;
    type Error = CanteenError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, CanteenError> {
        if params.quantity == 0 {
            return Err(CanteenError::validation("quantity must be greater than 0"));
        }
        Ok(Order::new(id, params))
    }

    /// Rejects orders for users the store does not know.
    async fn on_create(&mut self, ctx: &OrderContext) -> Result<(), CanteenError> {
        let (users, _) = ctx;
        debug!(order_id = %self.id, user_id = %self.user_id, "Checking owner");
        if users.get(self.user_id).await?.is_none() {
            return Err(CanteenError::not_found(format!("user {}", self.user_id)));
        }
        Ok(())
    }

    async fn on_update(
        &mut self,
        update: OrderUpdate,
        _ctx: &OrderContext,
    ) -> Result<(), CanteenError> {
        debug!(order_id = %self.id, from = %self.status, to = %update.status, "Status change");
        self.status = update.status;
        Ok(())
    }

    /// Removes the order's feedback first; the order stays if that fails.
    async fn on_delete(&self, ctx: &OrderContext) -> Result<(), CanteenError> {
        let (_, feedback) = ctx;
        if let Some(record) = feedback.for_order(self.id).await? {
            feedback.delete(record.id).await?;
            info!(order_id = %self.id, feedback_id = %record.id, "Feedback removed with order");
        }
        Ok(())
    }
}
