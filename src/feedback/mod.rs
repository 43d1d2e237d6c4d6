//! # Feedback Reconciliation
//!
//! Keeps at most one [`Feedback`] per order. The first submission creates the
//! record; later ones merge field by field, so a partial edit never blanks a
//! field it did not mention.
//!
//! Submissions and reads are limited to the order's owner and to roles that
//! can view all orders.

use std::sync::Arc;

use canteen_store::{ActorClient, Upserted};
use mockable::Clock;
use tracing::{info, instrument, warn};

use crate::authorizer::{Capability, RoleAuthorizer};
use crate::clients::{FeedbackClient, OrderClient, UserClient};
use crate::context::RequestContext;
use crate::error::CanteenError;
use crate::model::{
    Feedback, FeedbackCreate, FeedbackFields, Order, OrderId, OrderRef, ResolvedFeedback, User,
    UserId, UserRef,
};

/// Creates or merges the single feedback record of an order.
#[derive(Clone)]
pub struct FeedbackReconciler {
    feedback: FeedbackClient,
    orders: OrderClient,
    users: UserClient,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl FeedbackReconciler {
    pub fn new(
        feedback: FeedbackClient,
        orders: OrderClient,
        users: UserClient,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            feedback,
            orders,
            users,
            clock,
        }
    }

    /// The feedback on `order_id`, or `None` if nobody has submitted any yet.
    #[instrument(skip(self, ctx), fields(actor = %ctx.actor.id))]
    pub async fn get_feedback_for_order(
        &self,
        ctx: &RequestContext,
        order_id: OrderId,
    ) -> Result<Option<ResolvedFeedback>, CanteenError> {
        let order = self.visible_order(ctx, order_id).await?;
        match self.feedback.for_order(order_id).await? {
            Some(feedback) => Ok(Some(self.resolve(feedback, &order).await?)),
            None => Ok(None),
        }
    }

    /// Field-level upsert.
    ///
    /// With an existing record, only the supplied fields are overwritten.
    /// Without one, a record is created with the omitted fields empty and the
    /// actor as submitter. Repeating a call with the same fields leaves the
    /// record as the first call did.
    ///
    /// The actor must be a stored user; that is checked before anything is
    /// written.
    #[instrument(skip(self, ctx), fields(actor = %ctx.actor.id))]
    pub async fn save_feedback(
        &self,
        ctx: &RequestContext,
        order_id: OrderId,
        fields: FeedbackFields,
    ) -> Result<ResolvedFeedback, CanteenError> {
        let order = self.visible_order(ctx, order_id).await?;
        let actor = self.stored_user(ctx.actor.id).await?;

        let saved = self
            .feedback
            .save_for_order(FeedbackCreate {
                order_id,
                user_id: actor.id,
                fields,
                created_at: self.clock.utc(),
            })
            .await?;
        let feedback = match saved {
            Upserted::Created(feedback) => {
                info!(feedback_id = %feedback.id, %order_id, "Feedback created");
                feedback
            }
            Upserted::Updated(feedback) => {
                info!(feedback_id = %feedback.id, %order_id, "Feedback merged");
                feedback
            }
        };

        let submitter = if feedback.user_id == actor.id {
            actor
        } else {
            self.stored_user(feedback.user_id).await?
        };
        Ok(ResolvedFeedback {
            order: OrderRef::from(&order),
            submitted_by: UserRef::from(&submitter),
            feedback,
        })
    }

    /// All feedback for roles that view all orders; feedback on own orders otherwise.
    #[instrument(skip(self, ctx), fields(actor = %ctx.actor.id))]
    pub async fn list_feedback(
        &self,
        ctx: &RequestContext,
    ) -> Result<Vec<ResolvedFeedback>, CanteenError> {
        let see_all = RoleAuthorizer::can_view_all_orders(ctx.role());
        let orders = self.orders.list().await?;
        let users = self.users.list().await?;

        let mut resolved = Vec::new();
        for feedback in self.feedback.list().await? {
            let Some(order) = orders.iter().find(|o| o.id == feedback.order_id) else {
                continue;
            };
            if !see_all && order.user_id != ctx.actor.id {
                continue;
            }
            let Some(submitter) = users.iter().find(|u| u.id == feedback.user_id) else {
                warn!(
                    feedback_id = %feedback.id,
                    user_id = %feedback.user_id,
                    "Feedback from unknown user left out"
                );
                continue;
            };
            resolved.push(ResolvedFeedback {
                order: OrderRef::from(order),
                submitted_by: UserRef::from(submitter),
                feedback,
            });
        }
        Ok(resolved)
    }

    /// The order, if the actor may see it.
    ///
    /// Actors limited to their own orders get `Authorization` for any order
    /// that is not theirs, whether or not it exists.
    async fn visible_order(
        &self,
        ctx: &RequestContext,
        order_id: OrderId,
    ) -> Result<Order, CanteenError> {
        let order = self.orders.get(order_id).await?;
        match order {
            Some(order) if order.user_id == ctx.actor.id => Ok(order),
            Some(order) => {
                RoleAuthorizer::require(&ctx.actor, Capability::ViewAllOrders)?;
                Ok(order)
            }
            None => {
                RoleAuthorizer::require(&ctx.actor, Capability::ViewAllOrders)?;
                Err(CanteenError::not_found(format!("order {order_id}")))
            }
        }
    }

    async fn stored_user(&self, user_id: UserId) -> Result<User, CanteenError> {
        self.users
            .get(user_id)
            .await?
            .ok_or_else(|| CanteenError::not_found(format!("user {user_id}")))
    }

    async fn resolve(
        &self,
        feedback: Feedback,
        order: &Order,
    ) -> Result<ResolvedFeedback, CanteenError> {
        let submitter = self.stored_user(feedback.user_id).await?;
        Ok(ResolvedFeedback {
            order: OrderRef::from(order),
            submitted_by: UserRef::from(&submitter),
            feedback,
        })
    }
}
