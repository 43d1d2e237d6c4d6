use canteen_store::ActorClient;

use crate::clients::{FeedbackClient, OrderClient, UserClient};
use crate::error::CanteenError;
use crate::model::{Feedback, Order, OrderId, User, UserId};

/// Users, orders and feedback as fetched once for a report.
///
/// The three lists are read concurrently and carry no consistency guarantee
/// against writes that land in between.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub orders: Vec<Order>,
    pub feedback: Vec<Feedback>,
}

impl Snapshot {
    pub async fn fetch(
        users: &UserClient,
        orders: &OrderClient,
        feedback: &FeedbackClient,
    ) -> Result<Self, CanteenError> {
        let (users, orders, feedback) =
            tokio::try_join!(users.list(), orders.list(), feedback.list())?;
        Ok(Self {
            users,
            orders,
            feedback,
        })
    }

    pub fn user(&self, id: UserId) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn has_feedback(&self, order_id: OrderId) -> bool {
        self.feedback.iter().any(|f| f.order_id == order_id)
    }
}
