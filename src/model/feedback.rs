use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Order, OrderId, UserId, UserRef};

record_id!(
    /// Type-safe identifier for Feedback records.
    FeedbackId,
    "feedback"
);

/// A worker's note on one order: did they eat it, was it delivered, anything else.
///
/// There is at most one record per order. It is created the first time
/// anyone submits feedback for the order and merged in place afterwards
/// (see [`FeedbackReconciler`](crate::feedback::FeedbackReconciler)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feedback {
    pub id: FeedbackId,
    pub order_id: OrderId,
    pub user_id: UserId,
    pub eaten: String,
    pub delivered: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    pub fn new(id: FeedbackId, params: FeedbackCreate) -> Self {
        Self {
            id,
            order_id: params.order_id,
            user_id: params.user_id,
            eaten: params.fields.eaten.unwrap_or_default(),
            delivered: params.fields.delivered.unwrap_or_default(),
            comment: params.fields.comment.unwrap_or_default(),
            created_at: params.created_at,
        }
    }
}

/// The free-text fields a submission may carry. Omitted fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackFields {
    #[serde(default)]
    pub eaten: Option<String>,
    #[serde(default)]
    pub delivered: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

impl FeedbackFields {
    pub fn eaten(mut self, value: impl Into<String>) -> Self {
        self.eaten = Some(value.into());
        self
    }

    pub fn delivered(mut self, value: impl Into<String>) -> Self {
        self.delivered = Some(value.into());
        self
    }

    pub fn comment(mut self, value: impl Into<String>) -> Self {
        self.comment = Some(value.into());
        self
    }
}

/// Store payload for the first submission on an order.
#[derive(Debug, Clone)]
pub struct FeedbackCreate {
    pub order_id: OrderId,
    pub user_id: UserId,
    pub fields: FeedbackFields,
    pub created_at: DateTime<Utc>,
}

/// Field-level merge: only the supplied fields overwrite.
#[derive(Debug, Clone, Default)]
pub struct FeedbackUpdate {
    pub fields: FeedbackFields,
}

impl Feedback {
    /// Overwrites each field that `fields` supplies and leaves the rest alone.
    pub fn merge(&mut self, fields: FeedbackFields) {
        if let Some(eaten) = fields.eaten {
            self.eaten = eaten;
        }
        if let Some(delivered) = fields.delivered {
            self.delivered = delivered;
        }
        if let Some(comment) = fields.comment {
            self.comment = comment;
        }
    }
}

/// The order a feedback record belongs to, as shown to readers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRef {
    pub id: OrderId,
    pub meal_name: String,
    pub user_id: UserId,
}

impl From<&Order> for OrderRef {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id,
            meal_name: order.meal_name.clone(),
            user_id: order.user_id,
        }
    }
}

/// A feedback record with its order and submitting user resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedFeedback {
    #[serde(flatten)]
    pub feedback: Feedback,
    pub order: OrderRef,
    pub submitted_by: UserRef,
}
