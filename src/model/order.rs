//! Orders and their lifecycle states.
//!
//! [`Order`] is managed by a [`ResourceActor`](canteen_store::ResourceActor);
//! see [`order_actor`](crate::order_actor) for the entity hooks.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use crate::error::CanteenError;
use crate::model::{MealId, Role, UserId};

record_id!(
    /// Type-safe identifier for Orders.
    OrderId,
    "order"
);

/// Fulfillment status. Every order starts as [`OrderStatus::Pending`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Completed => "completed",
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CanteenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(CanteenError::validation(format!(
                "unknown order status '{other}', expected pending, preparing or completed"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub meal_id: Option<MealId>,
    pub meal_name: String,
    pub quantity: u32,
    pub price_per_unit: f64,
    /// Always `price_per_unit * quantity`.
    pub total_price: f64,
    pub status: OrderStatus,
    pub ordered_by_role: Role,
    pub placed_at: DateTime<Utc>,
}

impl Order {
    /// Builds a pending order; the total is derived, never supplied.
    pub fn new(id: OrderId, params: OrderCreate) -> Self {
        Self {
            id,
            user_id: params.user_id,
            meal_id: params.meal_id,
            meal_name: params.meal_name,
            quantity: params.quantity,
            price_per_unit: params.price_per_unit,
            total_price: params.price_per_unit * f64::from(params.quantity),
            status: OrderStatus::Pending,
            ordered_by_role: params.ordered_by_role,
            placed_at: params.placed_at,
        }
    }
}

/// An order as it leaves the core. Prices are `None` for roles that may not
/// see them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: OrderId,
    pub user_id: UserId,
    pub meal_id: Option<MealId>,
    pub meal_name: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_unit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_price: Option<f64>,
    pub status: OrderStatus,
    pub ordered_by_role: Role,
    pub placed_at: DateTime<Utc>,
}

impl OrderView {
    pub fn new(order: Order, show_prices: bool) -> Self {
        Self {
            id: order.id,
            user_id: order.user_id,
            meal_id: order.meal_id,
            meal_name: order.meal_name,
            quantity: order.quantity,
            price_per_unit: show_prices.then_some(order.price_per_unit),
            total_price: show_prices.then_some(order.total_price),
            status: order.status,
            ordered_by_role: order.ordered_by_role,
            placed_at: order.placed_at,
        }
    }
}

/// Store payload for a validated order.
///
/// Built by the [`OrderLifecycleManager`](crate::ordering::OrderLifecycleManager)
/// from an [`OrderInput`] once the actor, the meal and the deadline have been
/// checked.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub user_id: UserId,
    pub meal_id: Option<MealId>,
    pub meal_name: String,
    pub quantity: u32,
    pub price_per_unit: f64,
    pub ordered_by_role: Role,
    pub placed_at: DateTime<Utc>,
}

/// The only mutation an order accepts after creation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OrderUpdate {
    pub status: OrderStatus,
}

/// What a caller submits when placing an order.
///
/// Everything is optional here so that missing fields surface as validation
/// errors rather than deserialization failures.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderInput {
    pub user_id: Option<UserId>,
    pub meal_id: Option<MealId>,
    pub meal_name: Option<String>,
    pub quantity: Option<u32>,
    pub price_per_unit: Option<f64>,
}

impl OrderInput {
    pub fn new(user_id: UserId, quantity: u32, price_per_unit: f64) -> Self {
        Self {
            user_id: Some(user_id),
            meal_id: None,
            meal_name: None,
            quantity: Some(quantity),
            price_per_unit: Some(price_per_unit),
        }
    }

    pub fn meal(mut self, meal_id: MealId) -> Self {
        self.meal_id = Some(meal_id);
        self
    }

    pub fn meal_name(mut self, name: impl Into<String>) -> Self {
        self.meal_name = Some(name.into());
        self
    }

    /// Checks required fields and their ranges.
    pub fn validate(&self) -> Result<ValidOrderInput, CanteenError> {
        let user_id = self
            .user_id
            .ok_or_else(|| CanteenError::validation("order needs an owning user"))?;

        let meal_name = self
            .meal_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string);
        if self.meal_id.is_none() && meal_name.is_none() {
            return Err(CanteenError::validation(
                "order needs a meal id or a meal name",
            ));
        }

        let quantity = match self.quantity {
            Some(q) if q > 0 => q,
            Some(_) => return Err(CanteenError::validation("quantity must be greater than 0")),
            None => return Err(CanteenError::validation("quantity is required")),
        };

        let price_per_unit = match self.price_per_unit {
            Some(p) if p.is_finite() && p >= 0.0 => p,
            Some(p) => {
                return Err(CanteenError::validation(format!(
                    "price per unit must be a non-negative amount, got {p}"
                )))
            }
            None => return Err(CanteenError::validation("price per unit is required")),
        };

        Ok(ValidOrderInput {
            user_id,
            meal_id: self.meal_id,
            meal_name,
            quantity,
            price_per_unit,
        })
    }
}

/// An [`OrderInput`] whose required fields are present and in range.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidOrderInput {
    pub user_id: UserId,
    pub meal_id: Option<MealId>,
    pub meal_name: Option<String>,
    pub quantity: u32,
    pub price_per_unit: f64,
}
