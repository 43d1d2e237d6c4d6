//! # Order Lifecycle
//!
//! [`OrderLifecycleManager`] is the only way orders are created, moved
//! through their statuses or deleted. Every call is checked against the
//! [`RoleAuthorizer`] first; every write is one request to the Order store.
//!
//! ```text
//! create_order ──────────┐
//! create_weekly_order ───┼─ authorize ─ validate ─ window ─ resolve meal ─ write
//! update_daily_order ────┘
//! update_status ─ authorize ─ parse ─ write
//! delete_order ── authorize ─ delete (feedback goes with it)
//! ```

pub mod cutoff;

pub use cutoff::OrderWindow;

use std::sync::Arc;

use canteen_store::ActorClient;
use mockable::Clock;
use serde::Serialize;
use tracing::{info, instrument};

use crate::authorizer::{Capability, RoleAuthorizer};
use crate::clients::{MealClient, OrderClient};
use crate::config::CanteenConfig;
use crate::context::RequestContext;
use crate::error::CanteenError;
use crate::model::{Order, OrderCreate, OrderId, OrderInput, OrderStatus, OrderView, UserId};

/// One user's orders with their count and spend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserOrders {
    pub user_id: UserId,
    pub orders: Vec<OrderView>,
    pub order_count: usize,
    /// `None` for roles that may not see prices.
    pub total_spent: Option<f64>,
}

/// Creates, transitions, deletes and reads orders.
#[derive(Clone)]
pub struct OrderLifecycleManager {
    orders: OrderClient,
    meals: MealClient,
    config: Arc<CanteenConfig>,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl OrderLifecycleManager {
    pub fn new(
        orders: OrderClient,
        meals: MealClient,
        config: Arc<CanteenConfig>,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            orders,
            meals,
            config,
            clock,
        }
    }

    /// Places an order outside any ordering window.
    #[instrument(skip(self, ctx), fields(actor = %ctx.actor.id))]
    pub async fn create_order(
        &self,
        ctx: &RequestContext,
        input: OrderInput,
    ) -> Result<OrderView, CanteenError> {
        self.place(ctx, input, OrderWindow::Open).await
    }

    /// Places an order for the coming week; closes at the weekly cutoff.
    #[instrument(skip(self, ctx), fields(actor = %ctx.actor.id))]
    pub async fn create_weekly_order(
        &self,
        ctx: &RequestContext,
        input: OrderInput,
    ) -> Result<OrderView, CanteenError> {
        self.place(ctx, input, OrderWindow::Weekly).await
    }

    /// Adds a same-day order; closes at the daily cutoff.
    ///
    /// Orders are immutable once placed, so this appends a new order for the
    /// day rather than editing an earlier one.
    #[instrument(skip(self, ctx), fields(actor = %ctx.actor.id))]
    pub async fn update_daily_order(
        &self,
        ctx: &RequestContext,
        input: OrderInput,
    ) -> Result<OrderView, CanteenError> {
        self.place(ctx, input, OrderWindow::Daily).await
    }

    async fn place(
        &self,
        ctx: &RequestContext,
        input: OrderInput,
        window: OrderWindow,
    ) -> Result<OrderView, CanteenError> {
        let actor = &ctx.actor;
        RoleAuthorizer::require(actor, Capability::PlaceOrder)?;

        let valid = input.validate()?;
        if valid.user_id != actor.id {
            RoleAuthorizer::require(actor, Capability::ViewAllOrders)?;
        }

        let now = self.clock.utc();
        match window {
            OrderWindow::Open => {}
            OrderWindow::Weekly => {
                cutoff::check_weekly(now, &self.config.weekly_cutoff, self.config.utc_offset)?
            }
            OrderWindow::Daily => {
                cutoff::check_daily(now, self.config.daily_cutoff, self.config.utc_offset)?
            }
        }

        let meal_name = match valid.meal_id {
            Some(meal_id) => {
                let meal = self
                    .meals
                    .get(meal_id)
                    .await?
                    .ok_or_else(|| CanteenError::not_found(format!("meal {meal_id}")))?;
                valid.meal_name.unwrap_or(meal.name)
            }
            None => valid.meal_name.unwrap_or_default(),
        };

        let order = self
            .orders
            .create_order(OrderCreate {
                user_id: valid.user_id,
                meal_id: valid.meal_id,
                meal_name,
                quantity: valid.quantity,
                price_per_unit: valid.price_per_unit,
                ordered_by_role: actor.role,
                placed_at: now,
            })
            .await?;

        info!(
            order_id = %order.id,
            user_id = %order.user_id,
            ?window,
            total = order.total_price,
            "Order placed"
        );
        Ok(self.view(ctx, order))
    }

    /// Moves an order to `new_status`. Any of the three statuses may follow any other.
    #[instrument(skip(self, ctx), fields(actor = %ctx.actor.id))]
    pub async fn update_status(
        &self,
        ctx: &RequestContext,
        order_id: OrderId,
        new_status: &str,
    ) -> Result<OrderView, CanteenError> {
        RoleAuthorizer::require(&ctx.actor, Capability::EditStatus)?;
        let status: OrderStatus = new_status.parse()?;
        let order = self.orders.set_status(order_id, status).await?;
        info!(%order_id, %status, "Status updated");
        Ok(self.view(ctx, order))
    }

    /// Deletes an order together with its feedback.
    #[instrument(skip(self, ctx), fields(actor = %ctx.actor.id))]
    pub async fn delete_order(
        &self,
        ctx: &RequestContext,
        order_id: OrderId,
    ) -> Result<(), CanteenError> {
        RoleAuthorizer::require(&ctx.actor, Capability::DeleteOrder)?;
        self.orders.delete(order_id).await?;
        info!(%order_id, "Order deleted");
        Ok(())
    }

    /// One order, if the actor may see it.
    ///
    /// Actors limited to their own orders get `Authorization` for any other id,
    /// stored or not.
    #[instrument(skip(self, ctx), fields(actor = %ctx.actor.id))]
    pub async fn get_order(
        &self,
        ctx: &RequestContext,
        order_id: OrderId,
    ) -> Result<OrderView, CanteenError> {
        let Some(order) = self.orders.get(order_id).await? else {
            RoleAuthorizer::require(&ctx.actor, Capability::ViewAllOrders)?;
            return Err(CanteenError::not_found(format!("order {order_id}")));
        };
        Self::require_visible(ctx, order.user_id)?;
        Ok(self.view(ctx, order))
    }

    /// Every order for caterers and admins; a worker's own orders otherwise.
    #[instrument(skip(self, ctx), fields(actor = %ctx.actor.id))]
    pub async fn list_orders(&self, ctx: &RequestContext) -> Result<Vec<OrderView>, CanteenError> {
        let orders = self.orders.list().await?;
        let see_all = RoleAuthorizer::can_view_all_orders(ctx.role());
        Ok(orders
            .into_iter()
            .filter(|o| see_all || o.user_id == ctx.actor.id)
            .map(|o| self.view(ctx, o))
            .collect())
    }

    #[instrument(skip(self, ctx), fields(actor = %ctx.actor.id))]
    pub async fn orders_for_user(
        &self,
        ctx: &RequestContext,
        user_id: UserId,
    ) -> Result<UserOrders, CanteenError> {
        Self::require_visible(ctx, user_id)?;
        let orders: Vec<Order> = self
            .orders
            .list()
            .await?
            .into_iter()
            .filter(|o| o.user_id == user_id)
            .collect();

        let total_spent = RoleAuthorizer::can_see_prices(ctx.role())
            .then(|| orders.iter().map(|o| o.total_price).sum::<f64>());
        let orders: Vec<OrderView> = orders.into_iter().map(|o| self.view(ctx, o)).collect();
        Ok(UserOrders {
            user_id,
            order_count: orders.len(),
            orders,
            total_spent,
        })
    }

    /// Sum of order totals: across everyone for admins, own orders for workers.
    #[instrument(skip(self, ctx), fields(actor = %ctx.actor.id))]
    pub async fn total_spent(&self, ctx: &RequestContext) -> Result<f64, CanteenError> {
        RoleAuthorizer::require(&ctx.actor, Capability::SeePrices)?;
        let see_all = RoleAuthorizer::can_view_all_orders(ctx.role());
        let orders = self.orders.list().await?;
        Ok(orders
            .iter()
            .filter(|o| see_all || o.user_id == ctx.actor.id)
            .map(|o| o.total_price)
            .sum())
    }

    fn require_visible(ctx: &RequestContext, owner: UserId) -> Result<(), CanteenError> {
        if owner == ctx.actor.id {
            Ok(())
        } else {
            RoleAuthorizer::require(&ctx.actor, Capability::ViewAllOrders)
        }
    }

    fn view(&self, ctx: &RequestContext, order: Order) -> OrderView {
        OrderView::new(order, RoleAuthorizer::can_see_prices(ctx.role()))
    }
}
