//! # Analytics
//!
//! Read-side reports over a [`Snapshot`] of users, orders and feedback.
//! [`AnalyticsAggregator`] checks the role, fetches the snapshot once and
//! hands it to a pure builder:
//!
//! - [`build_admin_report`]: users by join day, orders by user and day, overall totals.
//! - [`build_caterer_report`]: per day, per meal, how many orders and from whom.
//!
//! Days are calendar days in the configured UTC offset; see [`group_by_date`].

pub mod admin;
pub mod caterer;
pub mod grouping;
pub mod snapshot;

pub use admin::*;
pub use caterer::*;
pub use grouping::*;
pub use snapshot::*;

use std::sync::Arc;

use chrono::FixedOffset;
use mockable::Clock;
use tracing::{info, instrument};

use crate::authorizer::{Capability, ReportKind, RoleAuthorizer};
use crate::clients::{FeedbackClient, OrderClient, UserClient};
use crate::context::RequestContext;
use crate::error::CanteenError;

#[derive(Clone)]
pub struct AnalyticsAggregator {
    users: UserClient,
    orders: OrderClient,
    feedback: FeedbackClient,
    offset: FixedOffset,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl AnalyticsAggregator {
    pub fn new(
        users: UserClient,
        orders: OrderClient,
        feedback: FeedbackClient,
        offset: FixedOffset,
        clock: Arc<dyn Clock + Send + Sync>,
    ) -> Self {
        Self {
            users,
            orders,
            feedback,
            offset,
            clock,
        }
    }

    #[instrument(skip(self, ctx), fields(actor = %ctx.actor.id))]
    pub async fn admin_report(&self, ctx: &RequestContext) -> Result<AdminReport, CanteenError> {
        RoleAuthorizer::require(
            &ctx.actor,
            Capability::ViewAnalytics(ReportKind::AdminReport),
        )?;
        let snapshot = self.snapshot().await?;
        let report = build_admin_report(&snapshot, self.day_clock());
        info!(
            users = report.totals.users,
            orders = report.totals.orders,
            "Admin report built"
        );
        Ok(report)
    }

    #[instrument(skip(self, ctx), fields(actor = %ctx.actor.id))]
    pub async fn caterer_report(
        &self,
        ctx: &RequestContext,
    ) -> Result<CatererReport, CanteenError> {
        RoleAuthorizer::require(
            &ctx.actor,
            Capability::ViewAnalytics(ReportKind::CatererReport),
        )?;
        let snapshot = self.snapshot().await?;
        let report = build_caterer_report(&snapshot, self.day_clock());
        info!(days = report.days.len(), "Caterer report built");
        Ok(report)
    }

    async fn snapshot(&self) -> Result<Snapshot, CanteenError> {
        Snapshot::fetch(&self.users, &self.orders, &self.feedback).await
    }

    fn day_clock(&self) -> DayClock {
        DayClock {
            now: self.clock.utc(),
            offset: self.offset,
        }
    }
}
