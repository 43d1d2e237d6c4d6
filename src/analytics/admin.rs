//! The admin report: who signed up when, what they spent, and what they ate.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

use super::grouping::{group_by_date, DateBucket, DayClock, DayLabel, Timestamped};
use super::snapshot::Snapshot;
use crate::model::{Role, UserId, UserRef};

/// One user with their lifetime order count and spend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub user: UserRef,
    pub role: Role,
    pub created_at: Option<DateTime<Utc>>,
    pub orders_count: usize,
    pub total_spent: f64,
}

impl Timestamped for UserSummary {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

/// Users who joined on one day, with that cohort's totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UsersDay {
    pub date: NaiveDate,
    pub label: DayLabel,
    pub user_count: usize,
    pub order_count: usize,
    pub amount_spent: f64,
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealLine {
    pub meal_name: String,
    pub quantity: u32,
}

/// What one user ordered on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersByUser {
    pub user: UserRef,
    pub meals: Vec<MealLine>,
    pub total_meals: u32,
    /// At least one of the day's orders has feedback.
    pub feedback: bool,
    pub latest_order_date: DateTime<Utc>,
}

impl Timestamped for OrdersByUser {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.latest_order_date)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersByUserDay {
    pub date: NaiveDate,
    pub label: DayLabel,
    pub total_meals: u32,
    pub users: Vec<OrdersByUser>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminTotals {
    pub users: usize,
    pub orders: usize,
    pub amount_spent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminReport {
    pub totals: AdminTotals,
    pub users: Vec<UsersDay>,
    pub orders_by_user: Vec<OrdersByUserDay>,
}

/// Builds the admin report from one snapshot.
pub fn build_admin_report(snapshot: &Snapshot, clock: DayClock) -> AdminReport {
    let summaries: Vec<UserSummary> = snapshot
        .users
        .iter()
        .map(|user| {
            let own = snapshot.orders.iter().filter(|o| o.user_id == user.id);
            let (orders_count, total_spent) =
                own.fold((0, 0.0), |(n, sum), o| (n + 1, sum + o.total_price));
            UserSummary {
                user: UserRef::from(user),
                role: user.role,
                created_at: user.created_at,
                orders_count,
                total_spent,
            }
        })
        .collect();

    let totals = AdminTotals {
        users: summaries.len(),
        orders: summaries.iter().map(|s| s.orders_count).sum(),
        amount_spent: summaries.iter().map(|s| s.total_spent).sum(),
    };

    let users = group_by_date(summaries, |s| s.created_at, clock)
        .into_iter()
        .map(users_day)
        .collect();

    let orders_by_user = group_by_date(
        orders_by_user_rows(snapshot, clock),
        |row| Some(row.latest_order_date),
        clock,
    )
    .into_iter()
    .map(|bucket| OrdersByUserDay {
        date: bucket.date,
        label: bucket.label,
        total_meals: bucket.items.iter().map(|row| row.total_meals).sum(),
        users: bucket.items,
    })
    .collect();

    AdminReport {
        totals,
        users,
        orders_by_user,
    }
}

fn users_day(bucket: DateBucket<UserSummary>) -> UsersDay {
    UsersDay {
        date: bucket.date,
        label: bucket.label,
        user_count: bucket.items.len(),
        order_count: bucket.items.iter().map(|s| s.orders_count).sum(),
        amount_spent: bucket.items.iter().map(|s| s.total_spent).sum(),
        users: bucket.items,
    }
}

/// One row per (user, day) with the day's meals in first-ordered order.
fn orders_by_user_rows(snapshot: &Snapshot, clock: DayClock) -> Vec<OrdersByUser> {
    let mut rows: BTreeMap<(UserId, NaiveDate), OrdersByUser> = BTreeMap::new();
    for order in &snapshot.orders {
        let Some(user) = snapshot.user(order.user_id) else {
            warn!(
                order_id = %order.id,
                user_id = %order.user_id,
                "Order for unknown user left out of report"
            );
            continue;
        };
        let row = rows
            .entry((order.user_id, clock.day_of(order.placed_at)))
            .or_insert_with(|| OrdersByUser {
                user: UserRef::from(user),
                meals: Vec::new(),
                total_meals: 0,
                feedback: false,
                latest_order_date: order.placed_at,
            });

        match row.meals.iter_mut().find(|m| m.meal_name == order.meal_name) {
            Some(line) => line.quantity += order.quantity,
            None => row.meals.push(MealLine {
                meal_name: order.meal_name.clone(),
                quantity: order.quantity,
            }),
        }
        row.total_meals += order.quantity;
        row.feedback |= snapshot.has_feedback(order.id);
        row.latest_order_date = row.latest_order_date.max(order.placed_at);
    }
    rows.into_values().collect()
}
