//! The caterer report: what to cook each day and for whom. Never carries prices.

use chrono::NaiveDate;
use serde::Serialize;

use super::grouping::{group_by_date, DayClock, DayLabel};
use super::snapshot::Snapshot;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealTally {
    pub meal_name: String,
    /// Number of orders for this meal on the day.
    pub total_orders: usize,
    /// Display names of the users who ordered it, each once.
    pub users: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatererDay {
    pub date: NaiveDate,
    pub label: DayLabel,
    pub total_orders: usize,
    pub meals: Vec<MealTally>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CatererReport {
    pub days: Vec<CatererDay>,
}

/// Builds the caterer report from one snapshot.
pub fn build_caterer_report(snapshot: &Snapshot, clock: DayClock) -> CatererReport {
    let days = group_by_date(snapshot.orders.iter().cloned(), |o| Some(o.placed_at), clock)
        .into_iter()
        .map(|bucket| {
            let mut meals: Vec<MealTally> = Vec::new();
            for order in &bucket.items {
                let name = snapshot
                    .user(order.user_id)
                    .map(|u| u.name.clone())
                    .unwrap_or_else(|| order.user_id.to_string());

                let tally = match meals.iter().position(|m| m.meal_name == order.meal_name) {
                    Some(i) => &mut meals[i],
                    None => {
                        meals.push(MealTally {
                            meal_name: order.meal_name.clone(),
                            total_orders: 0,
                            users: Vec::new(),
                        });
                        let last = meals.len() - 1;
                        &mut meals[last]
                    }
                };
                tally.total_orders += 1;
                if !tally.users.contains(&name) {
                    tally.users.push(name);
                }
            }
            CatererDay {
                date: bucket.date,
                label: bucket.label,
                total_orders: bucket.items.len(),
                meals,
            }
        })
        .collect();

    CatererReport { days }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Order, OrderCreate, OrderId, Role, User, UserId};
    use chrono::{DateTime, FixedOffset, TimeZone, Utc};

    fn order(id: u32, user: u32, meal: &str, at: DateTime<Utc>) -> Order {
        Order::new(
            OrderId(id),
            OrderCreate {
                user_id: UserId(user),
                meal_id: None,
                meal_name: meal.into(),
                quantity: 2,
                price_per_unit: 12.0,
                ordered_by_role: Role::Worker,
                placed_at: at,
            },
        )
    }

    fn user(id: u32, name: &str) -> User {
        User {
            id: UserId(id),
            name: name.into(),
            email: format!("{id}@example.com"),
            role: Role::Worker,
            profile_image: None,
            created_at: None,
        }
    }

    #[test]
    fn test_meals_tallied_per_day_with_distinct_users() {
        let monday = Utc.with_ymd_and_hms(2024, 4, 1, 9, 0, 0).unwrap();
        let tuesday = Utc.with_ymd_and_hms(2024, 4, 2, 9, 0, 0).unwrap();
        let snapshot = Snapshot {
            users: vec![user(1, "Kwame"), user(2, "Abena")],
            orders: vec![
                order(1, 1, "Fufu", monday),
                order(2, 1, "Fufu", monday),
                order(3, 2, "Fufu", monday),
                order(4, 2, "Kelewele", monday),
                order(5, 1, "Fufu", tuesday),
            ],
            feedback: vec![],
        };
        let clock = DayClock {
            now: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
            offset: FixedOffset::east_opt(0).unwrap(),
        };

        let report = build_caterer_report(&snapshot, clock);
        assert_eq!(report.days.len(), 2);
        assert_eq!(report.days[0].date, tuesday.date_naive());

        let monday_report = &report.days[1];
        assert_eq!(monday_report.total_orders, 4);
        assert_eq!(
            monday_report.meals[0],
            MealTally {
                meal_name: "Fufu".into(),
                total_orders: 3,
                users: vec!["Kwame".into(), "Abena".into()],
            }
        );
        assert_eq!(monday_report.meals[1].users, vec!["Abena".to_string()]);

        let json = serde_json::to_string(&report).unwrap();
        assert!(!json.contains("price"));
    }
}
