//! Shared fixtures for the integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};

use canteen::config::CanteenConfig;
use canteen::context::RequestContext;
use canteen::lifecycle::CanteenSystem;
use canteen::model::{MealCreate, MealView, Role};
use chrono::{DateTime, Duration, Local, TimeZone, Utc, Weekday};
use mockable::Clock;

/// A clock tests can move.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.lock_clock() = now;
    }

    pub fn advance(&self, delta: Duration) {
        *self.lock_clock() += delta;
    }

    fn lock_clock(&self) -> MutexGuard<'_, DateTime<Utc>> {
        self.0
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.lock_clock()
    }
}

/// Wednesday 2024-01-03, 09:00 UTC: inside both default ordering windows.
pub fn midweek_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap()
}

/// Friday 2024-01-05, 17:00 UTC: the default weekly cutoff.
pub fn weekly_deadline() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 5, 17, 0, 0).unwrap()
}

pub fn start_at(now: DateTime<Utc>) -> (CanteenSystem, Arc<MutableClock>) {
    let clock = Arc::new(MutableClock::new(now));
    let system = CanteenSystem::with_clock(CanteenConfig::default(), clock.clone());
    (system, clock)
}

pub async fn sign_in(system: &CanteenSystem, name: &str, role: Role) -> RequestContext {
    let payload = serde_json::json!({
        "user": {
            "id": 0,
            "name": name,
            "email": format!("{}@canteen.example", name.to_lowercase()),
            "role": role.as_str(),
        }
    });
    system.sign_in(&payload.to_string()).await.unwrap()
}

/// A caterer, a worker and an admin, signed in in that order.
pub struct Staff {
    pub caterer: RequestContext,
    pub worker: RequestContext,
    pub admin: RequestContext,
}

pub async fn staff(system: &CanteenSystem) -> Staff {
    Staff {
        caterer: sign_in(system, "Efua", Role::Caterer).await,
        worker: sign_in(system, "Kojo", Role::Worker).await,
        admin: sign_in(system, "Adwoa", Role::Admin).await,
    }
}

pub async fn add_meal(
    system: &CanteenSystem,
    caterer: &RequestContext,
    day: Weekday,
    name: &str,
    price: f64,
) -> MealView {
    system
        .catalog
        .create_meal(caterer, MealCreate::new(day, name, price))
        .await
        .unwrap()
}
