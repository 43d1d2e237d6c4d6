mod common;

use canteen::analytics::DayLabel;
use canteen::error::ErrorKind;
use canteen::model::{FeedbackFields, OrderInput, Role};
use chrono::{Duration, TimeZone, Utc, Weekday};
use common::{add_meal, sign_in, staff, start_at};

#[tokio::test]
async fn test_reports_are_role_gated() {
    let (system, _clock) = start_at(Utc.with_ymd_and_hms(2024, 1, 3, 9, 0, 0).unwrap());
    let staff = staff(&system).await;

    for (who, admin_ok, caterer_ok) in [
        (&staff.worker, false, false),
        (&staff.caterer, false, true),
        (&staff.admin, true, false),
    ] {
        let admin = system.analytics.admin_report(who).await;
        let caterer = system.analytics.caterer_report(who).await;
        assert_eq!(admin.is_ok(), admin_ok, "{} admin report", who.role());
        assert_eq!(caterer.is_ok(), caterer_ok, "{} caterer report", who.role());
        if let Err(e) = admin {
            assert_eq!(e.kind(), ErrorKind::Authorization);
        }
    }

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_reports_over_two_days() {
    let tuesday = Utc.with_ymd_and_hms(2024, 1, 2, 9, 0, 0).unwrap();
    let (system, clock) = start_at(tuesday);
    let staff = staff(&system).await;
    let meal = add_meal(&system, &staff.caterer, Weekday::Tue, "Jollof Rice", 40.0).await;

    let order = system
        .ordering
        .create_order(
            &staff.worker,
            OrderInput::new(staff.worker.actor.id, 2, 40.0).meal(meal.id),
        )
        .await
        .unwrap();
    system
        .reconciler
        .save_feedback(&staff.worker, order.id, FeedbackFields::default().eaten("yes"))
        .await
        .unwrap();

    clock.advance(Duration::days(1));
    let late_joiner = sign_in(&system, "Yaw", Role::Worker).await;
    for who in [&staff.worker, &late_joiner] {
        system
            .ordering
            .create_order(who, OrderInput::new(who.actor.id, 1, 40.0).meal(meal.id))
            .await
            .unwrap();
    }

    let admin = system.analytics.admin_report(&staff.admin).await.unwrap();
    assert_eq!(admin.totals.users, 4);
    assert_eq!(admin.totals.orders, 3);
    assert_eq!(admin.totals.amount_spent, 160.0);

    assert_eq!(admin.users[0].label, DayLabel::Today);
    assert_eq!(admin.users[0].user_count, 1);
    assert_eq!(admin.users[1].label, DayLabel::Yesterday);
    assert_eq!(admin.users[1].user_count, 3);
    assert_eq!(admin.users[1].amount_spent, 120.0);

    let today = &admin.orders_by_user[0];
    assert_eq!(today.label, DayLabel::Today);
    assert_eq!(today.total_meals, 2);
    assert!(today.users.iter().all(|row| !row.feedback));

    let yesterday = &admin.orders_by_user[1];
    assert_eq!(yesterday.total_meals, 2);
    assert!(yesterday.users[0].feedback);
    assert_eq!(yesterday.users[0].meals[0].meal_name, "Jollof Rice");

    let caterer = system.analytics.caterer_report(&staff.caterer).await.unwrap();
    assert_eq!(caterer.days.len(), 2);
    let wednesday = &caterer.days[0];
    assert_eq!(wednesday.meals[0].total_orders, 2);
    assert_eq!(wednesday.meals[0].users, vec!["Kojo".to_string(), "Yaw".to_string()]);

    let json = serde_json::to_value(&caterer).unwrap();
    assert!(json.is_array());
    assert_eq!(json[1]["label"], "Yesterday");

    system.shutdown().await.unwrap();
}
