//! # Canteen demo
//!
//! A smoke run of the whole system: a caterer adds the menu, a worker places
//! a weekly order and leaves feedback, the caterer starts cooking, and both
//! reports are logged.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! CANTEEN_WEEKLY_CUTOFF="Sunday 23:59" RUST_LOG=debug cargo run
//! ```

use canteen::config::ConfigLoader;
use canteen::lifecycle::{setup_tracing, CanteenSystem};
use canteen::model::{FeedbackFields, MealCreate, OrderInput};
use chrono::Weekday;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = ConfigLoader::new().load().map_err(|e| e.to_string())?;
    info!("Starting canteen");
    let system = CanteenSystem::new(config);

    let caterer = system
        .sign_in(r#"{"id": 0, "name": "Efua", "email": "efua@canteen.example", "role": "caterer"}"#)
        .await
        .map_err(|e| e.to_string())?;
    let worker = system
        .sign_in(
            r#"{"user": {
                "id": 0, "name": "Kojo", "email": "kojo@canteen.example", "role": "worker"
            }}"#,
        )
        .await
        .map_err(|e| e.to_string())?;
    let admin = system
        .sign_in(r#"{"id": 0, "name": "Adwoa", "email": "adwoa@canteen.example", "role": "admin"}"#)
        .await
        .map_err(|e| e.to_string())?;

    let span = tracing::info_span!("menu_setup");
    let jollof = async {
        for (day, name, price) in [
            (Weekday::Mon, "Waakye", 30.0),
            (Weekday::Wed, "Banku and Tilapia", 45.0),
        ] {
            system
                .catalog
                .create_meal(&caterer, MealCreate::new(day, name, price))
                .await?;
        }
        system
            .catalog
            .create_meal(&caterer, MealCreate::new(Weekday::Tue, "Jollof Rice", 40.0))
            .await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;

    let found = system
        .catalog
        .search(&worker, "jolof")
        .await
        .map_err(|e| e.to_string())?;
    info!(results = found.len(), "Searched the menu for 'jolof'");
    let price = found
        .iter()
        .find(|meal| meal.id == jollof.id)
        .and_then(|meal| meal.price)
        .ok_or_else(|| "Jollof Rice is missing from the worker's menu".to_string())?;

    let span = tracing::info_span!("weekly_order");
    let placed = async {
        system
            .ordering
            .create_weekly_order(
                &worker,
                OrderInput::new(worker.actor.id, 2, price).meal(jollof.id),
            )
            .await
    }
    .instrument(span)
    .await;

    match placed {
        Ok(order) => {
            info!(order_id = %order.id, total = ?order.total_price, "Order placed");

            if let Err(e) = system
                .ordering
                .update_status(&caterer, order.id, "preparing")
                .await
            {
                error!(error = %e, "Status update failed");
            }

            let saved = system
                .reconciler
                .save_feedback(
                    &worker,
                    order.id,
                    FeedbackFields::default().eaten("yes").delivered("yes"),
                )
                .await
                .map_err(|e| e.to_string())?;
            info!(
                feedback_id = %saved.feedback.id,
                submitted_by = %saved.submitted_by.name,
                "Feedback saved"
            );
        }
        Err(e) => error!(error = %e, "Weekly order rejected"),
    }

    match system.analytics.caterer_report(&caterer).await {
        Ok(report) => info!(
            report = %serde_json::to_string(&report).unwrap_or_default(),
            "Caterer report"
        ),
        Err(e) => error!(error = %e, "Caterer report failed"),
    }
    match system.analytics.admin_report(&admin).await {
        Ok(report) => info!(
            users = report.totals.users,
            orders = report.totals.orders,
            spent = report.totals.amount_spent,
            "Admin report"
        ),
        Err(e) => error!(error = %e, "Admin report failed"),
    }

    system.shutdown().await.map_err(|e| e.to_string())?;
    info!("Canteen stopped");
    Ok(())
}
