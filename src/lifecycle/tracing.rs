//! # Observability & Tracing
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter with
//! filtering from `RUST_LOG`. Module paths are hidden (`with_target(false)`);
//! store logs carry an `entity_type` field instead, and service calls open
//! `#[instrument]` spans named after the operation.
//!
//! ```bash
//! RUST_LOG=info cargo run     # placed orders, status changes, reports
//! RUST_LOG=debug cargo run    # every store request with its payload
//! RUST_LOG=canteen::ordering=debug,canteen_store=info cargo run
//! ```
//!
//! With `RUST_LOG=info` a weekly order looks like:
//!
//! ```text
//! INFO create_weekly_order{actor=user_1}:create_order: Sending create_order to store
//!      user_id=user_1
//! INFO Created entity_type="Order" size=1
//! INFO create_weekly_order{actor=user_1}: Order placed
//!      order_id=order_1 user_id=user_1 window=Weekly total=40.0
//! ```

/// Installs the global subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
