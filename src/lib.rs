//! # Canteen
//!
//! The business rules of an office meal-ordering tool. Workers order meals,
//! caterers run the menu and move orders through their statuses, admins
//! oversee orders, spending and feedback.
//!
//! ## Core Components
//!
//! - **[authorizer]**: the fixed role → capability table every call goes through.
//! - **[ordering]**: [`OrderLifecycleManager`](ordering::OrderLifecycleManager),
//!   order creation with weekly and daily cutoffs, status changes, deletion.
//! - **[feedback]**: [`FeedbackReconciler`](feedback::FeedbackReconciler), one
//!   feedback record per order, merged field by field.
//! - **[analytics]**: date-bucketed admin and caterer reports over snapshots.
//! - **[search]** and **[catalog]**: approximate keyword search and the
//!   role-gated menu.
//!
//! ## Storage
//!
//! Each record type lives in its own in-memory store actor from
//! [`canteen_store`]: [`user_actor`], [`meal_actor`], [`order_actor`] and
//! [`feedback_actor`], reached through the typed [`clients`].
//! [`lifecycle::CanteenSystem`] starts and wires them.
//!
//! ## Errors
//!
//! Every operation returns its result or exactly one
//! [`CanteenError`](error::CanteenError): validation, authorization, not
//! found, deadline exceeded or persistence.
//!
//! ## Testing
//!
//! See [`canteen_store::mock`] for testing a store against scripted
//! dependencies, and pass a fixed [`mockable::Clock`] to
//! [`CanteenSystem::with_clock`](lifecycle::CanteenSystem::with_clock) to pin
//! the ordering windows.

pub mod analytics;
pub mod authorizer;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod context;
pub mod error;
pub mod feedback;
pub mod feedback_actor;
pub mod lifecycle;
pub mod meal_actor;
pub mod model;
pub mod order_actor;
pub mod ordering;
pub mod search;
pub mod user_actor;
