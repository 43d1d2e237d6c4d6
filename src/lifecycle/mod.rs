//! # System Lifecycle
//!
//! Starting, wiring and stopping the stores.
//!
//! ## Dependency Injection via Context
//!
//! Stores are created without dependencies and receive them in `run(context)`
//! (late binding). Only the Order store has any:
//!
//! ```rust,ignore
//! impl ActorEntity for User  { type Context = (); }
//! impl ActorEntity for Order { type Context = (UserClient, FeedbackClient); }
//! ```
//!
//! ## Graceful Shutdown
//!
//! 1. **Drop all clients**, including the copies held by services.
//! 2. **Stores detect closure**: `receiver.recv()` returns `None`.
//! 3. **Await completion** of every store task.
//!
//! The dependency graph is acyclic, so closing channels is enough to stop
//! every store in a deterministic order.

pub mod canteen_system;
pub mod tracing;

pub use canteen_system::*;
pub use self::tracing::*;
