//! Typed wrappers around [`ResourceClient`](canteen_store::ResourceClient).
//!
//! Each client implements [`ActorClient`](canteen_store::ActorClient) for the
//! generic `get`, `list` and `delete`, maps store errors into
//! [`CanteenError`](crate::error::CanteenError), and adds the create and update
//! calls its resource supports.

pub mod feedback_client;
pub mod meal_client;
pub mod order_client;
pub mod user_client;

pub use feedback_client::*;
pub use meal_client::*;
pub use order_client::*;
pub use user_client::*;
