//! Records exchanged with the store and the outside world.
//!
//! Each record implements [`ActorEntity`](canteen_store::ActorEntity) in its
//! `*_actor` module; this module only holds the data and its invariants.

/// Declares a typed record id: a `u32` newtype allocated by the store and
/// displayed with a resource prefix (`order_7`).
macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
            serde::Serialize, serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

pub mod feedback;
pub mod meal;
pub mod order;
pub mod user;

pub use feedback::*;
pub use meal::*;
pub use order::*;
pub use user::*;
