//! # Store Errors
//!
//! Errors surfaced by the store itself, independent of any record type.

/// Errors returned by [`ResourceClient`](crate::ResourceClient) calls.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store actor closed")]
    ActorClosed,
    #[error("Store actor dropped response channel")]
    ActorDropped,
    #[error("Record not found: {0}")]
    NotFound(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Returns the entity error as `E` if that is what the hook raised.
    pub fn entity_error<E: std::error::Error + 'static>(&self) -> Option<&E> {
        match self {
            StoreError::EntityError(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }
}
