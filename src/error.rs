//! Error types for the canteen core.
//!
//! Every public operation either returns its result or fails with exactly one
//! [`CanteenError`]; the caller decides how to present it.

use canteen_store::StoreError;
use thiserror::Error;

/// Errors that can occur in any canteen operation.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CanteenError {
    /// A required field is missing or malformed (zero quantity, unknown status...).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The actor's role lacks the capability the operation needs.
    #[error("Not authorized: {0}")]
    Authorization(String),

    /// The referenced order, meal, feedback or user does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The weekly or daily ordering window has closed.
    #[error("Ordering deadline passed: {0}")]
    DeadlineExceeded(String),

    /// The store could not complete the call.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// The kind of a [`CanteenError`], without its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Authorization,
    NotFound,
    DeadlineExceeded,
    Persistence,
}

impl CanteenError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CanteenError::Validation(msg.into())
    }

    pub fn authorization(msg: impl Into<String>) -> Self {
        CanteenError::Authorization(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        CanteenError::NotFound(msg.into())
    }

    pub fn deadline_exceeded(msg: impl Into<String>) -> Self {
        CanteenError::DeadlineExceeded(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CanteenError::Validation(_) => ErrorKind::Validation,
            CanteenError::Authorization(_) => ErrorKind::Authorization,
            CanteenError::NotFound(_) => ErrorKind::NotFound,
            CanteenError::DeadlineExceeded(_) => ErrorKind::DeadlineExceeded,
            CanteenError::Persistence(_) => ErrorKind::Persistence,
        }
    }
}

impl From<StoreError> for CanteenError {
    /// Errors raised by entity hooks travel boxed inside the store error and
    /// are unwrapped here so their kind survives the round trip.
    fn from(e: StoreError) -> Self {
        if let Some(inner) = e.entity_error::<CanteenError>() {
            return inner.clone();
        }
        match e {
            StoreError::NotFound(id) => CanteenError::NotFound(id),
            other => CanteenError::Persistence(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_errors_keep_their_kind() {
        let store_err =
            StoreError::EntityError(Box::new(CanteenError::not_found("user user_9")));
        assert_eq!(
            CanteenError::from(store_err),
            CanteenError::NotFound("user user_9".into())
        );
    }

    #[test]
    fn test_channel_failures_are_persistence_errors() {
        assert_eq!(
            CanteenError::from(StoreError::ActorClosed).kind(),
            ErrorKind::Persistence
        );
        assert_eq!(
            CanteenError::from(StoreError::NotFound("order_3".into())),
            CanteenError::NotFound("order_3".into())
        );
    }

    #[test]
    fn test_foreign_hook_errors_are_persistence_errors() {
        let store_err = StoreError::EntityError(Box::new(std::io::Error::other("disk")));
        assert_eq!(CanteenError::from(store_err).kind(), ErrorKind::Persistence);
    }
}
