//! Per-request context and identity ingestion.
//!
//! The identity provider hands over the signed-in user either bare
//! (`{"id": 1, "name": ...}`) or wrapped (`{"user": {...}}`). Both shapes are
//! normalised here, once, into a [`User`]; nothing else in the crate inspects
//! the raw payload.

use serde::Deserialize;

use crate::error::CanteenError;
use crate::model::{Role, User};

/// The identity provider's user payload, in either of its shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdentityPayload {
    Wrapped { user: User },
    Bare(User),
}

impl IdentityPayload {
    /// Parses a JSON payload.
    pub fn from_json(raw: &str) -> Result<Self, CanteenError> {
        serde_json::from_str(raw)
            .map_err(|e| CanteenError::validation(format!("unreadable identity payload: {e}")))
    }

    pub fn into_user(self) -> User {
        match self {
            IdentityPayload::Wrapped { user } | IdentityPayload::Bare(user) => user,
        }
    }
}

/// Who is making the current call. Passed explicitly to every service method.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub actor: User,
}

impl RequestContext {
    pub fn new(actor: User) -> Self {
        Self { actor }
    }

    /// Builds a context straight from the identity provider's JSON.
    pub fn from_identity_json(raw: &str) -> Result<Self, CanteenError> {
        let user = IdentityPayload::from_json(raw)?.into_user();
        if user.email.trim().is_empty() {
            return Err(CanteenError::validation("identity payload has no email"));
        }
        Ok(Self::new(user))
    }

    pub fn role(&self) -> Role {
        self.actor.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::UserId;

    const BARE: &str =
        r#"{"id": 7, "name": "Kofi", "email": "kofi@example.com", "role": "worker"}"#;
    const WRAPPED: &str = r#"{"user": {
        "id": 7, "name": "Kofi", "email": "kofi@example.com", "role": "worker"
    }}"#;

    #[test]
    fn test_both_payload_shapes_yield_the_same_user() {
        let bare = RequestContext::from_identity_json(BARE).unwrap();
        let wrapped = RequestContext::from_identity_json(WRAPPED).unwrap();
        assert_eq!(bare, wrapped);
        assert_eq!(bare.actor.id, UserId(7));
        assert_eq!(bare.role(), Role::Worker);
        assert_eq!(bare.actor.profile_image, None);
    }

    #[test]
    fn test_unknown_role_is_a_validation_error() {
        let raw = r#"{"id": 1, "name": "X", "email": "x@example.com", "role": "chef"}"#;
        let err = RequestContext::from_identity_json(raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_blank_email_is_rejected() {
        let raw = r#"{"user": {"id": 1, "name": "X", "email": " ", "role": "admin"}}"#;
        assert!(RequestContext::from_identity_json(raw).is_err());
    }
}
