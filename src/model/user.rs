use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

use crate::error::CanteenError;

record_id!(
    /// Type-safe identifier for Users.
    UserId,
    "user"
);

/// What a user is allowed to do; see [`RoleAuthorizer`](crate::authorizer::RoleAuthorizer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Worker,
    Caterer,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Worker => "worker",
            Role::Caterer => "caterer",
            Role::Admin => "admin",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CanteenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "worker" => Ok(Role::Worker),
            "caterer" => Ok(Role::Caterer),
            "admin" => Ok(Role::Admin),
            other => Err(CanteenError::validation(format!("unknown role '{other}'"))),
        }
    }
}

/// A registered member of staff.
///
/// Users arrive from the identity provider (see
/// [`IdentityPayload`](crate::context::IdentityPayload)) and are mirrored into
/// the user store so orders can be checked against them. The role never
/// changes once the user exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub profile_image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for registering a user in the store.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub profile_image: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl UserCreate {
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role,
            profile_image: None,
            created_at: None,
        }
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }
}

/// The `{id, email, name}` triple attached to records that name a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    pub email: String,
    pub name: String,
}

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}
