//! [`ActorEntity`] implementation for [`User`].

use async_trait::async_trait;
use canteen_store::ActorEntity;
use std::convert::Infallible;

use crate::error::CanteenError;
use crate::model::{User, UserCreate, UserId};

#[async_trait]
impl ActorEntity for User {
    type Id = UserId;
    type Create = UserCreate;
    type Update = Infallible;
    type Context = ();
    type Error = CanteenError;

    fn from_create_params(id: UserId, params: UserCreate) -> Result<Self, CanteenError> {
        let name = params.name.trim().to_string();
        let email = params.email.trim().to_string();
        if name.is_empty() {
            return Err(CanteenError::validation("user name is required"));
        }
        if email.is_empty() {
            return Err(CanteenError::validation("user email is required"));
        }
        Ok(Self {
            id,
            name,
            email,
            role: params.role,
            profile_image: params.profile_image,
            created_at: params.created_at,
        })
    }

    async fn on_update(&mut self, update: Infallible, _ctx: &()) -> Result<(), CanteenError> {
        match update {}
    }
}
