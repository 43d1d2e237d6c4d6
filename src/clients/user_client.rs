//! # User Client
use crate::error::CanteenError;
use crate::model::{User, UserCreate};
use async_trait::async_trait;
use canteen_store::{ActorClient, ResourceClient, StoreError};
use tracing::{debug, instrument};

/// Client for the User store.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_user(&self, params: UserCreate) -> Result<User, CanteenError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// The stored user with this email, compared case-insensitively.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, CanteenError> {
        let users = self.list().await?;
        Ok(users
            .into_iter()
            .find(|u| u.email.eq_ignore_ascii_case(email.trim())))
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = CanteenError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: StoreError) -> Self::Error {
        CanteenError::from(e)
    }
}
