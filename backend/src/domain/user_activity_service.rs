//! User lookup and reviewing eligibility toggling.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{UserActivity, UserRepository};
use crate::domain::{DomainError, Error, StoreDeadline, User, UserId};

/// Service implementing the [`UserActivity`] driving port.
#[derive(Clone)]
pub struct UserActivityService<U> {
    users: Arc<U>,
    deadline: StoreDeadline,
}

impl<U> UserActivityService<U> {
    /// Create a service over the user store with the default store deadline.
    pub fn new(users: Arc<U>) -> Self {
        Self {
            users,
            deadline: StoreDeadline::default(),
        }
    }

    /// Set the bound applied to every store call.
    #[must_use]
    pub fn with_store_deadline(mut self, deadline: StoreDeadline) -> Self {
        self.deadline = deadline;
        self
    }
}

#[async_trait]
impl<U> UserActivity for UserActivityService<U>
where
    U: UserRepository,
{
    async fn set_is_active(&self, user_id: &UserId, is_active: bool) -> Result<User, Error> {
        let user = self
            .deadline
            .call("set user activity", self.users.set_active(user_id, is_active))
            .await?;
        info!(user_id = %user_id, is_active, "user activity changed");
        Ok(user)
    }

    async fn get_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.deadline
            .call("load user", self.users.find_by_id(user_id))
            .await?
            .ok_or_else(|| DomainError::not_found("user not found").into())
    }
}
