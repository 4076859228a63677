//! Driving port for user lookups and the reviewing eligibility flag.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserActivity: Send + Sync {
    /// Set `is_active` and return the updated user; `NOT_FOUND` when absent.
    async fn set_is_active(&self, user_id: &UserId, is_active: bool) -> Result<User, Error>;

    /// Fetch a user; `NOT_FOUND` when absent.
    async fn get_user(&self, user_id: &UserId) -> Result<User, Error>;
}
