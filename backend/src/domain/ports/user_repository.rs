//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{DomainError, Error, TeamName, User, UserId, UserPatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// A user with the same identifier is already stored.
        Duplicate { user_id: UserId } => "user {user_id} already exists",
        /// The addressed user does not exist.
        NotFound { user_id: UserId } => "user {user_id} not found",
    }
}

impl From<UserPersistenceError> for Error {
    fn from(value: UserPersistenceError) -> Self {
        match value {
            UserPersistenceError::Connection { message } => Self::unavailable(message),
            UserPersistenceError::Query { message } => Self::query(message),
            duplicate @ UserPersistenceError::Duplicate { .. } => {
                Self::query(duplicate.to_string())
            }
            UserPersistenceError::NotFound { .. } => DomainError::not_found("user not found").into(),
        }
    }
}

/// Store of user records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user; fails with `Duplicate` when the id is taken.
    async fn create(&self, user: &User) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// All users whose `team_name` matches, ordered by identifier.
    async fn list_by_team(&self, team_name: &TeamName) -> Result<Vec<User>, UserPersistenceError>;

    /// Apply a partial update and return the stored result.
    ///
    /// Fails with `NotFound` when the user is absent.
    async fn update(&self, id: &UserId, patch: &UserPatch) -> Result<User, UserPersistenceError>;

    /// Set the eligibility flag and return the stored result.
    ///
    /// Fails with `NotFound` when the user is absent.
    async fn set_active(&self, id: &UserId, is_active: bool) -> Result<User, UserPersistenceError>;

    /// Active members of `team_name` whose id is not in `excluded`.
    async fn list_active_in_team_excluding(
        &self,
        team_name: &TeamName,
        excluded: &[UserId],
    ) -> Result<Vec<User>, UserPersistenceError>;

    /// Whether a user with `id` exists in any team.
    async fn exists(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}

#[cfg(test)]
mod tests {
    //! Mapping of user store failures onto service errors.

    use rstest::rstest;

    use super::*;
    use crate::domain::{DomainErrorCode, InfrastructureKind};

    fn id() -> UserId {
        UserId::new("u1").expect("id")
    }

    #[rstest]
    fn missing_users_map_to_not_found() {
        let err = Error::from(UserPersistenceError::not_found(id()));
        assert_eq!(err.code(), Some(DomainErrorCode::NotFound));
    }

    #[rstest]
    #[case(UserPersistenceError::connection("refused"), InfrastructureKind::Unavailable)]
    #[case(UserPersistenceError::query("bad sql"), InfrastructureKind::Query)]
    #[case(UserPersistenceError::duplicate(id()), InfrastructureKind::Query)]
    fn other_failures_are_infrastructure(
        #[case] source: UserPersistenceError,
        #[case] expected: InfrastructureKind,
    ) {
        match Error::from(source) {
            Error::Infrastructure { kind, .. } => assert_eq!(kind, expected),
            other @ Error::Domain(_) => panic!("unexpected domain error: {other}"),
        }
    }
}
