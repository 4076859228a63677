//! Port for team existence records.
//!
//! Teams are stored by name only. Rosters are derived from user records.
use async_trait::async_trait;

use crate::domain::{DomainError, Error, TeamName};

use super::define_port_error;

define_port_error! {
    /// Errors raised by team repository adapters.
    pub enum TeamPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "team repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "team repository query failed: {message}",
        /// A team with the same name is already stored.
        Duplicate { team_name: TeamName } => "team {team_name} already exists",
    }
}

impl From<TeamPersistenceError> for Error {
    fn from(value: TeamPersistenceError) -> Self {
        match value {
            TeamPersistenceError::Connection { message } => Self::unavailable(message),
            TeamPersistenceError::Query { message } => Self::query(message),
            TeamPersistenceError::Duplicate { team_name } => {
                DomainError::team_exists(format!("{team_name} already exists")).into()
            }
        }
    }
}

/// Store of team names.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Record a new team; fails with `Duplicate` when the name is taken.
    async fn create(&self, team_name: &TeamName) -> Result<(), TeamPersistenceError>;

    /// Fetch a team by name.
    async fn find_by_name(
        &self,
        team_name: &TeamName,
    ) -> Result<Option<TeamName>, TeamPersistenceError>;

    /// Whether the team exists.
    async fn exists(&self, team_name: &TeamName) -> Result<bool, TeamPersistenceError>;
}
