//! Driving port for team creation and roster reads.

use async_trait::async_trait;

use crate::domain::{Error, Team, TeamName};

/// Driving port for team membership.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TeamMembership: Send + Sync {
    /// Create a team, or merge the payload into an existing one.
    ///
    /// Payload members are created or updated (possibly moving them from
    /// another team). The returned roster holds pre-existing members plus
    /// every payload member, each once.
    async fn create_team(&self, team: Team) -> Result<Team, Error>;

    /// Fetch a team with its live roster; `NOT_FOUND` when absent.
    async fn get_team(&self, team_name: &TeamName) -> Result<Team, Error>;
}
