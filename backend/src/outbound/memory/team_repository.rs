//! In-memory implementation of [`TeamRepository`].

use std::collections::BTreeSet;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::TeamName;
use crate::domain::ports::{TeamPersistenceError, TeamRepository};

/// Set of known team names.
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    teams: RwLock<BTreeSet<TeamName>>,
}

impl InMemoryTeamRepository {
    /// Create a store with no teams.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn create(&self, team_name: &TeamName) -> Result<(), TeamPersistenceError> {
        if self.teams.write().await.insert(team_name.clone()) {
            Ok(())
        } else {
            Err(TeamPersistenceError::duplicate(team_name.clone()))
        }
    }

    async fn find_by_name(
        &self,
        team_name: &TeamName,
    ) -> Result<Option<TeamName>, TeamPersistenceError> {
        Ok(self.teams.read().await.get(team_name).cloned())
    }

    async fn exists(&self, team_name: &TeamName) -> Result<bool, TeamPersistenceError> {
        Ok(self.teams.read().await.contains(team_name))
    }
}
