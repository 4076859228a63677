//! Team membership service.
//!
//! Creating a team that already exists is not an error: the payload is
//! merged into the stored roster instead. Users are upserted by id, so a
//! payload member that belongs to another team is moved here.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::domain::ports::{TeamMembership, TeamRepository, UserRepository};
use crate::domain::team::Roster;
use crate::domain::{
    DomainError, DomainErrorCode, Error, StoreDeadline, Team, TeamMember, TeamName, User,
    UserPatch,
};

/// Team service implementing the membership driving port.
#[derive(Clone)]
pub struct TeamService<T, U> {
    teams: Arc<T>,
    users: Arc<U>,
    deadline: StoreDeadline,
}

impl<T, U> TeamService<T, U> {
    /// Create a service over the team and user stores.
    pub fn new(teams: Arc<T>, users: Arc<U>) -> Self {
        Self {
            teams,
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

impl<T, U> TeamService<T, U>
where
    T: TeamRepository,
    U: UserRepository,
{
    /// Record the team, returning `true` when it was already present.
    async fn ensure_team(&self, team_name: &TeamName) -> Result<bool, Error> {
        let present = self
            .deadline
            .call("check team", self.teams.exists(team_name))
            .await?;
        if present {
            return Ok(true);
        }

        match self
            .deadline
            .call("create team", self.teams.create(team_name))
            .await
        {
            Ok(()) => Ok(false),
            // Lost a creation race; continue as an update.
            Err(err) if err.code() == Some(DomainErrorCode::TeamExists) => Ok(true),
            Err(err) => Err(err),
        }
    }

    async fn members_of(&self, team_name: &TeamName) -> Result<Vec<TeamMember>, Error> {
        let users = self
            .deadline
            .call("list team members", self.users.list_by_team(team_name))
            .await?;
        Ok(users.iter().map(TeamMember::from).collect())
    }

    async fn upsert_member(&self, team_name: &TeamName, member: TeamMember) -> Result<User, Error> {
        let TeamMember {
            user_id,
            username,
            is_active,
        } = member;

        let known = self
            .deadline
            .call("check user", self.users.exists(&user_id))
            .await?;
        if known {
            let patch = UserPatch::new()
                .with_username(username)
                .with_team_name(team_name.clone())
                .with_active(is_active);
            return self
                .deadline
                .call("update user", self.users.update(&user_id, &patch))
                .await;
        }

        let user = User::new(user_id, username, team_name.clone(), is_active);
        self.deadline
            .call("create user", self.users.create(&user))
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl<T, U> TeamMembership for TeamService<T, U>
where
    T: TeamRepository,
    U: UserRepository,
{
    async fn create_team(&self, team: Team) -> Result<Team, Error> {
        let (team_name, members) = team.into_parts();

        let existed = self.ensure_team(&team_name).await?;
        let mut roster = if existed {
            Roster::seeded(self.members_of(&team_name).await?)
        } else {
            Roster::default()
        };

        let requested = members.len();
        for member in members {
            let stored = self.upsert_member(&team_name, member).await?;
            debug!(team_name = %team_name, user_id = %stored.id(), "member reconciled");
            roster.upsert(TeamMember::from(&stored));
        }

        info!(
            team_name = %team_name,
            existed,
            requested,
            "team roster reconciled"
        );
        Ok(Team::new(team_name, roster.into_members()))
    }

    async fn get_team(&self, team_name: &TeamName) -> Result<Team, Error> {
        let name = self
            .deadline
            .call("load team", self.teams.find_by_name(team_name))
            .await?
            .ok_or_else(|| DomainError::not_found("team not found"))?;
        let members = self.members_of(&name).await?;
        Ok(Team::new(name, members))
    }
}

#[cfg(test)]
#[path = "team_service_tests.rs"]
mod tests;
