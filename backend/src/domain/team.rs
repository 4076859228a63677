//! Team aggregate and its derived member view.

use serde::{Deserialize, Serialize};

use super::{TeamName, User, UserId};

/// Lightweight member view returned with a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Member identifier.
    pub user_id: UserId,
    /// Member username.
    pub username: String,
    /// Whether the member may review.
    pub is_active: bool,
}

impl From<&User> for TeamMember {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id().clone(),
            username: user.username().to_owned(),
            is_active: user.is_active(),
        }
    }
}

/// A team together with its member roster.
///
/// The roster is never stored on the team; services rebuild it from user
/// records whose `team_name` matches every time a team is returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Team {
    team_name: TeamName,
    members: Vec<TeamMember>,
}

impl Team {
    /// Build a team from its name and members.
    pub fn new(team_name: TeamName, members: Vec<TeamMember>) -> Self {
        Self { team_name, members }
    }

    /// Team name.
    pub fn name(&self) -> &TeamName {
        &self.team_name
    }

    /// Team members.
    pub fn members(&self) -> &[TeamMember] {
        self.members.as_slice()
    }

    /// Consume the team, returning its parts.
    pub fn into_parts(self) -> (TeamName, Vec<TeamMember>) {
        (self.team_name, self.members)
    }
}

/// Member list that keeps insertion order while replacing entries that share
/// a user id.
///
/// Used while reconciling a roster: pre-existing members are seeded first and
/// payload members overwrite them in place.
#[derive(Debug, Default)]
pub(crate) struct Roster {
    members: Vec<TeamMember>,
}

impl Roster {
    pub(crate) fn seeded(members: impl IntoIterator<Item = TeamMember>) -> Self {
        let mut roster = Self::default();
        for member in members {
            roster.upsert(member);
        }
        roster
    }

    pub(crate) fn upsert(&mut self, member: TeamMember) {
        match self
            .members
            .iter_mut()
            .find(|existing| existing.user_id == member.user_id)
        {
            Some(existing) => *existing = member,
            None => self.members.push(member),
        }
    }

    pub(crate) fn into_members(self) -> Vec<TeamMember> {
        self.members
    }
}
