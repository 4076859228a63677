//! Request and response bodies shared by several handlers.
//!
//! Domain types stay framework agnostic and do not derive `ToSchema`; these
//! wrappers mirror them on the wire. Identifiers travel as plain strings and
//! are validated when converted into domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{PullRequest, Team, TeamMember, TeamName, User, UserId};
use crate::inbound::http::error::ApiError;

/// Team member on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeamMemberBody {
    #[schema(example = "u1")]
    pub user_id: String,
    #[schema(example = "alice")]
    pub username: String,
    pub is_active: bool,
}

/// Team with its member roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TeamBody {
    #[schema(example = "backend")]
    pub team_name: String,
    pub members: Vec<TeamMemberBody>,
}

impl From<Team> for TeamBody {
    fn from(value: Team) -> Self {
        let (team_name, members) = value.into_parts();
        Self {
            team_name: team_name.into(),
            members: members
                .into_iter()
                .map(|member| TeamMemberBody {
                    user_id: member.user_id.into(),
                    username: member.username,
                    is_active: member.is_active,
                })
                .collect(),
        }
    }
}

impl TryFrom<TeamBody> for Team {
    type Error = ApiError;

    fn try_from(value: TeamBody) -> Result<Self, Self::Error> {
        let team_name = TeamName::new(value.team_name)?;
        let members = value
            .members
            .into_iter()
            .map(|member| {
                Ok(TeamMember {
                    user_id: UserId::new(member.user_id)?,
                    username: member.username,
                    is_active: member.is_active,
                })
            })
            .collect::<Result<Vec<_>, ApiError>>()?;
        Ok(Self::new(team_name, members))
    }
}

/// User record on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserBody {
    #[schema(example = "u1")]
    pub user_id: String,
    #[schema(example = "alice")]
    pub username: String,
    #[schema(example = "backend")]
    pub team_name: String,
    pub is_active: bool,
}

impl From<User> for UserBody {
    fn from(value: User) -> Self {
        Self {
            user_id: value.id().to_string(),
            username: value.username().to_owned(),
            team_name: value.team_name().to_string(),
            is_active: value.is_active(),
        }
    }
}

/// Pull request with its assigned reviewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PullRequestBody {
    #[schema(example = "pr-1001")]
    pub pull_request_id: String,
    #[schema(example = "Add search")]
    pub pull_request_name: String,
    #[schema(example = "u1")]
    pub author_id: String,
    /// `OPEN` or `MERGED`.
    #[schema(example = "OPEN")]
    pub status: String,
    /// Reviewer ids in lexical order.
    pub assigned_reviewers: Vec<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merged_at: Option<DateTime<Utc>>,
}

impl From<PullRequest> for PullRequestBody {
    fn from(value: PullRequest) -> Self {
        Self {
            pull_request_id: value.id().to_string(),
            pull_request_name: value.name().to_owned(),
            author_id: value.author_id().to_string(),
            status: value.status().as_str().to_owned(),
            assigned_reviewers: value.reviewers().iter().map(ToString::to_string).collect(),
            created_at: value.created_at(),
            merged_at: value.merged_at(),
        }
    }
}

/// `{"pr": ...}` wrapper used by the pull request endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PullRequestEnvelope {
    pub pr: PullRequestBody,
}

impl From<PullRequest> for PullRequestEnvelope {
    fn from(value: PullRequest) -> Self {
        Self { pr: value.into() }
    }
}
