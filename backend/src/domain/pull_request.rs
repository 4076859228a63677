//! Pull request aggregate and lifecycle state.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PullRequestId, UserId};

/// Lifecycle state of a pull request.
///
/// The only transition is `Open` → `Merged`, and it happens at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestStatus {
    /// Accepting review changes.
    Open,
    /// Merged; reviewers are frozen.
    Merged,
}

impl PullRequestStatus {
    /// Wire representation, e.g. `OPEN`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
        }
    }
}

impl fmt::Display for PullRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input used to open a new pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestDraft {
    /// Caller supplied identifier.
    pub id: PullRequestId,
    /// Title shown to reviewers.
    pub name: String,
    /// Author of the change.
    pub author_id: UserId,
    /// Initially assigned reviewers.
    pub reviewers: BTreeSet<UserId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Pull request with its assigned reviewer set.
///
/// ## Invariants
/// - The author is never one of the assigned reviewers.
/// - `merged_at` is present exactly when `status` is `Merged`.
/// - Reviewers are unique and iterate in identifier order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequest {
    pull_request_id: PullRequestId,
    pull_request_name: String,
    author_id: UserId,
    status: PullRequestStatus,
    assigned_reviewers: BTreeSet<UserId>,
    created_at: DateTime<Utc>,
    merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    /// Open a pull request from a draft; the author is dropped from the
    /// reviewer set if present.
    pub fn open(draft: PullRequestDraft) -> Self {
        let PullRequestDraft {
            id,
            name,
            author_id,
            mut reviewers,
            created_at,
        } = draft;
        reviewers.remove(&author_id);
        Self {
            pull_request_id: id,
            pull_request_name: name,
            author_id,
            status: PullRequestStatus::Open,
            assigned_reviewers: reviewers,
            created_at,
            merged_at: None,
        }
    }

    /// Pull request identifier.
    pub fn id(&self) -> &PullRequestId {
        &self.pull_request_id
    }

    /// Title.
    pub fn name(&self) -> &str {
        self.pull_request_name.as_str()
    }

    /// Author identifier.
    pub fn author_id(&self) -> &UserId {
        &self.author_id
    }

    /// Current lifecycle state.
    pub fn status(&self) -> PullRequestStatus {
        self.status
    }

    /// Returns `true` once merged.
    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }

    /// Assigned reviewers in identifier order.
    pub fn reviewers(&self) -> &BTreeSet<UserId> {
        &self.assigned_reviewers
    }

    /// Whether `user_id` is currently assigned.
    pub fn has_reviewer(&self, user_id: &UserId) -> bool {
        self.assigned_reviewers.contains(user_id)
    }

    /// Creation timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Merge timestamp, present once merged.
    pub fn merged_at(&self) -> Option<DateTime<Utc>> {
        self.merged_at
    }

    /// Transition to `Merged`.
    ///
    /// Returns `false` without touching the timestamp when already merged.
    pub fn mark_merged(&mut self, merged_at: DateTime<Utc>) -> bool {
        if self.is_merged() {
            return false;
        }
        self.status = PullRequestStatus::Merged;
        self.merged_at = Some(merged_at);
        true
    }

    /// Add a reviewer. Adding the author or an existing reviewer is a no-op.
    pub fn add_reviewer(&mut self, user_id: UserId) {
        if user_id != self.author_id {
            self.assigned_reviewers.insert(user_id);
        }
    }

    /// Remove a reviewer, returning whether they were assigned.
    pub fn remove_reviewer(&mut self, user_id: &UserId) -> bool {
        self.assigned_reviewers.remove(user_id)
    }
}
