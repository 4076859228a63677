//! Driving port for the pull request lifecycle.
//!
//! Covers creation with automatic reviewer assignment, merge, reviewer
//! reassignment and the per-user review listing.

use async_trait::async_trait;

use crate::domain::{Error, PullRequest, PullRequestId, UserId};

/// Request to open a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePullRequestRequest {
    pub pull_request_id: PullRequestId,
    pub pull_request_name: String,
    pub author_id: UserId,
}

/// Result of replacing a reviewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignmentOutcome {
    /// Pull request re-read after the swap.
    pub pull_request: PullRequest,
    /// Reviewer who took over.
    pub replaced_by: UserId,
}

/// Driving port for pull request operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestLifecycle: Send + Sync {
    /// Open a pull request and assign reviewers from the author's team.
    ///
    /// Fails with `PR_EXISTS` for a taken id and `NOT_FOUND` for an unknown
    /// author. An empty reviewer set is not an error.
    async fn create_pull_request(
        &self,
        request: CreatePullRequestRequest,
    ) -> Result<PullRequest, Error>;

    /// Merge a pull request. Merging twice returns the stored state.
    async fn merge_pull_request(&self, id: &PullRequestId) -> Result<PullRequest, Error>;

    /// Replace `old_reviewer` with another active member of their team.
    async fn reassign_reviewer(
        &self,
        id: &PullRequestId,
        old_reviewer: &UserId,
    ) -> Result<ReassignmentOutcome, Error>;

    /// Pull requests the user currently reviews, newest first.
    async fn user_reviews(&self, user_id: &UserId) -> Result<Vec<PullRequest>, Error>;
}
