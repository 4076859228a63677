//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;

use crate::domain::{PullRequestService, SeededReviewerSelector, TeamService, UserActivityService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{
    InMemoryPullRequestRepository, InMemoryTeamRepository, InMemoryUserRepository,
};

/// Seed shared by handler tests so reviewer draws repeat across runs.
pub const TEST_SEED: u64 = 7;

/// Build handler state backed by fresh in-memory stores.
///
/// - Reviewer selection uses [`SeededReviewerSelector`] with [`TEST_SEED`].
/// - Every call starts from empty stores.
pub fn memory_state() -> web::Data<HttpState> {
    let users = Arc::new(InMemoryUserRepository::new());
    let teams = Arc::new(InMemoryTeamRepository::new());
    let pull_requests = Arc::new(InMemoryPullRequestRepository::new());

    let lifecycle = PullRequestService::new(
        Arc::clone(&users),
        pull_requests,
        Arc::new(DefaultClock),
    )
    .with_selector(Arc::new(SeededReviewerSelector::new(TEST_SEED)));

    web::Data::new(HttpState::new(
        Arc::new(lifecycle),
        Arc::new(TeamService::new(teams, Arc::clone(&users))),
        Arc::new(UserActivityService::new(users)),
    ))
}
