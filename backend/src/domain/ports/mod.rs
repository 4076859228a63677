//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod pull_request_lifecycle;
mod pull_request_repository;
mod team_membership;
mod team_repository;
mod user_activity;
mod user_repository;

#[cfg(test)]
pub use pull_request_lifecycle::MockPullRequestLifecycle;
pub use pull_request_lifecycle::{
    CreatePullRequestRequest, PullRequestLifecycle, ReassignmentOutcome,
};
#[cfg(test)]
pub use pull_request_repository::MockPullRequestRepository;
pub use pull_request_repository::{PullRequestPersistenceError, PullRequestRepository};
#[cfg(test)]
pub use team_membership::MockTeamMembership;
pub use team_membership::TeamMembership;
#[cfg(test)]
pub use team_repository::MockTeamRepository;
pub use team_repository::{TeamPersistenceError, TeamRepository};
#[cfg(test)]
pub use user_activity::MockUserActivity;
pub use user_activity::UserActivity;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
