//! Domain primitives, aggregates and services.
//!
//! Purpose: model teams, users and pull requests, and host the services that
//! assign reviewers and reconcile team rosters. Services reach storage only
//! through the traits in [`ports`].
//!
//! Public surface:
//! - `Error` (alias to `error::Error`): service-level failure, either a
//!   `DomainError` with a stable code or an infrastructure failure.
//! - `User`, `Team`, `PullRequest`: aggregates returned by services.
//! - `PullRequestService`, `TeamService`, `UserActivityService`: driving
//!   port implementations generic over their stores.

pub mod error;
pub mod identifier;
pub mod ports;
pub mod pull_request;
pub mod pull_request_service;
pub mod reviewer_selection;
pub mod store_deadline;
pub mod team;
pub mod team_service;
pub mod trace_id;
pub mod user;
pub mod user_activity_service;

pub use self::error::{DomainError, DomainErrorCode, Error, InfrastructureKind};
pub use self::identifier::{IdentifierValidationError, PullRequestId, TeamName, UserId};
pub use self::pull_request::{PullRequest, PullRequestDraft, PullRequestStatus};
pub use self::pull_request_service::{DEFAULT_MAX_REVIEWERS, PullRequestService};
pub use self::reviewer_selection::{
    RandomReviewerSelector, ReviewerSelector, SeededReviewerSelector, select_reviewers,
};
pub use self::store_deadline::{DEFAULT_STORE_TIMEOUT, StoreDeadline};
pub use self::team::{Team, TeamMember};
pub use self::team_service::TeamService;
pub use self::trace_id::TraceId;
pub use self::user::{User, UserPatch};
pub use self::user_activity_service::UserActivityService;
