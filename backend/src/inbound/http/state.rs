//! Shared HTTP adapter state.
//!
//! Handlers receive this state through `actix_web::web::Data` and depend only
//! on driving ports, so they stay testable without real stores.

use std::sync::Arc;

use crate::domain::ports::{PullRequestLifecycle, TeamMembership, UserActivity};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub pull_requests: Arc<dyn PullRequestLifecycle>,
    pub teams: Arc<dyn TeamMembership>,
    pub users: Arc<dyn UserActivity>,
}

impl HttpState {
    /// Bundle the driving ports used by the handlers.
    pub fn new(
        pull_requests: Arc<dyn PullRequestLifecycle>,
        teams: Arc<dyn TeamMembership>,
        users: Arc<dyn UserActivity>,
    ) -> Self {
        Self {
            pull_requests,
            teams,
            users,
        }
    }
}
