//! HTTP inbound adapter exposing REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod pull_requests;
pub mod schemas;
pub mod state;
pub mod teams;
#[cfg(test)]
pub mod test_utils;
pub mod users;

pub use error::ApiResult;

/// Register extractor settings and every review endpoint.
///
/// Handlers expect [`state::HttpState`] in app data; health probes are
/// registered separately because they carry their own state.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(error::json_config())
        .app_data(error::query_config())
        .service(teams::create_team)
        .service(teams::get_team)
        .service(users::set_is_active)
        .service(users::get_reviews)
        .service(pull_requests::create_pull_request)
        .service(pull_requests::merge_pull_request)
        .service(pull_requests::reassign_reviewer);
}
