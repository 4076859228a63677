//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use mockable::DefaultClock;
use tracing::info;

use review_service::Trace;
#[cfg(debug_assertions)]
use review_service::doc::ApiDoc;
use review_service::domain::{PullRequestService, TeamService, UserActivityService};
use review_service::inbound::http::configure;
use review_service::inbound::http::health::{HealthState, live, ready};
use review_service::inbound::http::state::HttpState;
use review_service::outbound::memory::{
    InMemoryPullRequestRepository, InMemoryTeamRepository, InMemoryUserRepository,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Wire the services over fresh in-memory stores.
fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let users = Arc::new(InMemoryUserRepository::new());
    let teams = Arc::new(InMemoryTeamRepository::new());
    let pull_requests = Arc::new(InMemoryPullRequestRepository::new());

    let lifecycle =
        PullRequestService::new(Arc::clone(&users), pull_requests, Arc::new(DefaultClock))
            .with_max_reviewers(config.max_reviewers)
            .with_store_deadline(config.store_deadline);
    let membership =
        TeamService::new(teams, Arc::clone(&users)).with_store_deadline(config.store_deadline);
    let activity = UserActivityService::new(users).with_store_deadline(config.store_deadline);

    web::Data::new(HttpState::new(
        Arc::new(lifecycle),
        Arc::new(membership),
        Arc::new(activity),
    ))
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = build_http_state(&config);

    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(config.bind_addr())?
        .run();

    info!(
        bind_addr = %config.bind_addr(),
        max_reviewers = config.max_reviewers,
        store_timeout_ms = u64::try_from(config.store_deadline.limit().as_millis()).unwrap_or(u64::MAX),
        "review service listening"
    );
    health_state.mark_ready();
    Ok(server)
}
