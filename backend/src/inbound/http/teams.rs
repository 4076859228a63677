//! Team HTTP handlers.
//!
//! ```text
//! POST /team/add {"team_name":"backend","members":[...]}
//! GET /team/get?team_name=backend
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Team, TeamName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{ApiError, ErrorEnvelope};
use crate::inbound::http::schemas::TeamBody;
use crate::inbound::http::state::HttpState;

/// Response body for `POST /team/add`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateTeamResponse {
    pub team: TeamBody,
}

/// Query parameters for `GET /team/get`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TeamNameQuery {
    /// Team to fetch.
    pub team_name: Option<String>,
}

/// Create a team or merge members into an existing one.
#[utoipa::path(
    post,
    path = "/team/add",
    request_body = TeamBody,
    responses(
        (status = 201, description = "Team created or updated", body = CreateTeamResponse),
        (status = 400, description = "Invalid request", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["teams"],
    operation_id = "createTeam"
)]
#[post("/team/add")]
pub async fn create_team(
    state: web::Data<HttpState>,
    payload: web::Json<TeamBody>,
) -> ApiResult<HttpResponse> {
    let team = Team::try_from(payload.into_inner())?;
    let team = state.teams.create_team(team).await?;
    Ok(HttpResponse::Created().json(CreateTeamResponse { team: team.into() }))
}

/// Fetch a team with its current members.
#[utoipa::path(
    get,
    path = "/team/get",
    params(TeamNameQuery),
    responses(
        (status = 200, description = "Team", body = TeamBody),
        (status = 400, description = "Invalid request", body = ErrorEnvelope),
        (status = 404, description = "Team not found", body = ErrorEnvelope)
    ),
    tags = ["teams"],
    operation_id = "getTeam"
)]
#[get("/team/get")]
pub async fn get_team(
    state: web::Data<HttpState>,
    query: web::Query<TeamNameQuery>,
) -> ApiResult<web::Json<TeamBody>> {
    let raw = query
        .into_inner()
        .team_name
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::invalid_request("team_name query parameter is required"))?;
    let team_name = TeamName::new(raw)?;
    let team = state.teams.get_team(&team_name).await?;
    Ok(web::Json(team.into()))
}

#[cfg(test)]
#[path = "teams_tests.rs"]
mod tests;
