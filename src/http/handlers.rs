//! API endpoint handlers.
//!
//! Each handler: normalize query → one upstream call → JSON array.

use axum::{
    extract::{RawQuery, State},
    response::{IntoResponse, Response},
    Json,
};
use std::time::Instant;

use crate::http::params::{MatchesQuery, TeamsLookup, TeamsQuery};
use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::upstream::{Match, Team};

/// `GET /api/teams`
pub async fn teams(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Response {
    let start = Instant::now();
    let query = TeamsQuery::from_query(raw.as_deref());
    let response = fetch_teams(&state, &query).await.into_response();
    metrics::record_request("teams", response.status().as_u16(), start);
    response
}

async fn fetch_teams(state: &AppState, query: &TeamsQuery) -> Result<Json<Vec<Team>>, ApiError> {
    let teams = match query.normalize()? {
        TeamsLookup::ByIds { game, ids } => {
            tracing::debug!(game = %game, count = ids.len(), "Looking up teams by id");
            state.upstream.teams_by_ids(&game, &ids).await
        }
        TeamsLookup::Search { game, name, limit, page } => {
            tracing::debug!(game = %game, name = %name, limit, page, "Searching teams");
            state.upstream.search_teams(&game, &name, limit, page).await
        }
    }
    .map_err(ApiError::teams)?;

    Ok(Json(teams))
}

/// `GET /api/upcoming-matches`
pub async fn upcoming_matches(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Response {
    let start = Instant::now();
    let query = MatchesQuery::from_query(raw.as_deref());
    let response = fetch_upcoming_matches(&state, &query).await.into_response();
    metrics::record_request("upcoming_matches", response.status().as_u16(), start);
    response
}

async fn fetch_upcoming_matches(
    state: &AppState,
    query: &MatchesQuery,
) -> Result<Json<Vec<Match>>, ApiError> {
    let lookup = query.normalize()?;
    let matches = state
        .upstream
        .upcoming_matches(&lookup.game, &lookup.team_ids)
        .await
        .map_err(ApiError::matches)?;

    Ok(Json(matches))
}

/// `GET /healthz`. Liveness only; upstream is not contacted.
pub async fn healthz() -> &'static str {
    "ok"
}
