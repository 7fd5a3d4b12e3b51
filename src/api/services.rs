use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::{info, warn};

use super::{
    cors::{handle_cors, wrap_cors_header},
    error::ApiError,
    state::AppState,
};

/// Liveness endpoint (GET /)
pub async fn root() -> &'static str {
    "Ok"
}

/// Next arrivals for a stop (GET /stops/{stop_id}/next_arrivals)
///
/// Fetches a fresh upstream token, then the stop's predictions, and returns
/// the normalized `{ "results": [...] }` document. Upstream failures become
/// `502` JSON errors. Both outcomes carry `Access-Control-Allow-Origin`.
#[tracing::instrument(skip(state))]
pub async fn next_arrivals(
    State(state): State<AppState>,
    Path(stop_id): Path<String>,
) -> Response {
    let response = match state.gateway.next_arrivals(&stop_id).await {
        Ok(arrivals) => {
            state.metrics.request_served(arrivals.results.len());
            info!(records = arrivals.results.len(), "Arrivals served");
            (StatusCode::OK, Json(arrivals)).into_response()
        }
        Err(err) => {
            state.metrics.upstream_failed();
            warn!(error = %err, "Arrivals unavailable");
            ApiError::from(err).into_response()
        }
    };

    wrap_cors_header(response, &state.cors)
}

/// CORS preflight (OPTIONS /stops/{stop_id}/next_arrivals)
pub async fn next_arrivals_preflight(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Response {
    handle_cors(&state.cors, &headers)
}

/// Fallback for unmatched routes and methods
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "404, not found!")
}
