//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{StatusCode, Uri},
    response::IntoResponse,
    routing::get,
};
use tracing::{debug, warn};

use crate::dataset::StopId;

use super::dto::*;
use super::state::AppState;

/// Message returned when the lookup parameters are missing or not integers.
const INVALID_PARAMETERS: &str =
    "Invalid request parameters. Expected integer values for 'dep_sid' and 'arr_sid'.";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/direct", get(find_direct_route))
        .fallback(not_found)
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Find whether a direct route connects two stops.
async fn find_direct_route(
    State(state): State<AppState>,
    query: Result<Query<DirectRouteRequest>, QueryRejection>,
) -> Result<Json<DirectRouteResponse>, AppError> {
    let Query(req) = query.map_err(|rejection| {
        debug!(%rejection, "rejected direct route query");
        AppError::BadRequest {
            message: INVALID_PARAMETERS.to_string(),
        }
    })?;

    // Ids outside the stop id range are never served by any route
    let direct_bus_route = match (StopId::try_from(req.dep_sid), StopId::try_from(req.arr_sid)) {
        (Ok(departure), Ok(arrival)) => state.routes.is_direct_route_available(departure, arrival),
        _ => false,
    };

    Ok(Json(DirectRouteResponse {
        dep_sid: req.dep_sid,
        arr_sid: req.arr_sid,
        direct_bus_route,
    }))
}

/// Fallback for unknown paths.
async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound {
        message: format!("No route for {}", uri.path()),
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
        };

        warn!(%status, %message, "request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
