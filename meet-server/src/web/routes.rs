//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, instrument};

use crate::domain::{Connection, Iata};
use crate::index::IndexError;
use crate::ranking::{RankRequest, Ranker};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/airports", get(list_airports).post(register_airport))
        .route("/api/connections", post(add_connection))
        .route("/api/destinations", post(rank_destinations))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List registered airports in registration order.
async fn list_airports(State(state): State<AppState>) -> Json<AirportListResponse> {
    let index = state.index.read().await;
    let airports = index
        .registry()
        .codes()
        .iter()
        .map(|c| c.as_str().to_string())
        .collect();
    Json(AirportListResponse { airports })
}

/// Register a single airport.
async fn register_airport(
    State(state): State<AppState>,
    Json(req): Json<RegisterAirportRequest>,
) -> Result<Json<RegisterAirportResponse>, AppError> {
    let code = Iata::parse_normalized(&req.code).map_err(|_| AppError::BadRequest {
        message: format!("Invalid airport code: {}", req.code),
    })?;

    let created = state.index.write().await.register_airport(code);
    info!(code = %code, created, "Airport registered");

    Ok(Json(RegisterAirportResponse {
        code: code.as_str().to_string(),
        created,
    }))
}

/// Record one connection in the index.
async fn add_connection(
    State(state): State<AppState>,
    Json(req): Json<AddConnectionRequest>,
) -> Result<StatusCode, AppError> {
    let origin = Iata::parse_normalized(&req.origin).map_err(|_| AppError::BadRequest {
        message: format!("Invalid origin code: {}", req.origin),
    })?;
    let destination =
        Iata::parse_normalized(&req.destination).map_err(|_| AppError::BadRequest {
            message: format!("Invalid destination code: {}", req.destination),
        })?;

    let connection = Connection {
        origin,
        destination,
        departure: req.departure,
        stops: req.stops,
        arrives_next_day: req.arrives_next_day,
    };

    state
        .index
        .write()
        .await
        .set_connection(&connection)
        .map_err(AppError::from)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Rank destinations for a meeting window.
#[instrument(skip(state, req), fields(origins = req.origins.len()))]
async fn rank_destinations(
    State(state): State<AppState>,
    Json(req): Json<RankDestinationsRequest>,
) -> Result<Json<RankDestinationsResponse>, AppError> {
    let mut origins = Vec::with_capacity(req.origins.len());
    for entry in &req.origins {
        let code = Iata::parse_normalized(&entry.code).map_err(|_| AppError::BadRequest {
            message: format!("Invalid origin code: {}", entry.code),
        })?;
        origins.push((code, entry.travelers));
    }

    let request = RankRequest::new(
        origins,
        req.meeting_start,
        req.meeting_end,
        req.max_outbound_shoulder,
        req.max_inbound_shoulder,
        req.take,
    );

    let index = state.index.read().await;
    let ranked = Ranker::new(&index).rank(&request).map_err(AppError::from)?;

    info!(destinations = ranked.len(), "Ranking complete");

    let destinations = ranked
        .iter()
        .map(DestinationResult::from_destination)
        .collect();
    Ok(Json(RankDestinationsResponse { destinations }))
}

/// Application error type.
///
/// Every failure on this surface is bad client data; the core has no
/// server-fault path.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
}

impl From<IndexError> for AppError {
    fn from(e: IndexError) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let AppError::BadRequest { message } = self;
        let status = StatusCode::BAD_REQUEST;

        tracing::warn!(%status, %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
