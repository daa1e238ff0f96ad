//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::error;

use crate::domain::GeoPoint;
use crate::geocode::GeocodeError;
use crate::reachability::{ComputeError, ComputeOutcome};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/reachability", post(compute_reachability))
        .route("/api/reachability/latest", get(latest_reachability))
        .route("/api/geocode", get(search_addresses))
        .route("/api/listings", get(list_listings))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Run a reachability computation over the current listings.
async fn compute_reachability(
    State(state): State<AppState>,
    Json(req): Json<ComputeRequest>,
) -> Result<Json<ComputeResponse>, AppError> {
    let start = req
        .start
        .map(|p| GeoPoint::new(p.lat, p.lng))
        .transpose()
        .map_err(|e| AppError::BadRequest {
            message: format!("Invalid start point: {e}"),
        })?;

    let listings = state.listings.snapshot().await;

    let outcome = state
        .reachability
        .compute(start, &listings, req.max_minutes)
        .await
        .map_err(AppError::from)?;

    match outcome {
        ComputeOutcome::Completed(result) => Ok(Json(ComputeResponse::from_result(&result))),
        ComputeOutcome::Superseded => Err(AppError::Superseded),
    }
}

/// The most recently completed computation.
async fn latest_reachability(
    State(state): State<AppState>,
) -> Result<Json<ComputeResponse>, AppError> {
    let result = state.reachability.latest().ok_or(AppError::NotFound {
        message: "no computation has completed yet".to_string(),
    })?;

    Ok(Json(ComputeResponse::from_result(&result)))
}

/// Search addresses by free text.
async fn search_addresses(
    State(state): State<AppState>,
    Query(req): Query<GeocodeQuery>,
) -> Result<Json<GeocodeResponse>, AppError> {
    let matches = state.geocoder.search(&req.q).await.map_err(AppError::from)?;

    let results = matches.iter().map(AddressResult::from_domain).collect();
    Ok(Json(GeocodeResponse { results }))
}

/// Every currently known listing.
async fn list_listings(State(state): State<AppState>) -> Json<ListingsResponse> {
    Json(ListingsResponse {
        listings: state.listings.snapshot().await,
    })
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    NoStopNearby { message: String },
    Superseded,
    Internal { message: String },
}

impl From<ComputeError> for AppError {
    fn from(e: ComputeError) -> Self {
        match e {
            ComputeError::NoStopNearby { .. } => AppError::NoStopNearby {
                message: e.to_string(),
            },
            ComputeError::Engine { .. } => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl From<GeocodeError> for AppError {
    fn from(e: GeocodeError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::NoStopNearby { message } => (StatusCode::UNPROCESSABLE_ENTITY, message),
            AppError::Superseded => (
                StatusCode::CONFLICT,
                "superseded by a newer request".to_string(),
            ),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        error!(status = %status, message = %message, "Request failed");

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
