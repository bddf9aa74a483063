//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::resolver::normalize;
use crate::source::SourceError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/lookup", get(lookup))
        .route("/status", get(status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Resolve a phone number to a location.
async fn lookup(
    State(state): State<AppState>,
    Query(req): Query<LookupRequest>,
) -> Result<Json<LookupResponse>, AppError> {
    let phone = req.phone.ok_or_else(|| AppError::BadRequest {
        message: "missing query parameter: phone".to_string(),
    })?;

    let resolution = state.directory.resolve(&phone).await?;

    let response = match resolution {
        Some(r) => LookupResponse {
            phone,
            digits: r.digits,
            prefix: Some(r.prefix),
            location: Some(r.location),
        },
        None => LookupResponse {
            digits: normalize(&phone),
            phone,
            prefix: None,
            location: None,
        },
    };

    Ok(Json(response))
}

/// Report what table is loaded.
async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse::from_status(state.directory.status().await))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Unavailable { message: String },
}

impl From<SourceError> for AppError {
    fn from(e: SourceError) -> Self {
        AppError::Unavailable {
            message: format!("prefix table unavailable: {e}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
        };

        warn!(%status, "{message}");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
