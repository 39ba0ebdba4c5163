//! HTTP handlers.

use super::error::ApiError;
use super::AppState;
use crate::models::{RoastRequest, RoastResult};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Response for the health check endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    /// Whether roasts come from a model or only from the canned pools.
    pub generator: bool,
}

/// POST /api/roast - Roast the site in the request body.
///
/// The body is parsed by hand so a missing `url` yields 400 while a
/// body that isn't JSON at all yields the generic 500. A body that can't
/// be buffered (over the size limit) keeps its status but gets the same
/// JSON error shape.
pub async fn roast_site(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<RoastResult>, ApiError> {
    let request: RoastRequest = serde_json::from_slice(&body?)?;

    // Blank means missing; anything else goes upstream as submitted.
    let url = match request.url.as_deref() {
        Some(url) if !url.trim().is_empty() => url,
        _ => return Err(ApiError::MissingUrl),
    };

    let result = state.service.roast(url).await?;
    Ok(Json(result))
}

/// GET /api/health - Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
        generator: state.service.selector().has_generator(),
    })
}

/// All `/api` routes.
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new().nest(
        "/api",
        Router::new()
            .route("/roast", post(roast_site))
            .route("/health", get(health_check))
            .with_state(state),
    )
}
