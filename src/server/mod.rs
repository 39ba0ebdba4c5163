//! Axum HTTP surface.
//!
//! Sets up the API routes, permissive CORS and request tracing.

pub mod error;
pub mod routes;

pub use routes::api_routes;

use crate::service::RoastService;
use anyhow::{Context, Result};
use axum::Router;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub service: Arc<RoastService>,
    started: Instant,
}

impl AppState {
    pub fn new(service: Arc<RoastService>) -> Self {
        Self {
            service,
            started: Instant::now(),
        }
    }

    pub fn uptime_secs(&self) -> u64 {
        self.started.elapsed().as_secs()
    }
}

/// Create the Axum application with all routes and middleware.
pub fn create_app(service: Arc<RoastService>) -> Router {
    let state = Arc::new(AppState::new(service));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api_routes(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, service: Arc<RoastService>) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_app(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryScores, RoastResult};
    use crate::roast::fallback::Bucket;
    use crate::roast::RoastSelector;
    use crate::service::testing::{FakeGenerator, FakeScores};
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    const METRICS: CategoryScores = CategoryScores {
        performance: 90,
        accessibility: 80,
        seo: 70,
        best_practices: 60,
    };

    struct Harness {
        app: Router,
        scores: Arc<FakeScores>,
        generator: Arc<FakeGenerator>,
    }

    fn harness(scores: FakeScores, generator: FakeGenerator) -> Harness {
        let scores = Arc::new(scores);
        let generator = Arc::new(generator);
        let service = RoastService::new(
            scores.clone(),
            RoastSelector::new(Some(generator.clone()), Some(11)),
        );
        Harness {
            app: create_app(Arc::new(service)),
            scores,
            generator,
        }
    }

    /// Helper to POST a raw body to the app.
    async fn post(app: Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);

        (status, json)
    }

    // ========================================================================
    // Roast Endpoint Tests
    // ========================================================================

    #[tokio::test]
    async fn test_roast_success() {
        let h = harness(FakeScores::ok(METRICS), FakeGenerator::replying("Not bad, for 2009."));
        let (status, json) = post(h.app, "/api/roast", r#"{"url":"https://example.com"}"#).await;

        assert_eq!(status, StatusCode::OK);
        let result: RoastResult = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(result.url, "https://example.com");
        assert_eq!(result.score, 78);
        assert_eq!(result.roast, "Not bad, for 2009.");
        assert_eq!(json["metrics"]["bestPractices"], 60);
        assert!(json["burns"].as_array().unwrap().is_empty());
        assert_eq!(json["compliments"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_url_echoed_as_submitted() {
        let h = harness(FakeScores::ok(METRICS), FakeGenerator::replying("Padding everywhere."));
        let (status, json) =
            post(h.app, "/api/roast", r#"{"url":"  https://example.com  "}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["url"], "  https://example.com  ");
        assert_eq!(h.scores.calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_url_is_400_without_downstream_calls() {
        for body in [r#"{}"#, r#"{"url":null}"#, r#"{"url":""}"#, r#"{"url":"   "}"#] {
            let h = harness(FakeScores::ok(METRICS), FakeGenerator::replying("unused"));
            let (status, json) = post(h.app, "/api/roast", body).await;

            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body}");
            assert_eq!(json, serde_json::json!({"error": "URL is required"}));
            assert_eq!(h.scores.calls(), 0);
            assert_eq!(h.generator.calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_analysis_failure_is_500_without_generation() {
        let h = harness(FakeScores::failing(), FakeGenerator::replying("unused"));
        let (status, json) = post(h.app, "/api/roast", r#"{"url":"https://down.example"}"#).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json, serde_json::json!({"error": "Failed to roast website."}));
        assert_eq!(h.scores.calls(), 1);
        assert_eq!(h.generator.calls(), 0);
    }

    #[tokio::test]
    async fn test_generation_failure_still_200_with_fallback() {
        let h = harness(FakeScores::ok(METRICS), FakeGenerator::failing());
        let (status, json) = post(h.app, "/api/roast", r#"{"url":"https://example.com"}"#).await;

        assert_eq!(status, StatusCode::OK);
        let roast = json["roast"].as_str().unwrap();
        assert!(!roast.is_empty());
        assert!(Bucket::for_score(78).pool().contains(&roast));
        assert_eq!(h.generator.calls(), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_is_500() {
        let h = harness(FakeScores::ok(METRICS), FakeGenerator::replying("unused"));
        let (status, json) = post(h.app, "/api/roast", "url=https://example.com").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "Failed to roast website.");
        assert_eq!(h.scores.calls(), 0);
    }

    #[tokio::test]
    async fn test_oversized_body_gets_json_error() {
        let h = harness(FakeScores::ok(METRICS), FakeGenerator::replying("unused"));
        let padding = "x".repeat(3 * 1024 * 1024);
        let body = format!(r#"{{"url":"https://example.com","pad":"{padding}"}}"#);
        let (status, json) = post(h.app, "/api/roast", &body).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(json, serde_json::json!({"error": "Request body too large"}));
        assert_eq!(h.scores.calls(), 0);
    }

    // ========================================================================
    // Health Endpoint Tests
    // ========================================================================

    #[tokio::test]
    async fn test_health_endpoint() {
        let h = harness(FakeScores::ok(METRICS), FakeGenerator::replying("unused"));
        let response = h
            .app
            .oneshot(Request::builder().uri("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["generator"], true);
        assert!(json["uptime_secs"].is_number());
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let h = harness(FakeScores::ok(METRICS), FakeGenerator::replying("unused"));
        let response = h
            .app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header("Origin", "http://example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let allow_origin = response.headers().get("access-control-allow-origin");
        assert_eq!(allow_origin.unwrap(), "*");
    }

    #[tokio::test]
    async fn test_404_for_unknown_route() {
        let h = harness(FakeScores::ok(METRICS), FakeGenerator::replying("unused"));
        let response = h
            .app
            .oneshot(Request::builder().uri("/api/nonexistent").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
