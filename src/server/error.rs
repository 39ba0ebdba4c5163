//! API error type and its JSON rendering.

use crate::pagespeed::FetchError;
use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Flat JSON error body: `{"error": "..."}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Errors a roast request can end in.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("URL is required")]
    MissingUrl,

    #[error("Unreadable request body: {0}")]
    UnreadableBody(#[from] BytesRejection),

    #[error("Malformed request body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("Analysis failed: {0}")]
    Analysis(#[from] FetchError),
}

/// Message for every server-side failure; upstream details stay in the logs.
pub const GENERIC_FAILURE: &str = "Failed to roast website.";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::MissingUrl => {
                tracing::warn!("Roast request without a URL");
                (StatusCode::BAD_REQUEST, "URL is required")
            }
            ApiError::UnreadableBody(e) => {
                tracing::warn!(error = %e, "Roast request body rejected");
                let status = e.status();
                let message = if status == StatusCode::PAYLOAD_TOO_LARGE {
                    "Request body too large"
                } else {
                    GENERIC_FAILURE
                };
                (status, message)
            }
            ApiError::MalformedBody(e) => {
                tracing::error!(error = %e, "Malformed roast request body");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE)
            }
            ApiError::Analysis(e) => {
                tracing::error!(error = %e, "Site analysis failed");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE)
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_is_bad_request() {
        let response = ApiError::MissingUrl.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_analysis_failure_is_internal_error() {
        let err = ApiError::from(FetchError::Api {
            status: 429,
            body: "quota".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_response_serialization() {
        let json = serde_json::to_string(&ErrorResponse::new("URL is required")).unwrap();
        assert_eq!(json, r#"{"error":"URL is required"}"#);
    }
}
