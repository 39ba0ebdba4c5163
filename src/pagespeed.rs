//! PageSpeed Insights client.
//!
//! Fetches a Lighthouse report for a URL and reduces it to the four
//! category scores the roaster cares about.

use crate::models::{Category, CategoryScores};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while fetching category scores.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Analysis request failed: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Analysis request timed out after {0}s")]
    Timeout(u64),

    #[error("Analysis API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse analysis response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Something that can score a URL.
#[async_trait]
pub trait ScoreSource: Send + Sync {
    async fn fetch_scores(&self, url: &str) -> Result<CategoryScores, FetchError>;
}

/// Settings for the PageSpeed client.
#[derive(Debug, Clone)]
pub struct PageSpeedConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub timeout_seconds: u64,
}

impl Default for PageSpeedConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.googleapis.com/pagespeedonline/v5/runPagespeed".to_string(),
            api_key: None,
            timeout_seconds: 60,
        }
    }
}

/// Response body of `runPagespeed`, reduced to what we read.
///
/// Every level is optional upstream, so every level defaults.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSpeedResponse {
    #[serde(default)]
    pub lighthouse_result: Option<LighthouseResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LighthouseResult {
    #[serde(default)]
    pub categories: Option<LighthouseCategories>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LighthouseCategories {
    #[serde(default)]
    pub performance: Option<CategoryResult>,
    #[serde(default)]
    pub accessibility: Option<CategoryResult>,
    #[serde(default)]
    pub seo: Option<CategoryResult>,
    #[serde(default, rename = "best-practices")]
    pub best_practices: Option<CategoryResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CategoryResult {
    /// Lighthouse score in `0.0..=1.0`; `null` when the audit errored.
    #[serde(default)]
    pub score: Option<f64>,
}

impl PageSpeedResponse {
    /// Convert the report into 0-100 category scores. Missing categories score 0.
    pub fn category_scores(&self) -> CategoryScores {
        let categories = self
            .lighthouse_result
            .as_ref()
            .and_then(|r| r.categories.as_ref());

        let score = |pick: fn(&LighthouseCategories) -> Option<&CategoryResult>| {
            categories
                .and_then(pick)
                .and_then(|c| c.score)
                .map(to_percent)
                .unwrap_or(0)
        };

        CategoryScores {
            performance: score(|c| c.performance.as_ref()),
            accessibility: score(|c| c.accessibility.as_ref()),
            seo: score(|c| c.seo.as_ref()),
            best_practices: score(|c| c.best_practices.as_ref()),
        }
    }
}

/// Scale a 0-1 Lighthouse score to a rounded 0-100 integer.
fn to_percent(score: f64) -> u8 {
    if !score.is_finite() {
        return 0;
    }
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

/// HTTP client for the PageSpeed Insights v5 API.
#[derive(Debug, Clone)]
pub struct PageSpeedClient {
    config: PageSpeedConfig,
    http_client: reqwest::Client,
}

impl PageSpeedClient {
    pub fn new(config: PageSpeedConfig) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn query(&self, url: &str) -> Vec<(&'static str, String)> {
        let mut query = vec![("url", url.to_string())];
        for category in [
            Category::Performance,
            Category::Accessibility,
            Category::BestPractices,
            Category::Seo,
        ] {
            query.push(("category", category.api_name().to_string()));
        }
        if let Some(ref key) = self.config.api_key {
            query.push(("key", key.clone()));
        }
        query
    }
}

#[async_trait]
impl ScoreSource for PageSpeedClient {
    async fn fetch_scores(&self, url: &str) -> Result<CategoryScores, FetchError> {
        info!("Requesting PageSpeed analysis for {}", url);

        let response = self
            .http_client
            .get(&self.config.endpoint)
            .query(&self.query(url))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    FetchError::Timeout(self.config.timeout_seconds)
                } else {
                    FetchError::Request(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api { status, body });
        }

        let report: PageSpeedResponse = response.json().await.map_err(FetchError::Decode)?;
        let scores = report.category_scores();
        debug!("PageSpeed scores for {}: {:?}", url, scores);

        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::ServerGuard) -> PageSpeedClient {
        PageSpeedClient::new(PageSpeedConfig {
            endpoint: format!("{}/runPagespeed", server.url()),
            api_key: None,
            timeout_seconds: 5,
        })
        .unwrap()
    }

    #[test]
    fn test_full_report_scores() {
        let json = r#"{
            "lighthouseResult": {
                "categories": {
                    "performance": {"score": 0.9},
                    "accessibility": {"score": 0.8},
                    "seo": {"score": 0.7},
                    "best-practices": {"score": 0.6}
                }
            }
        }"#;
        let report: PageSpeedResponse = serde_json::from_str(json).unwrap();
        let scores = report.category_scores();
        assert_eq!(scores.performance, 90);
        assert_eq!(scores.accessibility, 80);
        assert_eq!(scores.seo, 70);
        assert_eq!(scores.best_practices, 60);
    }

    #[test]
    fn test_missing_parts_default_to_zero() {
        let report: PageSpeedResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(report.category_scores(), CategoryScores::default());

        let json = r#"{"lighthouseResult": {"categories": {"seo": {"score": null}, "performance": {"score": 0.456}}}}"#;
        let report: PageSpeedResponse = serde_json::from_str(json).unwrap();
        let scores = report.category_scores();
        assert_eq!(scores.performance, 46);
        assert_eq!(scores.seo, 0);
        assert_eq!(scores.accessibility, 0);
        assert_eq!(scores.best_practices, 0);
    }

    #[test]
    fn test_to_percent_clamps() {
        assert_eq!(to_percent(1.2), 100);
        assert_eq!(to_percent(-0.5), 0);
        assert_eq!(to_percent(0.005), 1);
        assert_eq!(to_percent(f64::NAN), 0);
    }

    #[tokio::test]
    async fn test_fetch_scores_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/runPagespeed")
            // repeated `category` keys, so match the raw query string
            .match_query(Matcher::Regex(
                "^url=https%3A%2F%2Fexample.com&category=performance&category=accessibility\
                 &category=best-practices&category=seo$"
                    .into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"lighthouseResult":{"categories":{"performance":{"score":0.35},"accessibility":{"score":1}}}}"#,
            )
            .create_async()
            .await;

        let scores = client_for(&server)
            .fetch_scores("https://example.com")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(scores.performance, 35);
        assert_eq!(scores.accessibility, 100);
        assert_eq!(scores.seo, 0);
    }

    #[tokio::test]
    async fn test_fetch_scores_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/runPagespeed")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("Lighthouse returned error: FAILED_DOCUMENT_REQUEST")
            .create_async()
            .await;

        let err = client_for(&server)
            .fetch_scores("https://unreachable.invalid")
            .await
            .unwrap_err();

        match err {
            FetchError::Api { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("FAILED_DOCUMENT_REQUEST"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_scores_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/runPagespeed")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let err = client_for(&server)
            .fetch_scores("https://example.com")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
    }

    #[test]
    fn test_query_includes_key_when_configured() {
        let client = PageSpeedClient::new(PageSpeedConfig {
            api_key: Some("secret".to_string()),
            ..PageSpeedConfig::default()
        })
        .unwrap();

        let query = client.query("https://example.com");
        assert_eq!(query[0], ("url", "https://example.com".to_string()));
        assert_eq!(query.iter().filter(|(k, _)| *k == "category").count(), 4);
        assert!(query.contains(&("key", "secret".to_string())));
    }
}
