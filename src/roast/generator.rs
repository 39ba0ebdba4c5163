//! LLM-backed roast generation over an OpenAI-compatible chat API.

use crate::models::CategoryScores;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors raised while generating a roast. Never surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("Cannot connect to {0}")]
    Connect(String),

    #[error("Failed to send request: {0}")]
    Request(#[source] reqwest::Error),

    #[error("Chat API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Failed to parse chat response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Chat response contained no roast")]
    EmptyResponse,
}

/// Everything a generator needs to write one roast.
#[derive(Debug, Clone, Copy)]
pub struct RoastContext<'a> {
    pub url: &'a str,
    pub metrics: &'a CategoryScores,
    pub score: u8,
}

/// Something that can write a roast.
#[async_trait]
pub trait RoastGenerator: Send + Sync {
    async fn generate(&self, ctx: RoastContext<'_>) -> Result<String, GenerateError>;
}

/// Settings for the chat completion client.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub timeout_seconds: u64,
}

impl ChatConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: "https://api.openai.com".to_string(),
            api_key: api_key.into(),
            model: "gpt-3.5-turbo".to_string(),
            max_tokens: 150,
            temperature: 0.9,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Build the user prompt for a roast.
pub fn build_prompt(ctx: &RoastContext<'_>) -> String {
    let m = ctx.metrics;
    format!(
        "You are a brutally honest website critic. Roast this website in 2-3 sentences.\n\
         Website: {}\n\
         Performance: {}/100, Accessibility: {}/100\n\
         SEO: {}/100, Best Practices: {}/100\n\
         Overall: {}/100. Be funny and brutally honest. No emojis.",
        ctx.url, m.performance, m.accessibility, m.seo, m.best_practices, ctx.score
    )
}

/// Chat completion client.
#[derive(Debug, Clone)]
pub struct ChatRoastGenerator {
    config: ChatConfig,
    http_client: reqwest::Client,
}

impl ChatRoastGenerator {
    pub fn new(config: ChatConfig) -> Result<Self, GenerateError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(GenerateError::Client)?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl RoastGenerator for ChatRoastGenerator {
    async fn generate(&self, ctx: RoastContext<'_>) -> Result<String, GenerateError> {
        let prompt = build_prompt(&ctx);
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Requesting roast from {} for {}", self.config.model, ctx.url);

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerateError::Timeout(self.config.timeout_seconds)
                } else if e.is_connect() {
                    GenerateError::Connect(self.config.base_url.clone())
                } else {
                    GenerateError::Request(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Api { status, body });
        }

        let chat: ChatResponse = response.json().await.map_err(GenerateError::Decode)?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(GenerateError::EmptyResponse)
    }
}
