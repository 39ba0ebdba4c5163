//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.roastmysite.toml` files.

use crate::pagespeed::PageSpeedConfig;
use crate::roast::ChatConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = ".roastmysite.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// PageSpeed analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Roast generation (chat model) settings.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Fallback roast settings.
    #[serde(default)]
    pub roast: RoastConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to listen on.
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

/// PageSpeed Insights settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// `runPagespeed` endpoint.
    #[serde(default = "default_pagespeed_endpoint")]
    pub endpoint: String,

    /// Optional Google API key (raises the anonymous quota).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Request timeout in seconds.
    #[serde(default = "default_analysis_timeout")]
    pub timeout_seconds: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            endpoint: default_pagespeed_endpoint(),
            api_key: None,
            timeout_seconds: default_analysis_timeout(),
        }
    }
}

fn default_pagespeed_endpoint() -> String {
    "https://www.googleapis.com/pagespeedonline/v5/runPagespeed".to_string()
}

fn default_analysis_timeout() -> u64 {
    60 // Lighthouse runs routinely take 20-40s
}

/// Chat model settings. Generation is enabled only when `api_key` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Base URL of an OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key; absent means canned roasts only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model name.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens in response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Temperature for generation.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Request timeout in seconds.
    #[serde(default = "default_generation_timeout")]
    pub timeout_seconds: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_seconds: default_generation_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    150
}

fn default_temperature() -> f32 {
    0.9
}

fn default_generation_timeout() -> u64 {
    30
}

/// Fallback roast settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoastConfig {
    /// Seed for the canned-roast picker. Unset means a fresh random seed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_optional(Path::new(DEFAULT_CONFIG_FILE))
    }

    fn load_optional(path: &Path) -> Result<Option<Self>> {
        if path.exists() {
            Ok(Some(Self::load(path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref bind) = args.bind {
            self.server.bind = bind.clone();
        }

        if let Some(ref endpoint) = args.pagespeed_url {
            self.analysis.endpoint = endpoint.clone();
        }
        if args.pagespeed_api_key.is_some() {
            self.analysis.api_key = args.pagespeed_api_key.clone();
        }

        if let Some(ref base_url) = args.openai_base_url {
            self.generation.base_url = base_url.clone();
        }
        if args.openai_api_key.is_some() {
            self.generation.api_key = args.openai_api_key.clone();
        }
        if let Some(ref model) = args.model {
            self.generation.model = model.clone();
        }
        if let Some(temperature) = args.temperature {
            self.generation.temperature = temperature;
        }

        // Timeout - applies to both outbound calls when given
        if let Some(timeout) = args.timeout {
            self.analysis.timeout_seconds = timeout;
            self.generation.timeout_seconds = timeout;
        }

        if args.seed.is_some() {
            self.roast.seed = args.seed;
        }

        // Empty keys from the environment mean "not configured"
        if self.generation.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            self.generation.api_key = None;
        }
        if self.analysis.api_key.as_deref().is_some_and(|k| k.trim().is_empty()) {
            self.analysis.api_key = None;
        }
    }

    /// Validate values that serde alone can't.
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("PageSpeed endpoint", &self.analysis.endpoint),
            ("Generation base URL", &self.generation.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with 'http://' or 'https://'", name);
            }
        }

        if !(0.0..=2.0).contains(&self.generation.temperature) {
            anyhow::bail!("Temperature must be between 0.0 and 2.0");
        }

        if self.analysis.timeout_seconds == 0 || self.generation.timeout_seconds == 0 {
            anyhow::bail!("Timeout must be at least 1 second");
        }

        if self.generation.max_tokens == 0 {
            anyhow::bail!("Max tokens must be at least 1");
        }

        Ok(())
    }

    /// PageSpeed client settings.
    pub fn pagespeed_config(&self) -> PageSpeedConfig {
        PageSpeedConfig {
            endpoint: self.analysis.endpoint.clone(),
            api_key: self.analysis.api_key.clone(),
            timeout_seconds: self.analysis.timeout_seconds,
        }
    }

    /// Chat client settings, or `None` when no API key is configured.
    pub fn chat_config(&self) -> Option<ChatConfig> {
        let api_key = self.generation.api_key.as_ref()?;

        let mut chat = ChatConfig::new(api_key.clone());
        chat.base_url = self.generation.base_url.clone();
        chat.model = self.generation.model.clone();
        chat.max_tokens = self.generation.max_tokens;
        chat.temperature = self.generation.temperature;
        chat.timeout_seconds = self.generation.timeout_seconds;
        Some(chat)
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
