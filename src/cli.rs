//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation and default values.

use clap::Parser;
use std::path::PathBuf;

/// RoastMySite - brutally honest website reviews
///
/// Serves the roast API, or roasts a single site from the terminal.
/// Scores come from Google PageSpeed Insights; roasts come from an
/// OpenAI-compatible model when OPENAI_API_KEY is set, canned lines otherwise.
///
/// Examples:
///   roastmysite
///   roastmysite --bind 0.0.0.0:8080
///   roastmysite --roast example.com
///   roastmysite --roast https://example.com --format json --output roast.json
///   roastmysite --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Roast a single URL and print the report instead of serving
    #[arg(short, long, value_name = "URL")]
    pub roast: Option<String>,

    /// Address for the HTTP server
    #[arg(short, long, value_name = "ADDR", env = "ROASTMYSITE_BIND")]
    pub bind: Option<String>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .roastmysite.toml in the current directory
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// PageSpeed Insights endpoint
    #[arg(long, value_name = "URL", env = "PAGESPEED_URL")]
    pub pagespeed_url: Option<String>,

    /// Google API key for PageSpeed Insights
    #[arg(long, value_name = "KEY", env = "PAGESPEED_API_KEY", hide_env_values = true)]
    pub pagespeed_api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, value_name = "URL", env = "OPENAI_BASE_URL")]
    pub openai_base_url: Option<String>,

    /// API key enabling model-generated roasts
    #[arg(long, value_name = "KEY", env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Chat model used for roasts
    #[arg(short, long, env = "ROASTMYSITE_MODEL")]
    pub model: Option<String>,

    /// Temperature for roast generation (0.0 - 2.0)
    #[arg(long)]
    pub temperature: Option<f32>,

    /// Timeout in seconds for each outbound request
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Seed for canned roast selection (reproducible output)
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Output format for --roast (text, markdown, json)
    #[arg(long, default_value = "text", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Write the --roast report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (minimal output)
    #[arg(short, long)]
    pub quiet: bool,

    /// Generate a default .roastmysite.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

/// Output format for one-shot reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// Markdown format
    Markdown,
    /// JSON format, same shape as the API response
    Json,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        // Skip validation for --init-config
        if self.init_config {
            return Ok(());
        }

        if let Some(ref url) = self.roast {
            normalize_url(url)?;
        }

        if self.output.is_some() && self.roast.is_none() {
            return Err("--output requires --roast".to_string());
        }

        // Check for conflicting options
        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err("Timeout must be at least 1 second".to_string());
            }
        }

        Ok(())
    }

    /// Returns the log level based on verbosity settings.
    pub fn log_level(&self) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

/// Normalize a user-typed site address: trim, default to `https://`,
/// and reject anything that doesn't parse as an http(s) URL with a host.
pub fn normalize_url(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("URL is required".to_string());
    }

    let candidate = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    match url::Url::parse(&candidate) {
        Ok(parsed) if parsed.host_str().is_some_and(|h| !h.is_empty()) => Ok(candidate),
        _ => Err(format!("Please enter a valid URL: {}", trimmed)),
    }
}

#[cfg(test)]
pub(crate) fn test_args() -> Args {
    Args {
        roast: None,
        bind: None,
        config: None,
        pagespeed_url: None,
        pagespeed_api_key: None,
        openai_base_url: None,
        openai_api_key: None,
        model: None,
        temperature: None,
        timeout: None,
        seed: None,
        format: OutputFormat::Text,
        output: None,
        verbose: false,
        quiet: false,
        init_config: false,
    }
}
