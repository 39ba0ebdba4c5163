//! RoastMySite - brutally honest website reviews
//!
//! Scores a site with Google PageSpeed Insights, folds the four
//! Lighthouse categories into one number and roasts the result, either
//! over HTTP (`POST /api/roast`) or once from the command line.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (bad arguments, config, analysis failure, etc.)

mod analysis;
mod cli;
mod config;
mod models;
mod pagespeed;
mod report;
mod roast;
mod server;
mod service;

use anyhow::{Context, Result};
use cli::{Args, OutputFormat};
use config::Config;
use pagespeed::PageSpeedClient;
use roast::{ChatRoastGenerator, RoastGenerator, RoastSelector};
use service::RoastService;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Initialize logging
    init_logging(&args);

    info!("RoastMySite v{}", env!("CARGO_PKG_VERSION"));
    debug!("One-shot target: {:?}", args.roast);

    if let Err(e) = run(args).await {
        error!("{:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .roastmysite.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(config::DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            config::DEFAULT_CONFIG_FILE
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", config::DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", config::DEFAULT_CONFIG_FILE);
    println!("   Set OPENAI_API_KEY (or [generation] api_key) to enable model roasts.");
    Ok(())
}

/// Initialize logging based on verbosity settings. `RUST_LOG` wins when set.
fn init_logging(args: &Args) {
    let level = args.log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{},hyper=warn,reqwest=warn", level)));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Build the pipeline from configuration, then serve or roast once.
async fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate()?;

    let service = Arc::new(build_service(&config)?);

    match args.roast {
        Some(ref url) => roast_once(&args, &service, url).await,
        None => server::serve(&config.server.bind, service).await,
    }
}

/// Wire the PageSpeed client, optional generator and selector together.
fn build_service(config: &Config) -> Result<RoastService> {
    let scores = PageSpeedClient::new(config.pagespeed_config())
        .context("Failed to create PageSpeed client")?;

    let generator: Option<Arc<dyn RoastGenerator>> = match config.chat_config() {
        Some(chat) => {
            let chat_client =
                ChatRoastGenerator::new(chat).context("Failed to create chat client")?;
            info!("Roasts generated by {}", chat_client.model());
            let generator: Arc<dyn RoastGenerator> = Arc::new(chat_client);
            Some(generator)
        }
        None => {
            info!("No API key configured, using canned roasts");
            None
        }
    };

    let selector = RoastSelector::new(generator, config.roast.seed);
    Ok(RoastService::new(Arc::new(scores), selector))
}

/// Handle --roast: run the pipeline once and print or save the report.
async fn roast_once(args: &Args, service: &RoastService, input: &str) -> Result<()> {
    let url = cli::normalize_url(input).map_err(anyhow::Error::msg)?;

    if !args.quiet {
        eprintln!("🔥 Roasting {} (PageSpeed runs can take a minute)...", url);
    }

    let result = service
        .roast(&url)
        .await
        .context("Failed to roast this website. It might be protected or unreachable")?;

    let output = match args.format {
        OutputFormat::Text => report::generate_text_report(&result),
        OutputFormat::Markdown => report::generate_markdown_report(&result),
        OutputFormat::Json => report::generate_json_report(&result)?,
    };

    match args.output {
        Some(ref path) => {
            report::write_report(&output, path)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!("Report saved to {}", path.display());
        }
        None => println!("{}", output),
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", config::DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
