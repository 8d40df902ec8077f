//! # Lebanon News Scraper
//!
//! Collects the lead stories of Lebanese news sites and normalizes them into
//! one article shape, surviving per-site blocking and layout drift.
//!
//! ## Features
//!
//! - Thirteen built-in sources (Addiyar, Annahar, Al-Akhbar, MTV, LBCI, ...)
//! - Direct fetch first; an HTTP 403 escalates once to an unblocking service
//! - One failing source never aborts the batch
//! - CLI batch runs with a JSON report, or an HTTP API
//!
//! ## Usage
//!
//! ```sh
//! lebanon_news_scraper scrape-all -o ./reports --detailed
//! lebanon_news_scraper serve --bind 127.0.0.1:8000
//! ```
//!
//! ## Architecture
//!
//! 1. **Fetching**: [`fetch::FetchEngine`] turns a URL into page content or a typed failure
//! 2. **Extraction**: a [`scrapers::Extractor`] per source finds candidates and article text
//! 3. **Tasks**: [`pipeline::task::SourceTask`] runs one source to a `SourceResult`
//! 4. **Orchestration**: [`pipeline::orchestrator::Orchestrator`] fans out over the
//!    registry and folds everything into a `BatchReport`

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod api;
mod cli;
mod config;
mod error;
mod fetch;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::{Cli, Command};
use config::Config;
use fetch::FetchEngine;
use outputs::{json, text};
use pipeline::orchestrator::Orchestrator;
use scrapers::registry::ExtractorRegistry;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(command = ?args.command, "Parsed CLI arguments");

    let config = Arc::new(Config::from_settings(&args.settings)?);
    let registry = Arc::new(ExtractorRegistry::builtin().retain(|id| config.is_enabled(id)));
    if registry.is_empty() {
        warn!("Every source is disabled in the sources config");
    }

    if let Command::Sources = args.command {
        for id in registry.source_ids() {
            println!("{id}");
        }
        return Ok(());
    }

    let engine = Arc::new(FetchEngine::from_config(&config)?);
    info!(
        sources = registry.len(),
        fallback = engine.fallback_enabled(),
        "lebanon_news_scraper starting up"
    );
    let orchestrator = Orchestrator::new(registry, engine, Arc::clone(&config));

    match args.command {
        Command::ScrapeAll { output_dir, detailed } => {
            // Fail before scraping rather than after.
            if let Err(e) = ensure_writable_dir(&output_dir).await {
                error!(
                    path = %output_dir,
                    error = %e,
                    "Report directory is not writable (fix perms or choose a different path)"
                );
                return Err(e.into());
            }

            let report = orchestrator.run_all().await;
            println!("{}", text::summary(&report, detailed));

            let path = json::write_report(&report, &output_dir).await?;
            println!("Results saved to: {}", path.display());
        }
        Command::Scrape { source } => {
            let result = orchestrator.run_one(&source).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Serve { bind } => {
            let listener = tokio::net::TcpListener::bind(&bind).await?;
            info!(%bind, "Serving HTTP API");
            axum::serve(listener, api::router(orchestrator)).await?;
        }
        Command::Sources => {}
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}
