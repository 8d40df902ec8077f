//! Command-line interface definitions.
//!
//! Every option can come from a flag or from the environment variable named
//! next to it, so the same binary works from a shell, a cron job or a
//! container without a wrapper script.

use clap::{Args, Parser, Subcommand};

/// Scrape Lebanese news front pages.
///
/// # Examples
///
/// ```sh
/// # One batch over every registered source, report written to ./reports
/// lebanon_news_scraper scrape-all -o ./reports
///
/// # A single source
/// lebanon_news_scraper scrape mtv
///
/// # HTTP API
/// SCRAPFLY_API_KEY=... lebanon_news_scraper serve --bind 127.0.0.1:8000
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Command,
}

/// Settings shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// API key for the unblocking fallback service (fallback disabled when unset)
    #[arg(long, env = "SCRAPFLY_API_KEY", hide_env_values = true, global = true)]
    pub scrapfly_api_key: Option<String>,

    /// Endpoint of the unblocking fallback service
    #[arg(
        long,
        env = "SCRAPFLY_API_URL",
        default_value = "https://api.scrapfly.io/scrape",
        global = true
    )]
    pub scrapfly_api_url: String,

    /// Timeout in seconds for listing-page requests
    #[arg(long, env = "REQUEST_TIMEOUT", default_value_t = 15, global = true)]
    pub request_timeout: u64,

    /// Timeout in seconds for article detail-page requests
    #[arg(long, env = "DETAIL_TIMEOUT", default_value_t = 10, global = true)]
    pub detail_timeout: u64,

    /// Delay in seconds before each fallback request
    #[arg(long, env = "REQUEST_DELAY", default_value_t = 1.0, global = true)]
    pub request_delay: f64,

    /// Number of sources scraped at the same time
    #[arg(long, env = "SCRAPER_CONCURRENCY", default_value_t = 4, global = true)]
    pub concurrency: usize,

    /// Optional YAML file with per-source article caps and switches
    #[arg(long, env = "SOURCES_CONFIG", global = true)]
    pub sources_config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scrape every enabled source and write a JSON report
    ScrapeAll {
        /// Directory for the scraping_results_*.json report
        #[arg(short, long, env = "REPORT_OUTPUT_DIR", default_value = ".")]
        output_dir: String,

        /// Print per-source lines under the summary
        #[arg(short, long)]
        detailed: bool,
    },
    /// Scrape one source and print its articles as JSON
    Scrape {
        /// Source identifier, e.g. `mtv` or `lbcgroup`
        source: String,
    },
    /// List registered source identifiers
    Sources,
    /// Serve the HTTP API
    Serve {
        /// Address to bind
        #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8000")]
        bind: String,
    },
}
