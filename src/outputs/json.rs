//! JSON report files.
//!
//! One file per run, named after the local time the batch finished:
//! `scraping_results_<YYYYmmdd_HHMMSS>.json`. The content is the wire shape
//! served by `GET /scrape-all`.

use crate::error::Result;
use crate::models::BatchReport;
use chrono::Local;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument};

/// File name for a report finished at `report.timestamp`.
pub fn report_file_name(report: &BatchReport) -> String {
    format!(
        "scraping_results_{}.json",
        report.timestamp.with_timezone(&Local).format("%Y%m%d_%H%M%S")
    )
}

/// Write `report` as pretty JSON into `output_dir`, returning the file path.
#[instrument(level = "info", skip_all, fields(output_dir = %output_dir.as_ref().display()))]
pub async fn write_report(report: &BatchReport, output_dir: impl AsRef<Path>) -> Result<PathBuf> {
    let json = serde_json::to_string_pretty(report)?;

    let output_dir = output_dir.as_ref();
    if let Err(e) = fs::create_dir_all(output_dir).await {
        error!(error = %e, "Failed to create report dir");
        return Err(e.into());
    }

    let path = output_dir.join(report_file_name(report));
    fs::write(&path, json).await?;
    info!(path = %path.display(), sources = report.total_sources, "Wrote JSON report");
    Ok(path)
}
