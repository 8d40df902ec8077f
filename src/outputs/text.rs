//! Human-readable batch summary.

use crate::models::{BatchReport, SourceStatus};
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

fn status_label(status: SourceStatus) -> &'static str {
    match status {
        SourceStatus::Success => "ok",
        SourceStatus::NoContent => "empty",
        SourceStatus::Error => "FAILED",
    }
}

/// Totals, and with `detailed` one line per source (plus its error, if any).
pub fn summary(report: &BatchReport, detailed: bool) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "LEBANESE NEWS SCRAPER RESULTS");
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "Summary:");
    let _ = writeln!(out, "  Total sites:    {}", report.total_sources);
    let _ = writeln!(out, "  Successful:     {}", report.successful_sources);
    let _ = writeln!(out, "  Success rate:   {:.1}%", report.success_rate_percent);
    let _ = writeln!(out, "  Total articles: {}", report.total_articles);
    let _ = writeln!(out, "  Timestamp:      {}", report.timestamp.to_rfc3339());

    if detailed {
        let _ = writeln!(out, "\nDetailed results:");
        for result in &report.per_source {
            let _ = writeln!(
                out,
                "  [{:>6}] {}: {} articles",
                status_label(result.status),
                result.source_id,
                result.article_count()
            );
            if let Some(error) = &result.error_message {
                let _ = writeln!(out, "           error: {error}");
            }
        }
    }
    let _ = write!(out, "{rule}");
    out
}
