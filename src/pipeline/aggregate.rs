//! Fold of per-source results into a batch summary. No I/O.

use crate::models::{BatchReport, SourceResult, SourceStatus};
use chrono::Utc;

/// Percentage of successful sources, rounded to one decimal. `0.0` for an empty batch.
pub fn success_rate(successful: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    (successful as f64 / total as f64 * 1000.0).round() / 10.0
}

/// Builds the [`BatchReport`] for `per_source`, keeping its order.
pub fn aggregate(per_source: Vec<SourceResult>) -> BatchReport {
    let total_sources = per_source.len();
    let successful_sources = per_source
        .iter()
        .filter(|r| r.status == SourceStatus::Success)
        .count();
    let total_articles = per_source.iter().map(SourceResult::article_count).sum();

    BatchReport {
        total_sources,
        successful_sources,
        total_articles,
        success_rate_percent: success_rate(successful_sources, total_sources),
        timestamp: Utc::now(),
        per_source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Article;

    fn articles(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| Article {
                headline: format!("h{i}"),
                image_url: None,
                article_url: format!("https://a.test/{i}"),
                article_text: "t".into(),
            })
            .collect()
    }

    #[test]
    fn test_success_rate_rounding() {
        assert_eq!(success_rate(9, 13), 69.2);
        assert_eq!(success_rate(2, 3), 66.7);
        assert_eq!(success_rate(3, 3), 100.0);
        assert_eq!(success_rate(0, 0), 0.0);
    }

    #[test]
    fn test_aggregate_counts() {
        let report = aggregate(vec![
            SourceResult::from_articles("a", articles(3)),
            SourceResult::from_articles("b", vec![]),
            SourceResult::failed("c", "timeout"),
            SourceResult::from_articles("d", articles(1)),
        ]);
        assert_eq!(report.total_sources, 4);
        assert_eq!(report.successful_sources, 2);
        assert_eq!(report.total_articles, 4);
        assert_eq!(report.success_rate_percent, 50.0);
        assert!(report.successful_sources <= report.total_sources);
        let ids: Vec<_> = report.per_source.iter().map(|r| r.source_id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_round_trip_keeps_counts() {
        let report = aggregate(vec![
            SourceResult::from_articles("mtv", articles(2)),
            SourceResult::failed("lbcgroup", "HTTP 500 for url (https://www.lbcgroup.tv)"),
        ]);
        let json = serde_json::to_string(&report).unwrap();
        let back: BatchReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.total_articles, report.total_articles);
        assert_eq!(back.successful_sources, report.successful_sources);
        assert_eq!(back.per_source, report.per_source);
    }
}
