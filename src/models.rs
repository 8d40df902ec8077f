//! Normalized records produced by the pipeline.
//!
//! - [`Article`]: one front-page story, the only record that leaves an extractor
//! - [`SourceResult`]: outcome of scraping a single source
//! - [`BatchReport`]: fold of every [`SourceResult`] in one run
//!
//! The JSON produced here is the public wire format of both the CLI report
//! file and the HTTP API, so field names are fixed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A front-page article.
///
/// `headline` and `article_url` are never empty; candidates missing either
/// are dropped before an `Article` is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub headline: String,
    pub image_url: Option<String>,
    pub article_url: String,
    pub article_text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceStatus {
    Success,
    NoContent,
    Error,
}

/// Outcome of one source task. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "SourceResultWire", from = "SourceResultWire")]
pub struct SourceResult {
    pub source_id: String,
    pub status: SourceStatus,
    pub articles: Vec<Article>,
    pub error_message: Option<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
struct SourceResultWire {
    site: String,
    status: SourceStatus,
    articles_count: usize,
    articles: Vec<Article>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    timestamp: DateTime<Utc>,
}

impl From<SourceResult> for SourceResultWire {
    fn from(r: SourceResult) -> Self {
        Self {
            site: r.source_id,
            status: r.status,
            articles_count: r.articles.len(),
            articles: r.articles,
            error: r.error_message,
            timestamp: r.timestamp,
        }
    }
}

impl From<SourceResultWire> for SourceResult {
    fn from(w: SourceResultWire) -> Self {
        Self {
            source_id: w.site,
            status: w.status,
            articles: w.articles,
            error_message: w.error,
            timestamp: w.timestamp,
        }
    }
}

impl SourceResult {
    /// `Success` when at least one article survived, `NoContent` otherwise.
    pub fn from_articles(source_id: impl Into<String>, articles: Vec<Article>) -> Self {
        let status = if articles.is_empty() {
            SourceStatus::NoContent
        } else {
            SourceStatus::Success
        };
        Self {
            source_id: source_id.into(),
            status,
            articles,
            error_message: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failed(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            status: SourceStatus::Error,
            articles: Vec::new(),
            error_message: Some(message.into()),
            timestamp: Utc::now(),
        }
    }

    pub fn article_count(&self) -> usize {
        self.articles.len()
    }
}

/// Summary of one orchestration run. `per_source` keeps registration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    #[serde(rename = "total_sites")]
    pub total_sources: usize,
    #[serde(rename = "successful_sites")]
    pub successful_sources: usize,
    pub total_articles: usize,
    #[serde(rename = "success_rate")]
    pub success_rate_percent: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(rename = "results", with = "ordered_results")]
    pub per_source: Vec<SourceResult>,
}

impl BatchReport {
    #[cfg(test)]
    pub fn get(&self, source_id: &str) -> Option<&SourceResult> {
        self.per_source.iter().find(|r| r.source_id == source_id)
    }
}

/// `results` is a JSON object keyed by source id; on the Rust side it stays an
/// ordered `Vec` so key order survives a round trip.
mod ordered_results {
    use super::SourceResult;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(results: &[SourceResult], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(results.len()))?;
        for result in results {
            map.serialize_entry(&result.source_id, result)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<SourceResult>, D::Error> {
        struct ResultsVisitor;

        impl<'de> Visitor<'de> for ResultsVisitor {
            type Value = Vec<SourceResult>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of source id to source result")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut out = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, mut result)) = access.next_entry::<String, SourceResult>()? {
                    result.source_id = id;
                    out.push(result);
                }
                Ok(out)
            }
        }

        deserializer.deserialize_map(ResultsVisitor)
    }
}
