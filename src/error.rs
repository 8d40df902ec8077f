//! Error taxonomy shared by the fetch layer, the extractors and the pipeline.
//!
//! Fetch failures are first produced as [`FetchOutcome`](crate::fetch::FetchOutcome)
//! values and only become a [`ScrapeError`] when a caller asks for the content
//! with [`FetchOutcome::into_content`](crate::fetch::FetchOutcome::into_content).
//! Nothing in this enum is allowed to cross the source task boundary: a
//! [`SourceTask`](crate::pipeline::task::SourceTask) folds every variant into
//! an `error` [`SourceResult`](crate::models::SourceResult).

use crate::fetch::FailureKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("fallback credential is not configured; cannot escalate blocked request")]
    ConfigMissing,

    #[error("blocked by upstream (HTTP {status})")]
    Blocked { status: u16 },

    #[error("{kind}: {message}")]
    Network { kind: FailureKind, message: String },

    #[error("fallback exhausted: {0}")]
    FallbackExhausted(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("unknown source '{0}'")]
    UnknownSource(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
