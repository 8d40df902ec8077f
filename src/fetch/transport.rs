//! The network seam underneath [`FetchEngine`](super::FetchEngine).
//!
//! The engine only ever needs "GET this URL with these headers within this
//! timeout and tell me the status and body". Keeping that behind a trait lets
//! the 403 escalation logic be exercised against scripted responses.

use super::FailureKind;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument};

/// Status line and raw body of a completed HTTP exchange.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// A request that never produced a status line (DNS, connect, timeout, body read).
#[derive(Error, Debug, Clone)]
#[error("{kind}: {message}")]
pub struct TransportError {
    pub kind: FailureKind,
    pub message: String,
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError>;
}

/// reqwest-backed transport used by the binary.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client })
    }
}

fn header_map(headers: &BTreeMap<String, String>) -> HeaderMap {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(n), Ok(v)) => {
                map.insert(n, v);
            }
            _ => debug!(%name, "Skipping invalid request header"),
        }
    }
    map
}

fn classify(e: &reqwest::Error) -> FailureKind {
    if e.is_timeout() {
        FailureKind::Timeout
    } else if e.is_connect() {
        FailureKind::Connect
    } else if e.is_body() || e.is_decode() {
        FailureKind::Body
    } else {
        FailureKind::Request
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(level = "debug", skip(self, headers))]
    async fn get(
        &self,
        url: &str,
        headers: &BTreeMap<String, String>,
        timeout: Duration,
    ) -> Result<TransportResponse, TransportError> {
        // The URL may carry credentials (fallback `key=`); callers add their own context.
        let to_err = |e: reqwest::Error| TransportError {
            kind: classify(&e),
            message: e.without_url().to_string(),
        };

        let resp = self
            .client
            .get(url)
            .headers(header_map(headers))
            .timeout(timeout)
            .send()
            .await
            .map_err(to_err)?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await.map_err(to_err)?.to_vec();
        debug!(status, bytes = body.len(), "HTTP response received");
        Ok(TransportResponse { status, body })
    }
}
