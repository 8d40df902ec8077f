//! Direct-then-fallback page fetching.
//!
//! Every page request goes through [`FetchEngine::fetch`], which runs a small
//! state machine:
//!
//! ```text
//! AttemptDirect ──2xx──────────────▶ Success { method: Direct }
//!       │ ──other status / error──▶ Failure
//!       └──403──▶ Blocked ──no key──▶ Failure { ConfigMissing }
//!                    │
//!                    └─ RateLimiter ─▶ AttemptFallback ──ok──▶ Success { method: Fallback }
//!                                             └──error──▶ Failure { FallbackExhausted }
//! ```
//!
//! Only an exact 403 escalates. The fallback service is metered, and other
//! failures (404, 5xx, timeouts) are not anti-bot blocks, so they end the
//! call immediately. There is no retry beyond this single escalation.

pub mod fallback;
pub mod rate_limit;
pub mod transport;

use crate::config::Config;
use crate::error::{Result, ScrapeError};
use fallback::FallbackService;
use rate_limit::RateLimiter;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};
use transport::{HttpTransport, Transport};

/// One page request. Built per call, never mutated.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub timeout: Duration,
}

impl FetchRequest {
    pub fn new(url: impl Into<String>, headers: BTreeMap<String, String>, timeout: Duration) -> Self {
        Self {
            url: url.into(),
            headers,
            timeout,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMethod {
    Direct,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Connect,
    Request,
    Body,
    HttpStatus(u16),
    ConfigMissing,
    FallbackExhausted,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Timeout => f.write_str("timeout"),
            FailureKind::Connect => f.write_str("connection failed"),
            FailureKind::Request => f.write_str("request failed"),
            FailureKind::Body => f.write_str("response body error"),
            FailureKind::HttpStatus(status) => write!(f, "HTTP {status}"),
            FailureKind::ConfigMissing => f.write_str("fallback not configured"),
            FailureKind::FallbackExhausted => f.write_str("fallback exhausted"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Success { content: Vec<u8>, method: FetchMethod },
    Blocked { status: u16 },
    Failure { kind: FailureKind, message: String },
}

impl FetchOutcome {
    /// How the content was obtained, `None` unless this is a success.
    pub fn method(&self) -> Option<FetchMethod> {
        match self {
            FetchOutcome::Success { method, .. } => Some(*method),
            _ => None,
        }
    }

    pub fn into_content(self) -> Result<Vec<u8>> {
        match self {
            FetchOutcome::Success { content, .. } => Ok(content),
            FetchOutcome::Blocked { status } => Err(ScrapeError::Blocked { status }),
            FetchOutcome::Failure { kind, message } => Err(match kind {
                FailureKind::ConfigMissing => ScrapeError::ConfigMissing,
                FailureKind::FallbackExhausted => ScrapeError::FallbackExhausted(message),
                kind => ScrapeError::Network { kind, message },
            }),
        }
    }

    /// Decodes the page as UTF-8, replacing invalid sequences.
    pub fn into_text(self) -> Result<String> {
        self.into_content()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }
}

#[derive(Debug)]
pub struct FetchEngine<T = HttpTransport> {
    transport: T,
    fallback: FallbackService,
    limiter: RateLimiter,
}

impl FetchEngine<HttpTransport> {
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = HttpTransport::new()
            .map_err(|e| ScrapeError::Config(format!("cannot build HTTP client: {e}")))?;
        let fallback = FallbackService::new(&config.fallback_api_url, config.fallback_api_key.clone())?;
        Ok(Self::new(transport, fallback, RateLimiter::new(config.request_delay)))
    }
}

impl<T: Transport> FetchEngine<T> {
    pub fn new(transport: T, fallback: FallbackService, limiter: RateLimiter) -> Self {
        Self {
            transport,
            fallback,
            limiter,
        }
    }

    #[cfg(test)]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn fallback_enabled(&self) -> bool {
        self.fallback.is_configured()
    }

    #[instrument(level = "info", skip_all, fields(url = %request.url))]
    pub async fn fetch(&self, request: &FetchRequest) -> FetchOutcome {
        match self.attempt_direct(request).await {
            FetchOutcome::Blocked { status } => self.attempt_fallback(request, status).await,
            outcome => outcome,
        }
    }

    async fn attempt_direct(&self, request: &FetchRequest) -> FetchOutcome {
        debug!("Attempting direct request");
        match self
            .transport
            .get(&request.url, &request.headers, request.timeout)
            .await
        {
            Ok(resp) if resp.status == 403 => FetchOutcome::Blocked { status: resp.status },
            Ok(resp) if (200..300).contains(&resp.status) => {
                debug!(bytes = resp.body.len(), "Direct request succeeded");
                FetchOutcome::Success {
                    content: resp.body,
                    method: FetchMethod::Direct,
                }
            }
            Ok(resp) => {
                warn!(status = resp.status, "Direct request failed");
                FetchOutcome::Failure {
                    kind: FailureKind::HttpStatus(resp.status),
                    message: format!("HTTP {} for url ({})", resp.status, request.url),
                }
            }
            Err(e) => {
                warn!(error = %e, "Direct request failed");
                FetchOutcome::Failure {
                    kind: e.kind,
                    message: format!("{} for url ({})", e.message, request.url),
                }
            }
        }
    }

    async fn attempt_fallback(&self, request: &FetchRequest, status: u16) -> FetchOutcome {
        let Some(fallback_url) = self.fallback.request_url(&request.url) else {
            warn!(status, "Blocked and no fallback credential configured");
            return FetchOutcome::Failure {
                kind: FailureKind::ConfigMissing,
                message: format!(
                    "HTTP {status} for url ({}); fallback credential not configured",
                    request.url
                ),
            };
        };

        info!(status, "Blocked; escalating to fallback service");
        self.limiter.wait_before_fallback().await;

        let exhausted = |reason: String| {
            let reason = self.fallback.redact(&reason);
            error!(status, %reason, "Fallback service also failed");
            FetchOutcome::Failure {
                kind: FailureKind::FallbackExhausted,
                message: format!("HTTP {status} for url ({}); fallback: {reason}", request.url),
            }
        };

        match self
            .transport
            .get(fallback_url.as_str(), &BTreeMap::new(), request.timeout)
            .await
        {
            Ok(resp) if (200..300).contains(&resp.status) => {
                match FallbackService::unwrap_content(&resp.body) {
                    Ok(content) => {
                        info!(bytes = content.len(), "Fallback request succeeded");
                        FetchOutcome::Success {
                            content,
                            method: FetchMethod::Fallback,
                        }
                    }
                    Err(reason) => exhausted(reason),
                }
            }
            Ok(resp) => exhausted(format!("service returned HTTP {}", resp.status)),
            Err(e) => exhausted(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::transport::testing::{FAKE_FALLBACK_ENDPOINT, FakeTransport};
    use super::*;

    const URL: &str = "https://news.test/";

    fn engine(transport: FakeTransport, key: Option<&str>) -> FetchEngine<FakeTransport> {
        FetchEngine::new(
            transport,
            FallbackService::new(FAKE_FALLBACK_ENDPOINT, key.map(str::to_string)).unwrap(),
            RateLimiter::new(Duration::ZERO),
        )
    }

    fn request() -> FetchRequest {
        FetchRequest::new(URL, BTreeMap::new(), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn direct_success_never_touches_fallback() {
        let engine = engine(FakeTransport::new().page(URL, 200, "<html/>"), Some("k"));
        let outcome = engine.fetch(&request()).await;
        assert_eq!(outcome.method(), Some(FetchMethod::Direct));
        assert_eq!(engine.transport().fallback_calls(), 0);
    }

    #[tokio::test]
    async fn failures_report_no_method() {
        let engine = engine(FakeTransport::new().page(URL, 404, ""), Some("k"));
        assert_eq!(engine.fetch(&request()).await.method(), None);
    }

    #[tokio::test]
    async fn only_403_escalates() {
        for status in [404u16, 500, 429, 401] {
            let engine = engine(
                FakeTransport::new().page(URL, status, "").fallback_rendering("<p/>"),
                Some("k"),
            );
            let outcome = engine.fetch(&request()).await;
            match outcome {
                FetchOutcome::Failure { kind, .. } => assert_eq!(kind, FailureKind::HttpStatus(status)),
                other => panic!("status {status} produced {other:?}"),
            }
            assert_eq!(engine.transport().fallback_calls(), 0, "status {status}");
        }
    }

    #[tokio::test]
    async fn blocked_request_is_served_by_fallback() {
        let engine = engine(
            FakeTransport::new().page(URL, 403, "denied").fallback_rendering("<h1>rendered</h1>"),
            Some("k"),
        );
        match engine.fetch(&request()).await {
            FetchOutcome::Success { content, method } => {
                assert_eq!(method, FetchMethod::Fallback);
                assert_eq!(content, b"<h1>rendered</h1>");
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(engine.transport().direct_calls(), 1);
        assert_eq!(engine.transport().fallback_calls(), 1);
    }

    #[tokio::test]
    async fn missing_credential_never_calls_fallback() {
        let engine = engine(
            FakeTransport::new().page(URL, 403, "denied").fallback_rendering("<p/>"),
            None,
        );
        let outcome = engine.fetch(&request()).await;
        assert!(matches!(
            outcome,
            FetchOutcome::Failure { kind: FailureKind::ConfigMissing, .. }
        ));
        assert_eq!(engine.transport().fallback_calls(), 0);
        assert!(matches!(outcome.into_content(), Err(ScrapeError::ConfigMissing)));
    }

    #[tokio::test]
    async fn fallback_failure_keeps_original_403_context() {
        let engine = engine(
            FakeTransport::new().page(URL, 403, "denied").fallback(502, "bad gateway"),
            Some("k"),
        );
        match engine.fetch(&request()).await {
            FetchOutcome::Failure { kind, message } => {
                assert_eq!(kind, FailureKind::FallbackExhausted);
                assert!(message.starts_with("HTTP 403"), "{message}");
                assert!(message.contains("502"), "{message}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn fallback_failure_never_exposes_the_credential() {
        let engine = engine(
            FakeTransport::new().page(URL, 403, "denied").fallback_failing(
                FailureKind::Connect,
                "error sending request for url (https://fallback.test/scrape?key=SUPERSECRETKEY&asp=true)",
            ),
            Some("SUPERSECRETKEY"),
        );
        let err = engine.fetch(&request()).await.into_content().unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, ScrapeError::FallbackExhausted(_)));
        assert!(!message.contains("SUPERSECRETKEY"), "{message}");
        assert!(message.starts_with("fallback exhausted: HTTP 403 for url (https://news.test/)"), "{message}");
    }

    #[tokio::test]
    async fn direct_error_names_url_once() {
        let engine = engine(
            FakeTransport::new().failing(URL, FailureKind::Connect, "error sending request"),
            None,
        );
        match engine.fetch(&request()).await {
            FetchOutcome::Failure { message, .. } => {
                assert_eq!(message.matches(URL).count(), 1, "{message}");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn transport_timeout_is_terminal() {
        let engine = engine(
            FakeTransport::new().failing(URL, FailureKind::Timeout, "operation timed out"),
            Some("k"),
        );
        let err = engine.fetch(&request()).await.into_content().unwrap_err();
        assert!(err.to_string().contains("timeout"));
        assert_eq!(engine.transport().calls().len(), 1);
    }

    #[tokio::test]
    async fn fallback_is_delayed_by_rate_limiter() {
        let engine = FetchEngine::new(
            FakeTransport::new().page(URL, 403, "").fallback_rendering("ok"),
            FallbackService::new(FAKE_FALLBACK_ENDPOINT, Some("k".into())).unwrap(),
            RateLimiter::new(Duration::from_millis(25)),
        );
        let t0 = std::time::Instant::now();
        assert!(matches!(
            engine.fetch(&request()).await,
            FetchOutcome::Success { .. }
        ));
        assert!(t0.elapsed() >= Duration::from_millis(25));
    }
}
