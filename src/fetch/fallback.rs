//! Scrapfly-style unblocking service.
//!
//! The service is asked for `GET {endpoint}?key=..&url=..&asp=true` and
//! answers with a JSON envelope whose `result.content` holds the rendered
//! page. [`FallbackService::unwrap_content`] turns that envelope back into
//! the same raw bytes a direct fetch would have produced.

use crate::utils::truncate_for_log;
use serde::Deserialize;
use std::fmt;
use url::Url;

#[derive(Clone)]
pub struct FallbackService {
    endpoint: Url,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct Envelope {
    result: RenderedPage,
}

#[derive(Deserialize)]
struct RenderedPage {
    content: String,
}

impl FallbackService {
    /// A blank or whitespace-only key is treated as absent.
    pub fn new(endpoint: &str, api_key: Option<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            endpoint: Url::parse(endpoint)?,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Request URL for rendering `target`, or `None` when no credential is set.
    pub fn request_url(&self, target: &str) -> Option<Url> {
        let key = self.api_key.as_deref()?;
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("key", key)
            .append_pair("url", target)
            .append_pair("asp", "true");
        Some(url)
    }

    /// `text` with every occurrence of the credential masked.
    pub fn redact(&self, text: &str) -> String {
        let Some(key) = self.api_key.as_deref() else {
            return text.to_string();
        };
        let encoded: String = url::form_urlencoded::byte_serialize(key.as_bytes()).collect();
        text.replace(key, "***").replace(&encoded, "***")
    }

    pub fn unwrap_content(body: &[u8]) -> Result<Vec<u8>, String> {
        serde_json::from_slice::<Envelope>(body)
            .map(|envelope| envelope.result.content.into_bytes())
            .map_err(|e| {
                format!(
                    "unexpected fallback response ({e}): {}",
                    truncate_for_log(&String::from_utf8_lossy(body), 200)
                )
            })
    }
}

impl fmt::Debug for FallbackService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FallbackService")
            .field("endpoint", &self.endpoint.as_str())
            .field("configured", &self.is_configured())
            .finish()
    }
}
