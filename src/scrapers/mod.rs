//! Per-source extraction rules for Lebanese news front pages.
//!
//! Each source module exports one unit struct implementing [`Extractor`].
//! An extractor never touches the network: it is handed page content by a
//! [`SourceTask`](crate::pipeline::task::SourceTask) and answers two questions:
//!
//! 1. **Candidates**: which front-page entries are articles (headline, link, image)?
//! 2. **Detail**: what is the body text (and maybe image) of one article page?
//!
//! # Supported Sources
//!
//! | Source id | Module | Listing page | Default cap |
//! |-----------|--------|--------------|-------------|
//! | `addiyar` | [`addiyar`] | featured articles block | 3 |
//! | `annahar` | [`annahar`] | featured listing items | 3 |
//! | `aljoumhouria` | [`aljoumhouria`] | single "big news" block | 1 |
//! | `alakhbar` | [`alakhbar`] | main grid | 1 |
//! | `nidaalwatan` | [`nidaalwatan`] | featured carousel | 1 |
//! | `aliwaa` | [`aliwaa`] | news carousel | 1 |
//! | `elsharkonline` | [`elsharkonline`] | first column articles | 1 |
//! | `mtv` | [`mtv`] | news swiper (image from detail page) | 1 |
//! | `aljadeed` | [`aljadeed`] | presentation slider | 1 |
//! | `sawtbeirut` | [`sawtbeirut`] | headlines section cards | 1 |
//! | `lebanondebate` | [`lebanondebate`] | featured article links | 1 |
//! | `lebaneseforces` | [`lebaneseforces`] | carousel items | 3 |
//! | `lbcgroup` | [`lbcgroup`] | highlighted story, then latest news | 1 |
//!
//! Selectors follow the live markup of each site and are expected to drift;
//! a source that stops matching reports `no_content`, it does not fail the batch.

pub mod html;
pub mod registry;

pub mod addiyar;
pub mod alakhbar;
pub mod aliwaa;
pub mod aljadeed;
pub mod aljoumhouria;
pub mod annahar;
pub mod elsharkonline;
pub mod lbcgroup;
pub mod lebaneseforces;
pub mod lebanondebate;
pub mod mtv;
pub mod nidaalwatan;
pub mod sawtbeirut;

use crate::error::Result;

/// Body text used when the detail page could not be fetched at all.
pub const TEXT_FETCH_FAILED: &str = "Failed to retrieve article text.";
/// Body text used when the detail page has no recognisable content container.
pub const CONTENT_NOT_FOUND: &str = "Article content not found.";
/// Body text used when the content container exists but holds no text.
pub const TEXT_NOT_FOUND: &str = "Article text not found.";

/// A front-page entry that may become an [`Article`](crate::models::Article).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub headline: String,
    pub article_url: String,
    pub image_url: Option<String>,
}

impl Candidate {
    pub fn new(headline: impl Into<String>, article_url: impl Into<String>, image_url: Option<String>) -> Self {
        Self {
            headline: headline.into(),
            article_url: article_url.into(),
            image_url,
        }
    }

    /// Both required fields carry non-whitespace text.
    pub fn is_complete(&self) -> bool {
        !self.headline.trim().is_empty() && !self.article_url.trim().is_empty()
    }
}

/// What an extractor found on an article page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailPage {
    /// `None` when the content container is missing.
    pub text: Option<String>,
    pub image_url: Option<String>,
}

impl DetailPage {
    pub fn text(text: Option<String>) -> Self {
        Self { text, image_url: None }
    }

    /// Final body text with the "not found" sentinels applied.
    pub fn article_text(&self) -> String {
        match self.text.as_deref().map(str::trim) {
            None => CONTENT_NOT_FOUND.to_string(),
            Some("") => TEXT_NOT_FOUND.to_string(),
            Some(text) => text.to_string(),
        }
    }
}

/// Source-specific parsing rules.
///
/// Implementations are pure functions of the HTML they are given and must be
/// safe to share across concurrently running tasks.
pub trait Extractor: Send + Sync {
    /// Front page to fetch for candidates.
    fn listing_url(&self) -> &str;

    /// Articles emitted when the configuration does not say otherwise.
    fn default_article_cap(&self) -> usize {
        1
    }

    fn candidates(&self, listing_html: &str) -> Result<Vec<Candidate>>;

    fn detail(&self, detail_html: &str) -> Result<DetailPage>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_completeness() {
        assert!(Candidate::new("Title", "https://a.test/1", None).is_complete());
        assert!(!Candidate::new("  ", "https://a.test/1", None).is_complete());
        assert!(!Candidate::new("Title", "", None).is_complete());
    }

    #[test]
    fn test_detail_sentinels() {
        assert_eq!(DetailPage::text(None).article_text(), CONTENT_NOT_FOUND);
        assert_eq!(DetailPage::text(Some(" \n".into())).article_text(), TEXT_NOT_FOUND);
        assert_eq!(DetailPage::text(Some("Body\n".into())).article_text(), "Body");
    }
}
