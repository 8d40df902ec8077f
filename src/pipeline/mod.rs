//! Per-source scraping and batch orchestration.
//!
//! - [`task::SourceTask`]: listing → candidates → detail pages for one source
//! - [`orchestrator::Orchestrator`]: bounded fan-out over the registry
//! - [`aggregate`]: pure fold of source results into a [`BatchReport`](crate::models::BatchReport)

pub mod aggregate;
pub mod orchestrator;
pub mod task;

#[cfg(test)]
pub(crate) mod testing {
    //! Extractors and engines shared by the pipeline and API tests.

    use crate::error::{Result, ScrapeError};
    use crate::fetch::FetchEngine;
    use crate::fetch::fallback::FallbackService;
    use crate::fetch::rate_limit::RateLimiter;
    use crate::fetch::transport::testing::{FAKE_FALLBACK_ENDPOINT, FakeTransport};
    use crate::scrapers::html::{attr, clean_text, css, paragraphs};
    use crate::scrapers::{Candidate, DetailPage, Extractor};
    use scraper::Html;
    use std::time::Duration;

    pub fn engine(transport: FakeTransport, key: Option<&str>) -> FetchEngine<FakeTransport> {
        FetchEngine::new(
            transport,
            FallbackService::new(FAKE_FALLBACK_ENDPOINT, key.map(str::to_string)).unwrap(),
            RateLimiter::new(Duration::ZERO),
        )
    }

    /// Every `<a href>` on the listing is a candidate; `data-img` is its picture.
    /// Detail text is the paragraphs of `<article>`.
    pub struct LinkList {
        pub listing_url: String,
        pub cap: usize,
    }

    impl LinkList {
        pub fn new(listing_url: &str, cap: usize) -> Self {
            Self {
                listing_url: listing_url.to_string(),
                cap,
            }
        }
    }

    impl Extractor for LinkList {
        fn listing_url(&self) -> &str {
            &self.listing_url
        }

        fn default_article_cap(&self) -> usize {
            self.cap
        }

        fn candidates(&self, listing_html: &str) -> Result<Vec<Candidate>> {
            let document = Html::parse_document(listing_html);
            Ok(document
                .select(&css("a"))
                .map(|a| {
                    Candidate::new(
                        clean_text(a),
                        attr(a, "href").unwrap_or_default(),
                        attr(a, "data-img"),
                    )
                })
                .collect())
        }

        fn detail(&self, detail_html: &str) -> Result<DetailPage> {
            let document = Html::parse_document(detail_html);
            Ok(DetailPage::text(
                document
                    .select(&css("article"))
                    .next()
                    .map(|a| paragraphs(a, None).join("\n")),
            ))
        }
    }

    /// Listing parser that reports a layout change.
    pub struct Broken(pub &'static str);

    impl Extractor for Broken {
        fn listing_url(&self) -> &str {
            self.0
        }

        fn candidates(&self, _: &str) -> Result<Vec<Candidate>> {
            Err(ScrapeError::Parse("listing layout changed".into()))
        }

        fn detail(&self, _: &str) -> Result<DetailPage> {
            Ok(DetailPage::default())
        }
    }

    /// Listing parser with a bug.
    pub struct Panicking(pub &'static str);

    impl Extractor for Panicking {
        fn listing_url(&self) -> &str {
            self.0
        }

        fn candidates(&self, _: &str) -> Result<Vec<Candidate>> {
            panic!("index out of bounds in listing parser")
        }

        fn detail(&self, _: &str) -> Result<DetailPage> {
            Ok(DetailPage::default())
        }
    }
}
