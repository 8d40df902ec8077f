//! One source, start to finish.
//!
//! A [`SourceTask`] always ends in a [`SourceResult`]: fetch and extractor
//! errors are downgraded to `Error`, an empty candidate list to `NoContent`.
//! Only panics escape, and the orchestrator contains those.

use crate::config::Config;
use crate::error::Result;
use crate::fetch::transport::Transport;
use crate::fetch::{FetchEngine, FetchRequest};
use crate::models::{Article, SourceResult};
use crate::scrapers::registry::ExtractorDescriptor;
use crate::scrapers::{Candidate, TEXT_FETCH_FAILED};
use crate::utils::truncate_for_log;
use itertools::Itertools;
use tracing::{debug, error, info, instrument, warn};

pub struct SourceTask<'a, T: Transport> {
    descriptor: &'a ExtractorDescriptor,
    engine: &'a FetchEngine<T>,
    config: &'a Config,
}

impl<'a, T: Transport> SourceTask<'a, T> {
    pub fn new(descriptor: &'a ExtractorDescriptor, engine: &'a FetchEngine<T>, config: &'a Config) -> Self {
        Self {
            descriptor,
            engine,
            config,
        }
    }

    #[instrument(level = "info", skip_all, fields(source = %self.descriptor.source_id))]
    pub async fn run(&self) -> SourceResult {
        let source_id = &self.descriptor.source_id;
        match self.articles().await {
            Ok(articles) if articles.is_empty() => {
                warn!("No articles found");
                SourceResult::from_articles(source_id.as_str(), articles)
            }
            Ok(articles) => {
                info!(count = articles.len(), "Source scraped");
                SourceResult::from_articles(source_id.as_str(), articles)
            }
            Err(e) => {
                let message = e.to_string();
                error!(error = %truncate_for_log(&message, 300), "Source failed");
                SourceResult::failed(source_id.as_str(), message)
            }
        }
    }

    async fn articles(&self) -> Result<Vec<Article>> {
        let extractor = &self.descriptor.extractor;
        let listing_url = extractor.listing_url();

        let outcome = self
            .engine
            .fetch(&FetchRequest::new(
                listing_url,
                self.config.default_headers(),
                self.config.listing_timeout,
            ))
            .await;
        if let Some(method) = outcome.method() {
            info!(?method, url = %listing_url, "Listing fetched");
        }
        let listing = outcome.into_text()?;

        let cap = self
            .config
            .article_cap(&self.descriptor.source_id, extractor.default_article_cap());
        let candidates: Vec<Candidate> = extractor
            .candidates(&listing)?
            .into_iter()
            .filter(Candidate::is_complete)
            .unique_by(|c| c.article_url.clone())
            .take(cap)
            .collect();
        debug!(count = candidates.len(), cap, "Candidates selected");

        let mut articles = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            articles.push(self.article(candidate).await?);
        }
        Ok(articles)
    }

    async fn article(&self, candidate: Candidate) -> Result<Article> {
        let outcome = self
            .engine
            .fetch(&FetchRequest::new(
                candidate.article_url.as_str(),
                self.config.default_headers(),
                self.config.detail_timeout,
            ))
            .await;
        if let Some(method) = outcome.method() {
            debug!(?method, url = %candidate.article_url, "Detail page fetched");
        }

        let (article_text, detail_image) = match outcome.into_text() {
            Ok(html) => {
                let page = self.descriptor.extractor.detail(&html)?;
                (page.article_text(), page.image_url)
            }
            Err(e) => {
                warn!(url = %candidate.article_url, error = %e, "Detail page unavailable");
                (TEXT_FETCH_FAILED.to_string(), None)
            }
        };

        Ok(Article {
            headline: candidate.headline.trim().to_string(),
            image_url: candidate.image_url.or(detail_image),
            article_url: candidate.article_url,
            article_text,
        })
    }
}
