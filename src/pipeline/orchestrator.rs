//! Batch runs over the whole registry.

use super::aggregate::aggregate;
use super::task::SourceTask;
use crate::config::Config;
use crate::error::Result;
use crate::fetch::FetchEngine;
use crate::fetch::transport::{HttpTransport, Transport};
use crate::models::{BatchReport, SourceResult};
use crate::scrapers::registry::{ExtractorDescriptor, ExtractorRegistry};
use futures::FutureExt;
use futures::stream::{self, StreamExt};
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{error, info, instrument};

/// Shared handles needed to run source tasks. Cheap to clone.
pub struct Orchestrator<T: Transport = HttpTransport> {
    registry: Arc<ExtractorRegistry>,
    engine: Arc<FetchEngine<T>>,
    config: Arc<Config>,
}

impl<T: Transport> Clone for Orchestrator<T> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            engine: Arc::clone(&self.engine),
            config: Arc::clone(&self.config),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic".to_string())
}

impl<T: Transport> Orchestrator<T> {
    pub fn new(registry: Arc<ExtractorRegistry>, engine: Arc<FetchEngine<T>>, config: Arc<Config>) -> Self {
        Self {
            registry,
            engine,
            config,
        }
    }

    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    /// Runs one source, converting a panic inside its extractor into an `Error` result.
    async fn run_guarded(&self, descriptor: &ExtractorDescriptor) -> SourceResult {
        let task = SourceTask::new(descriptor, &self.engine, &self.config);
        match AssertUnwindSafe(task.run()).catch_unwind().await {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(source = %descriptor.source_id, panic = %message, "Extractor panicked");
                SourceResult::failed(
                    descriptor.source_id.as_str(),
                    format!("extractor panicked: {message}"),
                )
            }
        }
    }

    /// Scrapes every registered source, `config.concurrency` at a time.
    ///
    /// Sources finish in any order; the report lists them in registration order.
    #[instrument(level = "info", skip_all, fields(sources = self.registry.len()))]
    pub async fn run_all(&self) -> BatchReport {
        info!(concurrency = self.config.concurrency, "Starting batch");

        let mut finished: Vec<(usize, SourceResult)> = stream::iter(self.registry.iter().cloned().enumerate())
            .map(|(position, descriptor)| async move { (position, self.run_guarded(&descriptor).await) })
            .buffer_unordered(self.config.concurrency.max(1))
            .collect()
            .await;
        finished.sort_by_key(|(position, _)| *position);

        let report = aggregate(finished.into_iter().map(|(_, result)| result).collect());
        info!(
            total = report.total_sources,
            successful = report.successful_sources,
            articles = report.total_articles,
            success_rate = report.success_rate_percent,
            "Batch complete"
        );
        report
    }

    /// Scrapes a single source. Fails only when `source_id` is not registered.
    pub async fn run_one(&self, source_id: &str) -> Result<SourceResult> {
        let descriptor = self.registry.lookup(source_id)?;
        Ok(self.run_guarded(descriptor).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use crate::fetch::FailureKind;
    use crate::fetch::transport::testing::FakeTransport;
    use crate::models::SourceStatus;
    use crate::pipeline::testing::{Broken, LinkList, Panicking, engine};

    fn orchestrator(registry: ExtractorRegistry, transport: FakeTransport, concurrency: usize) -> Orchestrator<FakeTransport> {
        let config = Config {
            concurrency,
            ..Config::default()
        };
        Orchestrator::new(Arc::new(registry), Arc::new(engine(transport, None)), Arc::new(config))
    }

    fn mixed() -> (ExtractorRegistry, FakeTransport) {
        let registry = ExtractorRegistry::new()
            .with("ok", LinkList::new("https://ok.test/", 1))
            .with("panics", Panicking("https://panics.test/"))
            .with("slow", LinkList::new("https://slow.test/", 1))
            .with("broken", Broken("https://broken.test/"))
            .with("empty", LinkList::new("https://empty.test/", 1))
            .with("down", LinkList::new("https://down.test/", 1));
        let transport = FakeTransport::new()
            .page("https://ok.test/", 200, r#"<a href="https://ok.test/1">One</a>"#)
            .page("https://ok.test/1", 200, "<article><p>Body</p></article>")
            .page("https://panics.test/", 200, "<html/>")
            .page("https://slow.test/", 200, r#"<a href="https://slow.test/1">Slow</a>"#)
            .page("https://broken.test/", 200, "<html/>")
            .page("https://empty.test/", 200, "<html/>")
            .failing("https://down.test/", FailureKind::Connect, "connection refused");
        (registry, transport)
    }

    #[tokio::test]
    async fn one_source_failing_never_affects_the_others() {
        let (registry, transport) = mixed();
        let report = orchestrator(registry, transport, 3).run_all().await;

        let statuses: Vec<_> = report
            .per_source
            .iter()
            .map(|r| (r.source_id.as_str(), r.status))
            .collect();
        assert_eq!(
            statuses,
            [
                ("ok", SourceStatus::Success),
                ("panics", SourceStatus::Error),
                ("slow", SourceStatus::Success),
                ("broken", SourceStatus::Error),
                ("empty", SourceStatus::NoContent),
                ("down", SourceStatus::Error),
            ]
        );
        assert_eq!(report.total_sources, 6);
        assert_eq!(report.successful_sources, 2);
        assert_eq!(report.total_articles, 2);
        assert_eq!(report.success_rate_percent, 33.3);

        let panicked = report.get("panics").unwrap();
        assert!(panicked.error_message.as_deref().unwrap().contains("index out of bounds"));
        // Detail page of "slow" is missing; the article survives with the sentinel.
        assert_eq!(
            report.get("slow").unwrap().articles[0].article_text,
            crate::scrapers::TEXT_FETCH_FAILED
        );
    }

    #[tokio::test]
    async fn order_is_registration_order_for_any_concurrency() {
        for concurrency in [1, 2, 8] {
            let (registry, transport) = mixed();
            let expected: Vec<String> = registry.source_ids().iter().map(|s| s.to_string()).collect();
            let report = orchestrator(registry, transport, concurrency).run_all().await;
            let ids: Vec<_> = report.per_source.iter().map(|r| r.source_id.clone()).collect();
            assert_eq!(ids, expected);
        }
    }

    #[tokio::test]
    async fn run_all_can_be_spawned_onto_the_runtime() {
        let (registry, transport) = mixed();
        let orchestrator = orchestrator(registry, transport, 4);
        let report = tokio::spawn(async move { orchestrator.run_all().await })
            .await
            .unwrap();
        assert_eq!(report.total_sources, 6);
        assert_eq!(report.successful_sources, 2);
    }

    #[tokio::test]
    async fn run_one_unknown_source() {
        let (registry, transport) = mixed();
        let orchestrator = orchestrator(registry, transport, 2);
        assert!(matches!(
            orchestrator.run_one("nope").await,
            Err(ScrapeError::UnknownSource(id)) if id == "nope"
        ));
    }

    #[tokio::test]
    async fn run_one_contains_panics() {
        let (registry, transport) = mixed();
        let result = orchestrator(registry, transport, 2).run_one("PANICS").await.unwrap();
        assert_eq!(result.status, SourceStatus::Error);
        assert_eq!(result.source_id, "panics");
    }

    #[tokio::test]
    async fn empty_registry_reports_zero_rate() {
        let report = orchestrator(ExtractorRegistry::new(), FakeTransport::new(), 4).run_all().await;
        assert_eq!(report.total_sources, 0);
        assert_eq!(report.success_rate_percent, 0.0);
    }
}
