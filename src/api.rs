//! HTTP façade over the orchestrator.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /` | service name, version, registered sources, endpoint map |
//! | `GET /health` | liveness |
//! | `GET /scrape/{source}` | one source's articles; 404 when unknown or empty, 500 on error |
//! | `GET /scrape-all` | the [`BatchReport`](crate::models::BatchReport), always 200 |

use crate::error::ScrapeError;
use crate::fetch::transport::Transport;
use crate::models::{Article, SourceStatus};
use crate::pipeline::orchestrator::Orchestrator;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Serialize;
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

pub const SERVICE_NAME: &str = "Lebanon News Scraper API";

pub struct AppState<T: Transport> {
    orchestrator: Orchestrator<T>,
}

impl<T: Transport> Clone for AppState<T> {
    fn clone(&self) -> Self {
        Self {
            orchestrator: self.orchestrator.clone(),
        }
    }
}

pub fn router<T: Transport + 'static>(orchestrator: Orchestrator<T>) -> Router {
    Router::new()
        .route("/", get(index::<T>))
        .route("/health", get(health))
        .route("/scrape/{source}", get(scrape_one::<T>))
        .route("/scrape-all", get(scrape_all::<T>))
        .layer(CorsLayer::very_permissive())
        .with_state(AppState { orchestrator })
}

#[derive(Serialize)]
struct SourceArticles {
    site: String,
    articles_count: usize,
    articles: Vec<Article>,
}

fn detail(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "detail": message.into() }))).into_response()
}

async fn index<T: Transport + 'static>(State(state): State<AppState<T>>) -> Json<serde_json::Value> {
    Json(json!({
        "name": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "available_sites": state.orchestrator.registry().source_ids(),
        "endpoints": {
            "/scrape/{source}": "Scrape one source",
            "/scrape-all": "Scrape every source",
            "/health": "Health check",
        },
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "message": "API is running" }))
}

async fn scrape_one<T: Transport + 'static>(
    State(state): State<AppState<T>>,
    Path(source): Path<String>,
) -> Response {
    let result = match state.orchestrator.run_one(&source).await {
        Ok(result) => result,
        Err(ScrapeError::UnknownSource(id)) => {
            let available = state.orchestrator.registry().source_ids().join(", ");
            warn!(source = %id, "Unknown source requested");
            return detail(
                StatusCode::NOT_FOUND,
                format!("Site '{id}' not found. Available sites: {available}"),
            );
        }
        Err(e) => return detail(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
    };

    match result.status {
        SourceStatus::Success => {
            info!(source = %result.source_id, count = result.article_count(), "Served source");
            Json(SourceArticles {
                site: result.source_id,
                articles_count: result.articles.len(),
                articles: result.articles,
            })
            .into_response()
        }
        SourceStatus::NoContent => detail(
            StatusCode::NOT_FOUND,
            format!("No articles found for {}", result.source_id),
        ),
        SourceStatus::Error => detail(
            StatusCode::INTERNAL_SERVER_ERROR,
            result.error_message.unwrap_or_default(),
        ),
    }
}

async fn scrape_all<T: Transport + 'static>(State(state): State<AppState<T>>) -> Response {
    Json(state.orchestrator.run_all().await).into_response()
}
