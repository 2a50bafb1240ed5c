//! Thin HTTP boundary. Handlers validate input, consult the stores and hand
//! off to the pipeline or aggregator; all recipe logic lives below this
//! layer.

use crate::config::AppConfig;
use crate::error::ScoutError;
use crate::fetch::PageFetcher;
use crate::model::{RecipeRecord, SearchResultSet, StatusReport};
use crate::pipeline::{FallbackReason, ScrapeOutcome, ScrapePipeline};
use crate::search::{SearchAggregator, MAX_LIMIT};
use crate::store::{RateDecision, RateLimiter, TtlCache};
use crate::suggestions::SuggestionEngine;
use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use log::info;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

pub struct AppState {
    pub aggregator: SearchAggregator,
    pub pipeline: ScrapePipeline,
    pub search_cache: TtlCache<SearchResultSet>,
    pub scrape_cache: TtlCache<RecipeRecord>,
    pub limiter: RateLimiter,
    pub suggestions: SuggestionEngine,
    pub cache_sweep_interval: Duration,
}

impl AppState {
    pub fn new(config: &AppConfig) -> Self {
        let fetcher = PageFetcher::new(&config.scraping);
        let ttl = Duration::from_secs(config.cache.ttl_secs);
        AppState {
            aggregator: SearchAggregator::new(config, &fetcher),
            pipeline: ScrapePipeline::new(config),
            search_cache: TtlCache::new(ttl),
            scrape_cache: TtlCache::new(ttl),
            limiter: RateLimiter::new(
                config.rate_limit.requests_per_window,
                Duration::from_secs(config.rate_limit.window_secs),
            ),
            suggestions: SuggestionEngine::new(),
            cache_sweep_interval: Duration::from_secs(config.cache.sweep_interval_secs),
        }
    }
}

pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/search", get(search_handler))
        .route("/api/scrape", get(scrape_handler))
        .route("/api/suggestions", get(suggestions_handler))
        .route("/api/hello", get(hello_handler))
        .layer(cors)
        .with_state(state)
}

/// Client identity for throttling: first x-forwarded-for hop, else a fixed
/// local key.
fn client_key(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_string())
        .unwrap_or_else(|| "local".to_string())
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: Option<String>,
    limit: Option<usize>,
}

async fn search_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(params): Query<SearchParams>,
) -> impl IntoResponse {
    if state.limiter.check(&client_key(&headers)) == RateDecision::Limited {
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({ "error": "Too many requests. Please try again in a minute." })),
        )
            .into_response();
    }

    let Some(query) = params.query.filter(|q| !q.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing search query" })),
        )
            .into_response();
    };
    let limit = params.limit.unwrap_or(5).clamp(1, MAX_LIMIT);

    let cache_key = format!("search:{}:{limit}", query.to_lowercase());
    if let Some(cached) = state.search_cache.get(&cache_key) {
        return Json(cached).into_response();
    }

    info!("Searching for: {query} (limit: {limit})");
    state.suggestions.record_search(&query);
    let result = state.aggregator.search(&query, limit).await;
    state.search_cache.insert(cache_key, result.clone());
    Json(result).into_response()
}

#[derive(Debug, Deserialize)]
struct ScrapeParams {
    url: Option<String>,
}

async fn scrape_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ScrapeParams>,
) -> impl IntoResponse {
    let Some(url) = params.url.filter(|u| !u.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Missing url" })),
        )
            .into_response();
    };

    let cache_key = format!("scrape:{url}");
    if let Some(cached) = state.scrape_cache.get(&cache_key) {
        return Json(cached).into_response();
    }

    match state.pipeline.scrape(&url).await {
        Ok(outcome) => {
            // Fallback outcomes still answer 200; the record carries a note.
            // Transient fetch failures are not cached, or the template answer
            // would pin itself for the whole TTL.
            let cacheable = !matches!(
                outcome,
                ScrapeOutcome::Fallback {
                    reason: FallbackReason::FetchFailed,
                    ..
                }
            );
            let record = outcome.into_record();
            if cacheable {
                state.scrape_cache.insert(cache_key, record.clone());
            }
            Json(record).into_response()
        }
        Err(ScoutError::UnsupportedDomain(_)) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Domain not supported" })),
        )
            .into_response(),
        Err(err) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
    }
}

#[derive(Debug, Deserialize)]
struct SuggestionParams {
    q: Option<String>,
    limit: Option<usize>,
}

async fn suggestions_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SuggestionParams>,
) -> impl IntoResponse {
    let query = params.q.unwrap_or_default();
    let limit = params.limit.unwrap_or(10).clamp(1, 20);
    let suggestions = state.suggestions.suggest(&query, limit);
    Json(json!({ "suggestions": suggestions, "query": query }))
}

async fn hello_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(StatusReport {
        msg: "Recipe scout is running.".to_string(),
        cache_entries: state.search_cache.len() + state.scrape_cache.len(),
        rate_limit_entries: state.limiter.len(),
    })
}
