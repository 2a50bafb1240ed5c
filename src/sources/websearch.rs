use crate::config::AppConfig;
use crate::domains::{host_of, DomainGate};
use crate::extractors::{HeuristicExtractor, ParsingContext};
use crate::fetch::PageFetcher;
use crate::model::RecipeRecord;
use crate::pipeline::strip_noise;
use crate::sources::SearchSource;
use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, warn};
use reqwest::Url;
use scraper::{Html, Selector};
use std::time::Duration;

/// Ad-hoc web discovery: query public search engines for `<query> recipe`,
/// triage the outbound links, then scrape the survivors with the heuristic
/// cascade. Expensive, so the aggregator only calls it when the cheaper
/// adapters under-fill the requested count.
pub struct WebSearchSource {
    fetcher: PageFetcher,
    gate: DomainGate,
    heuristic: HeuristicExtractor,
    engines: Vec<String>,
    candidate_timeout: Duration,
    max_candidates: usize,
}

impl WebSearchSource {
    pub fn new(config: &AppConfig, fetcher: PageFetcher) -> Self {
        WebSearchSource {
            fetcher,
            gate: DomainGate::new(
                config.allowed_domains.clone(),
                config.excluded_domains.clone(),
            ),
            heuristic: HeuristicExtractor::new(config.excluded_domains.clone()),
            engines: vec![
                "https://www.bing.com/search".to_string(),
                "https://html.duckduckgo.com/html/".to_string(),
            ],
            candidate_timeout: Duration::from_secs(config.scraping.candidate_timeout_secs),
            max_candidates: config.scraping.max_candidates,
        }
    }

    /// Test hook: point the engine queries at controlled endpoints.
    pub fn with_engines(mut self, engines: Vec<String>) -> Self {
        self.engines = engines;
        self
    }

    /// Harvest candidate URLs from the engine result pages: outbound http
    /// links minus the engines' own domains and the triage denylist, with
    /// known recipe domains moved to the front.
    async fn discover_candidates(&self, query: &str) -> Vec<String> {
        let term = format!("{query} recipe");
        let mut candidates: Vec<String> = Vec::new();

        for engine in &self.engines {
            let Some(search_url) = engine_url(engine, &term) else {
                warn!("Bad search engine base URL: {engine}");
                continue;
            };
            let html = match self.fetcher.fetch(&search_url).await {
                Ok(html) => html,
                Err(err) => {
                    warn!("Search engine fetch failed ({search_url}): {err}");
                    continue;
                }
            };
            for url in harvest_links(&html) {
                if self.gate.is_excluded(&url) {
                    continue;
                }
                if !candidates.contains(&url) {
                    candidates.push(url);
                }
            }
        }

        // Known recipe sites scrape far more reliably; try them first.
        let (known, rest): (Vec<String>, Vec<String>) = candidates
            .into_iter()
            .partition(|url| self.gate.is_known_recipe_site(url));
        let mut ordered = known;
        ordered.extend(rest);
        ordered.truncate(self.max_candidates);
        debug!("Web search found {} candidate URL(s) for '{query}'", ordered.len());
        ordered
    }

    /// Scrape one candidate listing page. Runs under a timeout race in
    /// `search`; a slow target is abandoned, not awaited.
    async fn scrape_candidate(&self, url: &str) -> Vec<RecipeRecord> {
        let html = match self.fetcher.fetch(url).await {
            Ok(html) => html,
            Err(err) => {
                debug!("Candidate fetch failed ({url}): {err}");
                return Vec::new();
            }
        };
        candidate_records(&self.heuristic, url, &html)
    }
}

/// Heuristic extraction over a fetched candidate page, synchronous so the
/// non-`Send` parsed document never crosses an await point.
fn candidate_records(heuristic: &HeuristicExtractor, url: &str, html: &str) -> Vec<RecipeRecord> {
    let stripped = strip_noise(html);
    let context = ParsingContext::new(url, &stripped);
    let source = host_of(url).unwrap_or_default();

    heuristic
        .candidates(&context)
        .into_iter()
        .enumerate()
        .map(|(i, candidate)| {
            let mut record = RecipeRecord::new(format!("recipe-{url}-{i}"), candidate.title);
            record.image = candidate.image;
            record.url = candidate.link;
            record.source = source.clone();
            record.rating = if candidate.rating.is_empty() {
                "4.5/5".to_string()
            } else {
                candidate.rating
            };
            record.total_time = if candidate.time.is_empty() {
                "30 mins".to_string()
            } else {
                candidate.time
            };
            record
        })
        .collect()
}

fn harvest_links(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("a[href^='http']").unwrap();
    document
        .select(&selector)
        .filter_map(|a| a.value().attr("href"))
        // drop tracking parameters the engines append
        .map(|href| href.split('&').next().unwrap_or(href).to_string())
        .collect()
}

/// Engine base URL plus a form-encoded `q` parameter. Reserved characters in
/// the search term must not leak into the URL structure.
fn engine_url(engine: &str, term: &str) -> Option<String> {
    Url::parse_with_params(engine, &[("q", term.trim())])
        .ok()
        .map(|url| url.to_string())
}

#[async_trait]
impl SearchSource for WebSearchSource {
    fn name(&self) -> &'static str {
        "WebSearch"
    }

    async fn search(&self, query: &str, limit: usize) -> Vec<RecipeRecord> {
        let candidates = self.discover_candidates(query).await;
        if candidates.is_empty() {
            return Vec::new();
        }

        // Bounded fan-out: all candidates scraped concurrently, each racing
        // its own timeout so one slow site cannot stall the search.
        let scrapes = candidates.iter().map(|url| async move {
            match tokio::time::timeout(self.candidate_timeout, self.scrape_candidate(url)).await {
                Ok(records) => records,
                Err(_) => {
                    debug!("Candidate scrape timed out: {url}");
                    Vec::new()
                }
            }
        });

        let mut results: Vec<RecipeRecord> = join_all(scrapes).await.into_iter().flatten().collect();
        results.truncate(limit);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::HeuristicExtractor;

    #[test]
    fn test_harvest_links_strips_tracking() {
        let html = r#"
            <a href="https://example.com/recipe?id=1&utm_source=x">one</a>
            <a href="/relative">skip</a>
            <a href="https://other.com/two">two</a>
        "#;
        let links = harvest_links(html);
        assert_eq!(
            links,
            vec!["https://example.com/recipe?id=1", "https://other.com/two"]
        );
    }

    #[test]
    fn test_engine_url_escapes_reserved_characters() {
        let url = engine_url("https://www.bing.com/search", "mac & cheese recipe").unwrap();
        assert_eq!(url, "https://www.bing.com/search?q=mac+%26+cheese+recipe");

        let url = engine_url("https://html.duckduckgo.com/html/", "pasta #1=best").unwrap();
        assert!(!url.contains('#'));
        assert!(!url.contains("=best"));

        assert!(engine_url("not a base url", "x").is_none());
    }

    #[test]
    fn test_candidate_records_fill_placeholders() {
        let heuristic = HeuristicExtractor::new(vec![]);
        let html = r#"
            <div class="recipe-card">
                <h2 class="recipe-title"><a href="/r/1">Smoky Chicken Tacos Recipe</a></h2>
                <p>Mix a teaspoon of cumin into the marinade.</p>
            </div>
        "#;
        let records = candidate_records(&heuristic, "https://blog.example.com/list", html);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rating, "4.5/5");
        assert_eq!(records[0].total_time, "30 mins");
        assert_eq!(records[0].source, "blog.example.com");
        assert_eq!(records[0].id, "recipe-https://blog.example.com/list-0");
    }
}
