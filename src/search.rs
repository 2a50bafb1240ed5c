//! Multi-source aggregation: fan out to adapters in priority order, merge,
//! deduplicate, truncate, and degrade to curated content when everything
//! comes back empty. The endpoint never returns an empty, unexplained set.

use crate::config::AppConfig;
use crate::fallback;
use crate::fetch::PageFetcher;
use crate::model::{RecipeRecord, SearchResultSet};
use crate::sources::{build_sources, SearchSource};
use log::{debug, info};

/// Absolute cap on requested result counts.
pub const MAX_LIMIT: usize = 10;

pub struct SearchAggregator {
    sources: Vec<Box<dyn SearchSource>>,
}

impl SearchAggregator {
    pub fn new(config: &AppConfig, fetcher: &PageFetcher) -> Self {
        SearchAggregator {
            sources: build_sources(config, fetcher),
        }
    }

    /// Test hook: run the aggregation policy over arbitrary adapters.
    pub fn with_sources(sources: Vec<Box<dyn SearchSource>>) -> Self {
        SearchAggregator { sources }
    }

    pub async fn search(&self, query: &str, limit: usize) -> SearchResultSet {
        let limit = limit.clamp(1, MAX_LIMIT);
        let mut results: Vec<RecipeRecord> = Vec::new();

        // Adapters run in priority order. The primary adapter is always
        // attempted; later (costlier) ones only when still under-filled.
        for (index, source) in self.sources.iter().enumerate() {
            if index > 0 && results.len() >= limit {
                break;
            }
            let remaining = limit - results.len().min(limit);
            let found = source.search(query, remaining.max(1)).await;
            debug!("{} returned {} result(s) for '{query}'", source.name(), found.len());
            results.extend(found);
        }

        let mut recipes = dedupe_by_title_source(results);
        recipes.truncate(limit);

        if recipes.is_empty() {
            info!("No live results for '{query}', serving curated fallback");
            let mut curated = fallback::curated_recipes(query);
            curated.truncate(limit);
            let total = curated.len();
            return SearchResultSet {
                recipes: curated,
                query: query.to_string(),
                total,
                has_more: false,
                is_fallback: true,
                message: format!(
                    "Couldn't find live recipes for \"{query}\". Here are some curated suggestions:"
                ),
            };
        }

        let total = recipes.len();
        // has_more only signals that a larger request might return more; it
        // does not reflect true source exhaustion.
        let has_more = limit < MAX_LIMIT && total >= limit;
        SearchResultSet {
            recipes,
            query: query.to_string(),
            total,
            has_more,
            is_fallback: false,
            message: format!("Found {total} recipes from the web for \"{query}\""),
        }
    }
}

/// Drop later duplicates sharing a case-insensitive (title, source) key,
/// keeping first-seen order.
pub fn dedupe_by_title_source(records: Vec<RecipeRecord>) -> Vec<RecipeRecord> {
    let mut seen: Vec<(String, String)> = Vec::new();
    let mut unique = Vec::new();
    for record in records {
        let key = (record.title.to_lowercase(), record.source.clone());
        if !seen.contains(&key) {
            seen.push(key);
            unique.push(record);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FixedSource {
        name: &'static str,
        records: Vec<RecipeRecord>,
    }

    #[async_trait]
    impl SearchSource for FixedSource {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn search(&self, _query: &str, limit: usize) -> Vec<RecipeRecord> {
            self.records.iter().take(limit).cloned().collect()
        }
    }

    fn record(id: &str, title: &str, source: &str) -> RecipeRecord {
        let mut r = RecipeRecord::new(id, title);
        r.source = source.to_string();
        r
    }

    fn fixed(name: &'static str, records: Vec<RecipeRecord>) -> Box<dyn SearchSource> {
        Box::new(FixedSource { name, records })
    }

    #[test]
    fn test_dedupe_keeps_first_seen() {
        let records = vec![
            record("a", "Pad Thai", "TheMealDB"),
            record("b", "pad thai", "TheMealDB"),
            record("c", "Pad Thai", "Edamam"),
        ];
        let unique = dedupe_by_title_source(records);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].id, "a");
        assert_eq!(unique[1].id, "c");
    }

    #[tokio::test]
    async fn test_search_respects_limit() {
        let many: Vec<_> = (0..20)
            .map(|i| record(&format!("id-{i}"), &format!("Recipe {i}"), "TheMealDB"))
            .collect();
        let aggregator = SearchAggregator::with_sources(vec![fixed("TheMealDB", many)]);
        for limit in 1..=10 {
            let set = aggregator.search("pasta", limit).await;
            assert!(set.recipes.len() <= limit);
        }
    }

    #[tokio::test]
    async fn test_secondary_sources_skipped_when_filled() {
        let primary: Vec<_> = (0..5)
            .map(|i| record(&format!("p-{i}"), &format!("Primary {i}"), "TheMealDB"))
            .collect();
        let secondary = vec![record("s-0", "Secondary", "Edamam")];
        let aggregator = SearchAggregator::with_sources(vec![
            fixed("TheMealDB", primary),
            fixed("Edamam", secondary),
        ]);
        let set = aggregator.search("pasta", 5).await;
        assert!(set.recipes.iter().all(|r| r.source == "TheMealDB"));
        assert!(!set.is_fallback);
        assert!(set.has_more);
    }

    #[tokio::test]
    async fn test_under_filled_pulls_from_secondary() {
        let aggregator = SearchAggregator::with_sources(vec![
            fixed("TheMealDB", vec![record("p-0", "Primary", "TheMealDB")]),
            fixed("Edamam", vec![record("s-0", "Secondary", "Edamam")]),
        ]);
        let set = aggregator.search("pasta", 5).await;
        assert_eq!(set.recipes.len(), 2);
        assert!(!set.has_more);
    }

    #[tokio::test]
    async fn test_empty_sources_degrade_to_curated_fallback() {
        let aggregator =
            SearchAggregator::with_sources(vec![fixed("TheMealDB", Vec::new())]);
        let set = aggregator.search("xyzzy gibberish", 3).await;
        assert_eq!(set.recipes.len(), 3);
        assert!(set.is_fallback);
        assert!(!set.has_more);
        assert!(set.message.contains("curated"));
    }

    #[tokio::test]
    async fn test_fallback_bucket_matches_query_topic() {
        let aggregator =
            SearchAggregator::with_sources(vec![fixed("TheMealDB", Vec::new())]);
        let set = aggregator.search("pasta", 3).await;
        assert_eq!(set.recipes.len(), 3);
        assert!(set.is_fallback);
        assert!(set.recipes.iter().all(|r| r.id.starts_with("pasta-")));
    }

    #[tokio::test]
    async fn test_limit_is_clamped() {
        let many: Vec<_> = (0..30)
            .map(|i| record(&format!("id-{i}"), &format!("Recipe {i}"), "TheMealDB"))
            .collect();
        let aggregator = SearchAggregator::with_sources(vec![fixed("TheMealDB", many)]);
        let set = aggregator.search("pasta", 50).await;
        assert_eq!(set.recipes.len(), MAX_LIMIT);
        assert!(!set.has_more);
    }
}
