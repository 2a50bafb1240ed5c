use crate::config::AppConfig;
use crate::fetch::PageFetcher;
use crate::model::RecipeRecord;
use async_trait::async_trait;

mod edamam;
mod mealdb;
mod spoonacular;
mod websearch;

pub use self::edamam::EdamamSource;
pub use self::mealdb::MealDbSource;
pub use self::spoonacular::SpoonacularSource;
pub use self::websearch::WebSearchSource;

/// One external recipe provider normalized into the common record shape.
///
/// Adapters fail soft: network and decode errors are logged and answered
/// with an empty list, so one broken source never aborts an aggregation.
#[async_trait]
pub trait SearchSource: Send + Sync {
    fn name(&self) -> &'static str;
    async fn search(&self, query: &str, limit: usize) -> Vec<RecipeRecord>;
}

/// Build the adapter list in priority order: the free API first (most
/// reliable, cheapest), the key-gated APIs next, web search last since it
/// fans out into live page scrapes.
pub fn build_sources(config: &AppConfig, fetcher: &PageFetcher) -> Vec<Box<dyn SearchSource>> {
    vec![
        Box::new(MealDbSource::new(config.mealdb.clone(), fetcher.clone())),
        Box::new(EdamamSource::new(config.edamam.clone(), fetcher.clone())),
        Box::new(SpoonacularSource::new(
            config.spoonacular.clone(),
            fetcher.clone(),
        )),
        Box::new(WebSearchSource::new(config, fetcher.clone())),
    ]
}
