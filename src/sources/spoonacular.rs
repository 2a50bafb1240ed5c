use crate::config::SpoonacularConfig;
use crate::fetch::PageFetcher;
use crate::model::RecipeRecord;
use crate::sources::SearchSource;
use async_trait::async_trait;
use log::error;
use serde::Deserialize;

/// Spoonacular complexSearch. Disabled without an API key; when disabled the
/// adapter short-circuits without any network call.
pub struct SpoonacularSource {
    config: SpoonacularConfig,
    fetcher: PageFetcher,
}

#[derive(Debug, Deserialize)]
struct SpoonacularResponse {
    #[serde(default)]
    results: Vec<SpoonacularRecipe>,
}

#[derive(Debug, Deserialize)]
struct SpoonacularRecipe {
    id: u64,
    title: String,
    #[serde(default)]
    image: String,
    #[serde(rename = "sourceUrl", default)]
    source_url: String,
    #[serde(rename = "spoonacularScore", default)]
    score: f64,
    #[serde(rename = "readyInMinutes", default)]
    ready_in_minutes: u64,
}

impl SpoonacularSource {
    pub fn new(config: SpoonacularConfig, fetcher: PageFetcher) -> Self {
        SpoonacularSource { config, fetcher }
    }

    async fn request(
        &self,
        query: &str,
        limit: usize,
    ) -> Result<SpoonacularResponse, reqwest::Error> {
        self.fetcher
            .client()
            .get(format!("{}/complexSearch", self.config.base_url))
            .query(&[
                ("query", query),
                ("number", limit.to_string().as_str()),
                ("apiKey", self.config.api_key.as_str()),
                ("addRecipeInformation", "true"),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl SearchSource for SpoonacularSource {
    fn name(&self) -> &'static str {
        "Spoonacular"
    }

    async fn search(&self, query: &str, limit: usize) -> Vec<RecipeRecord> {
        if !self.config.enabled {
            return Vec::new();
        }

        let response = match self.request(query, limit).await {
            Ok(response) => response,
            Err(err) => {
                error!("Spoonacular error: {err}");
                return Vec::new();
            }
        };

        response
            .results
            .into_iter()
            .take(limit)
            .map(|recipe| {
                let mut record =
                    RecipeRecord::new(format!("spoonacular-{}", recipe.id), recipe.title);
                record.image = recipe.image;
                record.url = recipe.source_url;
                record.source = "Spoonacular".to_string();
                // provider scores 0-100; divide by 20 to approximate stars
                if recipe.score > 0.0 {
                    record.rating = format!("{:.1}/5", recipe.score / 20.0);
                }
                if recipe.ready_in_minutes > 0 {
                    record.total_time = format!("{} mins", recipe.ready_in_minutes);
                }
                record
            })
            .collect()
    }
}
