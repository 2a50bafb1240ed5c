use crate::config::EdamamConfig;
use crate::fetch::PageFetcher;
use crate::model::RecipeRecord;
use crate::sources::SearchSource;
use async_trait::async_trait;
use log::error;
use serde::Deserialize;

/// Edamam recipe search v2. Disabled unless credentials are configured; when
/// disabled the adapter short-circuits without any network call.
pub struct EdamamSource {
    config: EdamamConfig,
    fetcher: PageFetcher,
}

#[derive(Debug, Deserialize)]
struct EdamamResponse {
    #[serde(default)]
    hits: Vec<EdamamHit>,
}

#[derive(Debug, Deserialize)]
struct EdamamHit {
    recipe: EdamamRecipe,
}

#[derive(Debug, Deserialize)]
struct EdamamRecipe {
    uri: String,
    label: String,
    #[serde(default)]
    image: String,
    #[serde(default)]
    url: String,
    #[serde(rename = "ingredientLines", default)]
    ingredient_lines: Vec<String>,
    #[serde(rename = "totalTime", default)]
    total_time: f64,
    #[serde(rename = "yield", default)]
    servings: f64,
}

impl EdamamSource {
    pub fn new(config: EdamamConfig, fetcher: PageFetcher) -> Self {
        EdamamSource { config, fetcher }
    }

    async fn request(&self, query: &str, limit: usize) -> Result<EdamamResponse, reqwest::Error> {
        self.fetcher
            .client()
            .get(&self.config.base_url)
            .query(&[
                ("type", "public"),
                ("q", query),
                ("app_id", self.config.app_id.as_str()),
                ("app_key", self.config.app_key.as_str()),
                ("from", "0"),
                ("to", limit.to_string().as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

#[async_trait]
impl SearchSource for EdamamSource {
    fn name(&self) -> &'static str {
        "Edamam"
    }

    async fn search(&self, query: &str, limit: usize) -> Vec<RecipeRecord> {
        if !self.config.enabled {
            return Vec::new();
        }

        let response = match self.request(query, limit).await {
            Ok(response) => response,
            Err(err) => {
                error!("Edamam error: {err}");
                return Vec::new();
            }
        };

        response
            .hits
            .into_iter()
            .take(limit)
            .map(|hit| {
                let recipe = hit.recipe;
                // the uri fragment is the stable recipe identifier
                let native_id = recipe
                    .uri
                    .split("#recipe_")
                    .nth(1)
                    .unwrap_or(recipe.uri.as_str());
                let mut record =
                    RecipeRecord::new(format!("edamam-{native_id}"), recipe.label);
                record.image = recipe.image;
                record.url = recipe.url;
                record.ingredients = recipe.ingredient_lines;
                record.source = "Edamam".to_string();
                if recipe.total_time > 0.0 {
                    record.total_time = format!("{} mins", recipe.total_time as u64);
                }
                if recipe.servings > 0.0 {
                    record.servings = format!("{}", recipe.servings as u64);
                }
                record
            })
            .collect()
    }
}
