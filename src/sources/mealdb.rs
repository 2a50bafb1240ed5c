use crate::config::MealDbConfig;
use crate::fetch::PageFetcher;
use crate::model::RecipeRecord;
use crate::sources::SearchSource;
use async_trait::async_trait;
use log::{debug, error};
use serde_json::Value;

/// Primary free adapter: TheMealDB name search. The source carries no rating
/// or timing data, so records get fixed placeholders.
pub struct MealDbSource {
    config: MealDbConfig,
    fetcher: PageFetcher,
}

impl MealDbSource {
    pub fn new(config: MealDbConfig, fetcher: PageFetcher) -> Self {
        MealDbSource { config, fetcher }
    }

    async fn request(&self, query: &str) -> Result<Value, reqwest::Error> {
        self.fetcher
            .client()
            .get(format!("{}/search.php", self.config.base_url))
            .query(&[("s", query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

/// Collapse the API's twenty strIngredientN/strMeasureN slot pairs into
/// "measure ingredient" strings, dropping empty slots.
fn slot_ingredients(meal: &Value) -> Vec<String> {
    let mut out = Vec::new();
    for slot in 1..=20 {
        let ingredient = meal
            .get(format!("strIngredient{slot}"))
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim();
        if ingredient.is_empty() {
            continue;
        }
        let measure = meal
            .get(format!("strMeasure{slot}"))
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim();
        if measure.is_empty() {
            out.push(ingredient.to_string());
        } else {
            out.push(format!("{measure} {ingredient}"));
        }
    }
    out
}

#[async_trait]
impl SearchSource for MealDbSource {
    fn name(&self) -> &'static str {
        "TheMealDB"
    }

    async fn search(&self, query: &str, limit: usize) -> Vec<RecipeRecord> {
        if !self.config.enabled {
            return Vec::new();
        }

        let data = match self.request(query).await {
            Ok(data) => data,
            Err(err) => {
                error!("MealDB error: {err}");
                return Vec::new();
            }
        };

        let Some(meals) = data.get("meals").and_then(Value::as_array) else {
            debug!("MealDB returned no meals for '{query}'");
            return Vec::new();
        };

        meals
            .iter()
            .take(limit)
            .filter_map(|meal| {
                let id = meal.get("idMeal")?.as_str()?;
                let title = meal.get("strMeal")?.as_str()?;
                let mut record = RecipeRecord::new(format!("mealdb-{id}"), title);
                record.image = meal
                    .get("strMealThumb")
                    .and_then(Value::as_str)
                    .unwrap_or("")
                    .to_string();
                record.ingredients = slot_ingredients(meal);
                record.source = "TheMealDB".to_string();
                record.url = format!("https://www.themealdb.com/meal/{id}");
                record.rating = "4.5/5".to_string();
                record.total_time = "30 mins".to_string();
                Some(record)
            })
            .collect()
    }
}
