use serde::Serialize;

/// Canonical recipe record, the unit every source and extractor produces.
///
/// Search adapters return shallow records (title/image/source/url plus rating
/// and time); the scrape pipeline fills in ingredients, instructions and
/// nutrition. Empty strings serialize as `""` rather than being omitted so the
/// payload shape stays stable for clients.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeRecord {
    pub id: String,
    pub title: String,
    pub image: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: String,
    pub cook_time: String,
    pub total_time: String,
    pub servings: String,
    pub rating: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<NutritionFacts>,
    /// Disclaimer attached to template fallback recipes; empty otherwise.
    pub note: String,
    pub source: String,
    pub url: String,
}

impl RecipeRecord {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        RecipeRecord {
            id: id.into(),
            title: title.into(),
            image: String::new(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            prep_time: String::new(),
            cook_time: String::new(),
            total_time: String::new(),
            servings: String::new(),
            rating: String::new(),
            nutrition: None,
            note: String::new(),
            source: String::new(),
            url: String::new(),
        }
    }
}

/// Best-effort nutrition enrichment. Only resolved keys are serialized; a
/// record with nothing resolved carries `None` instead of an empty object.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct NutritionFacts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carbs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fiber: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sugar: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sodium: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<f64>,
}

impl NutritionFacts {
    pub fn is_empty(&self) -> bool {
        self.calories.is_none()
            && self.protein.is_none()
            && self.fat.is_none()
            && self.carbs.is_none()
            && self.fiber.is_none()
            && self.sugar.is_none()
            && self.sodium.is_none()
            && self.cholesterol.is_none()
            && self.servings.is_none()
    }

    pub fn set(&mut self, key: &str, value: f64) {
        match key {
            "calories" => self.calories = Some(value),
            "protein" => self.protein = Some(value),
            "fat" => self.fat = Some(value),
            "carbs" => self.carbs = Some(value),
            "fiber" => self.fiber = Some(value),
            "sugar" => self.sugar = Some(value),
            "sodium" => self.sodium = Some(value),
            "cholesterol" => self.cholesterol = Some(value),
            "servings" => self.servings = Some(value),
            _ => {}
        }
    }
}

/// Raw extractor output before normalization. Extractors fill whatever fields
/// the page offers; the pipeline cleans and promotes the draft to a record.
#[derive(Debug, Clone, Default)]
pub struct RecipeDraft {
    pub title: String,
    pub image: String,
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub prep_time: String,
    pub cook_time: String,
    pub total_time: String,
    pub servings: String,
    pub rating: String,
    pub nutrition: Option<serde_json::Value>,
    pub link: String,
}

impl RecipeDraft {
    pub fn has_content(&self) -> bool {
        !self.ingredients.is_empty() || !self.instructions.is_empty()
    }
}

/// Response envelope for the search endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultSet {
    pub recipes: Vec<RecipeRecord>,
    pub query: String,
    pub total: usize,
    pub has_more: bool,
    pub is_fallback: bool,
    pub message: String,
}

/// Liveness payload for `/api/hello`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub msg: String,
    pub cache_entries: usize,
    pub rate_limit_entries: usize,
}
