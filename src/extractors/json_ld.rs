use crate::error::ScoutError;
use crate::extractors::{Extractor, ParsingContext};
use crate::model::RecipeDraft;
use html_escape::decode_html_entities;
use log::debug;
use scraper::Selector;
use serde::Deserialize;
use serde_json::Value;

/// Extracts recipes from `application/ld+json` script blocks. When a page
/// embeds schema.org Recipe markup this is authoritative and skips all
/// heuristic guessing.
pub struct JsonLdExtractor;

#[derive(Debug, Deserialize)]
struct JsonLdRecipe {
    name: String,
    #[serde(default)]
    image: ImageType,
    #[serde(rename = "recipeIngredient", default)]
    recipe_ingredient: Vec<String>,
    #[serde(rename = "recipeInstructions", default)]
    recipe_instructions: RecipeInstructions,
    #[serde(rename = "prepTime", default)]
    prep_time: Option<String>,
    #[serde(rename = "cookTime", default)]
    cook_time: Option<String>,
    #[serde(rename = "totalTime", default)]
    total_time: Option<String>,
    #[serde(rename = "recipeYield", default)]
    recipe_yield: Option<YieldType>,
    #[serde(default)]
    nutrition: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct ImageObject {
    url: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(untagged)]
enum ImageType {
    #[default]
    None,
    String(String),
    Object(ImageObject),
    MultipleStrings(Vec<String>),
    MultipleObjects(Vec<ImageObject>),
}

#[derive(Debug, Deserialize)]
struct InstructionObject {
    #[serde(default)]
    text: Option<String>,
    #[serde(rename = "itemListElement", default)]
    item_list_element: Vec<InstructionStep>,
}

#[derive(Debug, Deserialize)]
struct InstructionStep {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(untagged)]
enum RecipeInstructions {
    #[default]
    None,
    String(String),
    Multiple(Vec<String>),
    MultipleObject(Vec<InstructionObject>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YieldType {
    String(String),
    Number(f64),
    Multiple(Vec<String>),
}

fn decode_html_symbols(text: &str) -> String {
    // some sites double-encode entities
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

impl From<JsonLdRecipe> for RecipeDraft {
    fn from(recipe: JsonLdRecipe) -> Self {
        let image = match recipe.image {
            ImageType::None => String::new(),
            ImageType::String(img) => img,
            ImageType::Object(img) => img.url,
            ImageType::MultipleStrings(imgs) => imgs.into_iter().next().unwrap_or_default(),
            ImageType::MultipleObjects(imgs) => {
                imgs.into_iter().next().map(|i| i.url).unwrap_or_default()
            }
        };

        let instructions = match recipe.recipe_instructions {
            RecipeInstructions::None => Vec::new(),
            RecipeInstructions::String(text) => vec![decode_html_symbols(&text)],
            RecipeInstructions::Multiple(steps) => steps
                .into_iter()
                .map(|step| decode_html_symbols(&step))
                .collect(),
            RecipeInstructions::MultipleObject(objects) => objects
                .into_iter()
                .flat_map(|obj| {
                    let mut texts = Vec::new();
                    if let Some(text) = obj.text {
                        texts.push(text);
                    }
                    for step in obj.item_list_element {
                        if let Some(text) = step.text {
                            texts.push(text);
                        }
                    }
                    texts
                })
                .map(|text| decode_html_symbols(&text))
                .collect(),
        };

        RecipeDraft {
            title: decode_html_symbols(&recipe.name),
            image,
            ingredients: recipe
                .recipe_ingredient
                .into_iter()
                .map(|ing| decode_html_symbols(&ing))
                .collect(),
            instructions: instructions
                .into_iter()
                .filter(|step| !step.trim().is_empty())
                .collect(),
            prep_time: recipe.prep_time.unwrap_or_default(),
            cook_time: recipe.cook_time.unwrap_or_default(),
            total_time: recipe.total_time.unwrap_or_default(),
            servings: match recipe.recipe_yield {
                Some(YieldType::String(s)) => s,
                Some(YieldType::Number(n)) => n.to_string(),
                Some(YieldType::Multiple(items)) => items.into_iter().next().unwrap_or_default(),
                None => String::new(),
            },
            nutrition: recipe.nutrition,
            ..RecipeDraft::default()
        }
    }
}

/// Clean JSON strings before parsing: leading cruft, trailing commas, stray
/// HTML comments. Real-world script blocks carry all of these.
fn sanitize_json(json_str: &str) -> String {
    let mut cleaned = json_str.trim().to_string();

    if !cleaned.starts_with('{') && !cleaned.starts_with('[') {
        if let Some(start) = cleaned.find('{') {
            cleaned = cleaned[start..].to_string();
        }
    }

    cleaned = cleaned.replace(",]", "]").replace(",}", "}");
    cleaned = cleaned.replace("<!--", "").replace("-->", "");

    cleaned
}

/// True when a JSON-LD node declares itself a Recipe, in either the singleton
/// (`"@type": "Recipe"`) or array (`"@type": ["Recipe", "NewsArticle"]`) form.
fn declares_recipe_type(item: &Value) -> bool {
    match item.get("@type") {
        Some(Value::String(t)) => t.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(Value::as_str)
            .any(|t| t.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

/// Finds the first Recipe node in a parsed JSON-LD document, looking through
/// top-level arrays and `@graph` wrappers.
fn find_recipe_node(json_ld: &Value) -> Option<&Value> {
    if declares_recipe_type(json_ld) {
        return Some(json_ld);
    }
    if let Some(items) = json_ld.as_array() {
        return items.iter().find(|item| declares_recipe_type(item));
    }
    if let Some(graph) = json_ld.get("@graph").and_then(Value::as_array) {
        return graph.iter().find(|item| declares_recipe_type(item));
    }
    None
}

impl Extractor for JsonLdExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<RecipeDraft, ScoutError> {
        let selector = Selector::parse("script[type='application/ld+json']").unwrap();

        // Try each script element until one yields a valid recipe; malformed
        // blocks are skipped, never fatal.
        for script in context.document.select(&selector) {
            let cleaned_json = sanitize_json(&script.inner_html());
            let Ok(json_ld) = serde_json::from_str::<Value>(&cleaned_json) else {
                continue;
            };

            if let Some(node) = find_recipe_node(&json_ld) {
                match serde_json::from_value::<JsonLdRecipe>(node.clone()) {
                    Ok(recipe) => {
                        debug!("Found JSON-LD recipe: {}", recipe.name);
                        return Ok(RecipeDraft::from(recipe));
                    }
                    Err(err) => {
                        debug!("Skipping malformed JSON-LD recipe node: {err}");
                    }
                }
            }
        }

        Err(ScoutError::ParseError(
            "No valid recipe found in any JSON-LD script".to_string(),
        ))
    }
}
