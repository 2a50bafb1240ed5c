use crate::error::ScoutError;
use crate::extractors::{Extractor, ParsingContext};
use crate::model::RecipeDraft;
use log::debug;
use scraper::{ElementRef, Selector};
use serde_json::{Map, Value};

/// Secondary structured-data pass: element-level microdata annotations
/// (`itemtype` containing "Recipe", fields via `itemprop`). Runs only when no
/// JSON-LD block qualifies.
pub struct MicroDataExtractor;

impl MicroDataExtractor {
    fn find_recipe_container<'a>(&self, document: &'a scraper::Html) -> Option<ElementRef<'a>> {
        let selector = Selector::parse("[itemscope]").unwrap();
        for element in document.select(&selector) {
            if let Some(itemtype) = element.value().attr("itemtype") {
                if itemtype.contains("Recipe") {
                    return Some(element);
                }
            }
        }
        None
    }

    fn get_itemprop(&self, root: ElementRef, prop: &str) -> Option<String> {
        let selector = Selector::parse(&format!("[itemprop='{prop}']")).unwrap();
        root.select(&selector)
            .next()
            .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
            .filter(|text| !text.is_empty())
    }

    fn get_itemprop_list(&self, root: ElementRef, prop: &str) -> Vec<String> {
        let selector = Selector::parse(&format!("[itemprop='{prop}']")).unwrap();
        root.select(&selector)
            .map(|el| el.text().collect::<Vec<_>>().join(" ").trim().to_string())
            .filter(|text| !text.is_empty())
            .collect()
    }
}

impl Extractor for MicroDataExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<RecipeDraft, ScoutError> {
        debug!("Attempting microdata extraction for {}", context.url);

        // A Recipe container is required. Global itemprop searches pick up
        // unrelated page content (site title, author bio, ads) when not
        // scoped to a schema.org Recipe item.
        let Some(container) = self.find_recipe_container(&context.document) else {
            return Err(ScoutError::ParseError(
                "No microdata Recipe container found".to_string(),
            ));
        };

        let Some(name) = self.get_itemprop(container, "name") else {
            return Err(ScoutError::ParseError(
                "Could not extract recipe name".to_string(),
            ));
        };

        // Image may be an <img src> or a plain text itemprop
        let image_selector = Selector::parse("[itemprop='image']").unwrap();
        let image = container
            .select(&image_selector)
            .next()
            .map(|el| match el.value().attr("src") {
                Some(src) => src.to_string(),
                None => el.text().collect::<Vec<_>>().join(" ").trim().to_string(),
            })
            .unwrap_or_default();

        let mut ingredients = self.get_itemprop_list(container, "recipeIngredient");
        if ingredients.is_empty() {
            // older data-vocabulary spelling
            ingredients = self.get_itemprop_list(container, "ingredients");
        }

        let mut instructions = self.get_itemprop_list(container, "recipeInstructions");
        if instructions.is_empty() {
            instructions = self.get_itemprop_list(container, "instructions");
        }

        if ingredients.is_empty() && instructions.is_empty() {
            return Err(ScoutError::ParseError(
                "Could not extract recipe content".to_string(),
            ));
        }

        // Nutrition itemprops become a flat JSON mapping for the normalizer
        let mut nutrition = Map::new();
        for prop in ["calories", "proteinContent", "fatContent", "carbohydrateContent", "fiberContent", "sugarContent", "sodiumContent", "cholesterolContent"] {
            if let Some(value) = self.get_itemprop(container, prop) {
                nutrition.insert(prop.to_string(), Value::String(value));
            }
        }

        Ok(RecipeDraft {
            title: name,
            image,
            ingredients,
            instructions,
            prep_time: self.get_itemprop(container, "prepTime").unwrap_or_default(),
            cook_time: self.get_itemprop(container, "cookTime").unwrap_or_default(),
            total_time: self.get_itemprop(container, "totalTime").unwrap_or_default(),
            servings: self
                .get_itemprop(container, "recipeYield")
                .unwrap_or_default(),
            nutrition: if nutrition.is_empty() {
                None
            } else {
                Some(Value::Object(nutrition))
            },
            ..RecipeDraft::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn context(html: &str) -> ParsingContext {
        ParsingContext {
            url: "https://www.simplyrecipes.com/x".to_string(),
            document: Html::parse_document(html),
        }
    }

    #[test]
    fn test_parse_microdata_recipe() {
        let html = r#"
            <div itemscope itemtype="https://schema.org/Recipe">
                <h1 itemprop="name">Lemon Chicken</h1>
                <img itemprop="image" src="https://example.com/lemon.jpg">
                <li itemprop="recipeIngredient">2 chicken breasts</li>
                <li itemprop="recipeIngredient">1 lemon</li>
                <li itemprop="recipeInstructions">Season the chicken well.</li>
                <li itemprop="recipeInstructions">Roast for 40 minutes.</li>
                <span itemprop="prepTime">10 mins</span>
                <span itemprop="recipeYield">4</span>
                <span itemprop="calories">320 kcal</span>
            </div>
        "#;
        let draft = MicroDataExtractor.parse(&context(html)).unwrap();

        assert_eq!(draft.title, "Lemon Chicken");
        assert_eq!(draft.image, "https://example.com/lemon.jpg");
        assert_eq!(draft.ingredients, vec!["2 chicken breasts", "1 lemon"]);
        assert_eq!(
            draft.instructions,
            vec!["Season the chicken well.", "Roast for 40 minutes."]
        );
        assert_eq!(draft.prep_time, "10 mins");
        assert_eq!(draft.servings, "4");
        assert!(draft.nutrition.is_some());
    }

    #[test]
    fn test_no_container_is_error() {
        let html = r#"<div><span itemprop="name">Site Title</span></div>"#;
        assert!(MicroDataExtractor.parse(&context(html)).is_err());
    }

    #[test]
    fn test_container_without_content_is_error() {
        let html = r#"
            <div itemscope itemtype="https://schema.org/Recipe">
                <h1 itemprop="name">Empty Recipe</h1>
            </div>
        "#;
        assert!(MicroDataExtractor.parse(&context(html)).is_err());
    }
}
