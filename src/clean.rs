//! Text normalization helpers shared by extractors, adapters and the pipeline.
//!
//! Every function here is pure and total: bad input yields an empty string or
//! `None`, never an error.

use crate::model::NutritionFacts;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// First numeric token in a string, thousands separators included.
static LEADING_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d[\d,]*(?:\.\d+)?").expect("invalid number regex"));

/// Markers of scraped noise that must never survive into ingredient lists:
/// section headings, ad injections, nutrition tables, unit toggles.
const INGREDIENT_NOISE: &[&str] = &[
    "Ingredients",
    "Instructions",
    "Nutrition",
    "Ad(",
    "Advertisement",
    "Cups",
    "Metric",
    "Subscribe",
];

const INSTRUCTION_NOISE: &[&str] = &[
    "Ingredients",
    "Instructions",
    "Nutrition",
    "Ad(",
    "Advertisement",
    "Subscribe",
];

/// Collapse whitespace runs, strip characters outside the conservative
/// allow-set (letters, digits, `-.,!?()`), trim and cap at `max_len` chars.
pub fn clean_text(text: &str, max_len: usize) -> String {
    let kept: String = text
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '.' | ',' | '!' | '?' | '(' | ')'))
        .collect();

    let mut out = String::with_capacity(kept.len());
    let mut last_space = true;
    for c in kept.chars() {
        if c == ' ' {
            if !last_space {
                out.push(' ');
            }
            last_space = true;
        } else {
            out.push(c);
            last_space = false;
        }
    }
    let trimmed = out.trim_end();
    trimmed.chars().take(max_len).collect()
}

pub fn clean_title(title: &str) -> String {
    clean_text(title, 100)
}

/// Timing and yield fields are capped tighter than titles.
pub fn clean_time(value: &str) -> String {
    clean_text(value, 50)
}

pub fn clean_ingredients<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    clean_list(items, 3, 150, INGREDIENT_NOISE)
}

pub fn clean_instructions<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    clean_list(items, 10, 500, INSTRUCTION_NOISE)
}

fn clean_list<I, S>(items: I, min_len: usize, max_len: usize, noise: &[&str]) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = Vec::new();
    for item in items {
        let cleaned = clean_text(item.as_ref(), max_len);
        if cleaned.chars().count() < min_len {
            continue;
        }
        if noise.iter().any(|marker| cleaned.contains(marker)) {
            continue;
        }
        if !seen.contains(&cleaned) {
            seen.push(cleaned);
        }
    }
    seen
}

/// Alias spellings accepted for each canonical nutrition key. Keys in the raw
/// mapping are folded to lowercase alphanumerics before matching.
const NUTRITION_ALIASES: &[(&str, &[&str])] = &[
    ("calories", &["calories", "energy", "kcal"]),
    ("protein", &["protein"]),
    ("fat", &["fat", "totalfat"]),
    ("carbs", &["carbs", "carbohydrate", "carbohydrates"]),
    ("fiber", &["fiber", "fibre"]),
    ("sugar", &["sugar"]),
    ("sodium", &["sodium", "salt"]),
    ("cholesterol", &["cholesterol"]),
    ("servings", &["servings", "servingsize", "yield"]),
];

/// Best-effort nutrition resolution over an arbitrary JSON mapping, recursing
/// one level into nested objects. Returns `None` when nothing resolves.
pub fn clean_nutrition(raw: &Value) -> Option<NutritionFacts> {
    let mut facts = NutritionFacts::default();
    collect_nutrition(raw, &mut facts, 0);
    if facts.is_empty() {
        None
    } else {
        Some(facts)
    }
}

fn collect_nutrition(value: &Value, facts: &mut NutritionFacts, depth: usize) {
    let Some(map) = value.as_object() else {
        return;
    };
    for (key, entry) in map {
        let folded: String = key
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_lowercase();
        for (canonical, aliases) in NUTRITION_ALIASES {
            if aliases.iter().any(|alias| folded.contains(alias)) {
                if let Some(number) = numeric_value(entry) {
                    facts.set(canonical, number);
                }
                break;
            }
        }
        if entry.is_object() && depth == 0 {
            collect_nutrition(entry, facts, 1);
        }
    }
}

fn numeric_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => extract_leading_number(s),
        _ => None,
    }
}

/// "1,240 kcal" -> 1240.0; "about 35g protein" -> 35.0.
pub fn extract_leading_number(text: &str) -> Option<f64> {
    let matched = LEADING_NUMBER.find(text)?;
    matched.as_str().replace(',', "").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_clean_text_collapses_whitespace() {
        let cleaned = clean_text("  Chicken\t\nParmesan\r\n  ", 100);
        assert_eq!(cleaned, "Chicken Parmesan");
        assert!(!cleaned.contains('\t'));
        assert!(!cleaned.contains('\n'));
    }

    #[test]
    fn test_clean_text_strips_disallowed_characters() {
        assert_eq!(
            clean_text("Spicy <b>Tofu</b> ★ (vegan!) — 30%", 100),
            "Spicy bTofub (vegan!) 30"
        );
    }

    #[test]
    fn test_clean_text_respects_cap() {
        let long = "a".repeat(500);
        assert_eq!(clean_text(&long, 100).chars().count(), 100);
        assert_eq!(clean_title(&long).chars().count(), 100);
        assert_eq!(clean_time(&long).chars().count(), 50);
    }

    #[test]
    fn test_clean_text_empty_input() {
        assert_eq!(clean_text("", 100), "");
        assert_eq!(clean_text("   \t\n  ", 100), "");
    }

    #[test]
    fn test_clean_ingredients_filters_and_dedupes() {
        let items = vec![
            "2 cups flour",
            "a",
            "2 cups flour",
            "Nutrition Facts per serving",
            "1 tsp   salt",
        ];
        assert_eq!(
            clean_ingredients(items),
            vec!["2 cups flour", "1 tsp salt"]
        );
    }

    #[test]
    fn test_clean_instructions_length_bounds() {
        let long = "x".repeat(600);
        let items = vec![
            "Stir.",
            "Simmer the sauce over low heat for ten minutes.",
            long.as_str(),
        ];
        let cleaned = clean_instructions(items);
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0], "Simmer the sauce over low heat for ten minutes.");
        assert_eq!(cleaned[1].chars().count(), 500);
    }

    #[test]
    fn test_clean_lists_are_idempotent() {
        let items = vec![
            "Preheat the oven to 180C and butter the tin.",
            "Preheat the oven to 180C and butter the tin.",
            "Fold in the chocolate and bake for 25 minutes.",
        ];
        let once = clean_instructions(items);
        let twice = clean_instructions(once.iter().map(String::as_str));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clean_nutrition_aliases_and_units() {
        let raw = json!({
            "caloriesContent": "1,240 kcal",
            "proteinContent": "35g",
            "fatContent": 12.5,
            "unrelated": "hello"
        });
        let facts = clean_nutrition(&raw).unwrap();
        assert_eq!(facts.calories, Some(1240.0));
        assert_eq!(facts.protein, Some(35.0));
        assert_eq!(facts.fat, Some(12.5));
        assert_eq!(facts.sugar, None);
    }

    #[test]
    fn test_clean_nutrition_nested_one_level() {
        let raw = json!({
            "nutrition": { "sodium": "480 mg", "sugarContent": "9g" }
        });
        let facts = clean_nutrition(&raw).unwrap();
        assert_eq!(facts.sodium, Some(480.0));
        assert_eq!(facts.sugar, Some(9.0));
    }

    #[test]
    fn test_clean_nutrition_unresolved_is_none() {
        assert!(clean_nutrition(&json!({ "flavor": "great" })).is_none());
        assert!(clean_nutrition(&json!("not an object")).is_none());
    }

    #[test]
    fn test_extract_leading_number() {
        assert_eq!(extract_leading_number("250 kcal"), Some(250.0));
        assert_eq!(extract_leading_number("about 1,500 mg"), Some(1500.0));
        assert_eq!(extract_leading_number("12.5g fat"), Some(12.5));
        assert_eq!(extract_leading_number("no digits"), None);
    }
}
