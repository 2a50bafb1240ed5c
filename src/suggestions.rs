//! Query completions: recent-search history, a static popular list,
//! ingredient-name matches and cuisine/cooking-method keywords, ranked in
//! that order.

use std::collections::VecDeque;
use std::sync::Mutex;

const MAX_RECENT_SEARCHES: usize = 50;

const POPULAR_RECIPES: &[&str] = &[
    "chicken breast recipes", "pasta recipes", "chocolate cake", "beef stir fry",
    "salmon recipes", "pizza dough", "banana bread", "chicken curry",
    "spaghetti carbonara", "chocolate chip cookies", "fried rice", "tacos",
    "lasagna", "pancakes", "meatballs", "caesar salad", "apple pie",
    "chicken soup", "grilled cheese", "mac and cheese", "french toast",
    "chicken parmesan", "beef stroganoff", "chicken alfredo", "cheesecake",
    "garlic bread", "chicken teriyaki", "vegetable curry", "fish and chips",
    "chicken quesadilla", "mushroom risotto", "chicken wings", "beef tacos",
    "shrimp scampi", "chicken noodle soup", "chocolate brownies", "pad thai",
    "chicken tikka masala", "beef chili", "chicken salad", "veggie burgers",
];

const COMMON_INGREDIENTS: &[&str] = &[
    "chicken", "beef", "pork", "fish", "salmon", "shrimp", "pasta", "rice",
    "potatoes", "tomatoes", "onions", "garlic", "cheese", "eggs", "milk",
    "flour", "sugar", "salt", "pepper", "olive oil", "butter", "lemon",
    "mushrooms", "spinach", "broccoli", "carrots", "bell peppers",
];

const CUISINES: &[&str] = &[
    "italian", "chinese", "mexican", "indian", "thai", "japanese", "french",
    "mediterranean", "american", "korean", "greek", "spanish", "vietnamese",
];

const COOKING_METHODS: &[&str] = &[
    "grilled", "baked", "fried", "roasted", "steamed", "boiled", "sauteed",
    "slow cooked", "pressure cooked", "air fried", "pan fried",
];

pub struct SuggestionEngine {
    recent: Mutex<VecDeque<String>>,
}

impl SuggestionEngine {
    pub fn new() -> Self {
        SuggestionEngine {
            recent: Mutex::new(VecDeque::new()),
        }
    }

    /// Record a search; most recent sits at the front, repeats move forward,
    /// the history is bounded.
    pub fn record_search(&self, query: &str) {
        let cleaned = query.trim().to_lowercase();
        if cleaned.is_empty() {
            return;
        }
        let mut recent = self.recent.lock().unwrap();
        recent.retain(|q| q != &cleaned);
        recent.push_front(cleaned);
        recent.truncate(MAX_RECENT_SEARCHES);
    }

    pub fn recent_searches(&self) -> Vec<String> {
        self.recent.lock().unwrap().iter().cloned().collect()
    }

    pub fn suggest(&self, query: &str, limit: usize) -> Vec<String> {
        let cleaned = query.trim().to_lowercase();
        if cleaned.is_empty() {
            return POPULAR_RECIPES
                .iter()
                .take(limit)
                .map(ToString::to_string)
                .collect();
        }

        let mut suggestions: Vec<String> = Vec::new();

        for recent in self.recent.lock().unwrap().iter() {
            if recent.contains(&cleaned) {
                suggestions.push(recent.clone());
            }
        }

        for popular in POPULAR_RECIPES {
            if popular.contains(&cleaned) {
                suggestions.push(popular.to_string());
            }
        }

        for ingredient in COMMON_INGREDIENTS {
            if ingredient.contains(&cleaned)
                && !suggestions.iter().any(|s| s.contains(ingredient))
            {
                suggestions.push(format!("{ingredient} recipes"));
            }
        }

        for cuisine in CUISINES {
            if cuisine.contains(&cleaned) && !suggestions.iter().any(|s| s.contains(cuisine)) {
                suggestions.push(format!("{cuisine} recipes"));
            }
        }

        for method in COOKING_METHODS {
            if method.contains(&cleaned) && !suggestions.iter().any(|s| s.contains(method)) {
                suggestions.push(format!("{method} recipes"));
            }
        }

        let mut unique: Vec<String> = Vec::new();
        for suggestion in suggestions {
            let folded = suggestion.to_lowercase();
            if !unique.contains(&folded) {
                unique.push(folded);
            }
        }
        unique.truncate(limit);
        unique
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        SuggestionEngine::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_returns_popular_head() {
        let engine = SuggestionEngine::new();
        let suggestions = engine.suggest("", 5);
        assert_eq!(suggestions.len(), 5);
        assert_eq!(suggestions[0], "chicken breast recipes");
    }

    #[test]
    fn test_recent_searches_rank_first() {
        let engine = SuggestionEngine::new();
        engine.record_search("chicken adobo");
        engine.record_search("chicken katsu");
        let suggestions = engine.suggest("chicken", 10);
        assert_eq!(suggestions[0], "chicken katsu");
        assert_eq!(suggestions[1], "chicken adobo");
        assert!(suggestions[2..].iter().any(|s| s.contains("chicken")));
    }

    #[test]
    fn test_history_is_bounded_and_deduped() {
        let engine = SuggestionEngine::new();
        for i in 0..60 {
            engine.record_search(&format!("query {i}"));
        }
        engine.record_search("query 59");
        let recent = engine.recent_searches();
        assert_eq!(recent.len(), MAX_RECENT_SEARCHES);
        assert_eq!(recent[0], "query 59");
    }

    #[test]
    fn test_cuisine_and_method_matches() {
        let engine = SuggestionEngine::new();
        assert!(engine.suggest("ital", 10).contains(&"italian recipes".to_string()));
        assert!(engine.suggest("grill", 10).iter().any(|s| s.contains("grilled")));
    }

    #[test]
    fn test_limit_respected() {
        let engine = SuggestionEngine::new();
        assert!(engine.suggest("chicken", 3).len() <= 3);
    }
}
