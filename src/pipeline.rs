//! Single-page scrape pipeline: gate, fetch, extractor cascade, normalize,
//! degrade.
//!
//! The pipeline never surfaces upstream failures. Everything past the domain
//! gate resolves to either a real extraction or a clearly marked template
//! fallback; the caller sees which through [`ScrapeOutcome`].

use crate::clean::{clean_ingredients, clean_instructions, clean_nutrition, clean_time, clean_title};
use crate::config::AppConfig;
use crate::domains::{host_of, DomainGate};
use crate::error::ScoutError;
use crate::extractors::{
    absolutize, Extractor, HeuristicExtractor, JsonLdExtractor, MicroDataExtractor, ParsingContext,
};
use crate::fallback;
use crate::fetch::PageFetcher;
use crate::model::{RecipeDraft, RecipeRecord};
use log::{debug, warn};
use regex::Regex;
use std::sync::LazyLock;

/// Non-content page regions removed before the heuristic passes run.
/// Structured-data extraction happens first, on the untouched document,
/// because JSON-LD lives inside script tags.
static NOISE_REGIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)<script\b.*?</script>|<style\b.*?</style>|<nav\b.*?</nav>|<header\b.*?</header>|<footer\b.*?</footer>|<aside\b.*?</aside>|<!--.*?-->",
    )
    .expect("invalid noise regex")
});

/// Why a scrape degraded to the template fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    /// The page could not be fetched at all
    FetchFailed,
    /// The page was fetched but yielded no usable ingredients or instructions
    NoContent,
}

/// Explicit pipeline result: each degrade decision is a visible branch.
#[derive(Debug)]
pub enum ScrapeOutcome {
    Extracted(RecipeRecord),
    Fallback {
        record: RecipeRecord,
        reason: FallbackReason,
    },
}

impl ScrapeOutcome {
    pub fn into_record(self) -> RecipeRecord {
        match self {
            ScrapeOutcome::Extracted(record) => record,
            ScrapeOutcome::Fallback { record, .. } => record,
        }
    }
}

pub struct ScrapePipeline {
    fetcher: PageFetcher,
    gate: DomainGate,
    heuristic: HeuristicExtractor,
}

impl ScrapePipeline {
    pub fn new(config: &AppConfig) -> Self {
        ScrapePipeline {
            fetcher: PageFetcher::new(&config.scraping),
            gate: DomainGate::new(
                config.allowed_domains.clone(),
                config.excluded_domains.clone(),
            ),
            heuristic: HeuristicExtractor::new(config.excluded_domains.clone()),
        }
    }

    /// Scrape a single recipe page.
    ///
    /// Fails only on the domain-policy check, which runs before any network
    /// I/O. Fetch and parse failures degrade to the template fallback.
    pub async fn scrape(&self, url: &str) -> Result<ScrapeOutcome, ScoutError> {
        if !self.gate.is_allowed(url) {
            return Err(ScoutError::UnsupportedDomain(url.to_string()));
        }

        let html = match self.fetcher.fetch(url).await {
            Ok(html) => html,
            Err(err) => {
                warn!("Fetch failed for {url}: {err}");
                return Ok(ScrapeOutcome::Fallback {
                    record: fallback::template_recipe("Recipe", url),
                    reason: FallbackReason::FetchFailed,
                });
            }
        };

        let draft = self.extract_draft(url, &html);
        let record = normalize_draft(draft, url);

        if record.ingredients.is_empty() && record.instructions.is_empty() {
            debug!("No extractable content on {url}, using template fallback");
            return Ok(ScrapeOutcome::Fallback {
                record: fallback::template_recipe(&record.title, url),
                reason: FallbackReason::NoContent,
            });
        }

        Ok(ScrapeOutcome::Extracted(record))
    }

    /// Extractor cascade on a fetched page. Runs synchronously; `Html` is not
    /// `Send` and must never live across an await point.
    fn extract_draft(&self, url: &str, html: &str) -> RecipeDraft {
        // Structured data first, on the untouched document.
        let context = ParsingContext::new(url, html);
        if let Ok(draft) = JsonLdExtractor.parse(&context) {
            debug!("JSON-LD extraction succeeded for {url}");
            return draft;
        }
        if let Ok(draft) = MicroDataExtractor.parse(&context) {
            debug!("Microdata extraction succeeded for {url}");
            return draft;
        }
        drop(context);

        // Heuristics run on the noise-stripped document.
        let stripped = strip_noise(html);
        let context = ParsingContext::new(url, &stripped);
        if let Ok(draft) = self.heuristic.parse(&context) {
            debug!("Heuristic extraction succeeded for {url}");
            return draft;
        }

        // Last resort: a title-only draft from the primary heading.
        let title = crate::extractors::primary_heading(&context.document).unwrap_or_default();
        RecipeDraft {
            title,
            ..RecipeDraft::default()
        }
    }
}

pub fn strip_noise(html: &str) -> String {
    NOISE_REGIONS.replace_all(html, " ").into_owned()
}

/// Normalize every draft field through the text cleaner and stamp identity.
/// The id is deterministic for a given (url, position); a single-page scrape
/// always sits at position 0.
pub fn normalize_draft(draft: RecipeDraft, url: &str) -> RecipeRecord {
    let title = clean_title(&draft.title);
    let mut record = RecipeRecord::new(
        format!("recipe-{url}-0"),
        if title.is_empty() {
            "Recipe Title Not Found".to_string()
        } else {
            title
        },
    );
    // structured-data images are often page-relative
    record.image = if draft.image.is_empty() {
        String::new()
    } else {
        absolutize(url, &draft.image)
    };
    record.ingredients = clean_ingredients(&draft.ingredients);
    record.instructions = clean_instructions(&draft.instructions);
    record.prep_time = clean_time(&draft.prep_time);
    record.cook_time = clean_time(&draft.cook_time);
    record.total_time = clean_time(&draft.total_time);
    record.servings = clean_time(&draft.servings);
    record.rating = clean_time(&draft.rating);
    record.nutrition = draft.nutrition.as_ref().and_then(clean_nutrition);
    record.source = host_of(url).unwrap_or_default();
    record.url = url.to_string();
    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecipeDraft;

    #[test]
    fn test_strip_noise_removes_chrome() {
        let html = r#"
            <html><head><style>.x { color: red }</style></head>
            <body>
            <nav><a href="/">Home</a></nav>
            <h1>Real Heading</h1>
            <!-- tracking pixel -->
            <footer>copyright</footer>
            </body></html>
        "#;
        let stripped = strip_noise(html);
        assert!(stripped.contains("Real Heading"));
        assert!(!stripped.contains("Home"));
        assert!(!stripped.contains("color: red"));
        assert!(!stripped.contains("tracking pixel"));
        assert!(!stripped.contains("copyright"));
    }

    #[test]
    fn test_normalize_draft_cleans_everything() {
        let draft = RecipeDraft {
            title: "  Garlic\tButter   Shrimp  ".to_string(),
            ingredients: vec![
                "1 lb shrimp".to_string(),
                "1 lb shrimp".to_string(),
                "Nutrition Facts".to_string(),
            ],
            instructions: vec!["Melt the butter and cook the shrimp for three minutes.".to_string()],
            prep_time: "10\nmins".to_string(),
            ..RecipeDraft::default()
        };
        let record = normalize_draft(draft, "https://www.allrecipes.com/r/9");

        assert_eq!(record.title, "Garlic Butter Shrimp");
        assert_eq!(record.ingredients, vec!["1 lb shrimp"]);
        assert_eq!(record.instructions.len(), 1);
        assert_eq!(record.prep_time, "10 mins");
        assert_eq!(record.source, "allrecipes.com");
        assert_eq!(record.id, "recipe-https://www.allrecipes.com/r/9-0");
    }

    #[test]
    fn test_normalize_draft_absolutizes_image() {
        let draft = RecipeDraft {
            title: "Lemon Chicken".to_string(),
            image: "/img/lemon.jpg".to_string(),
            ingredients: vec!["2 chicken breasts".to_string()],
            ..RecipeDraft::default()
        };
        let record = normalize_draft(draft, "https://www.simplyrecipes.com/lemon");
        assert_eq!(record.image, "https://www.simplyrecipes.com/img/lemon.jpg");

        let draft = RecipeDraft {
            image: "//cdn.example.com/x.jpg".to_string(),
            ..RecipeDraft::default()
        };
        let record = normalize_draft(draft, "https://www.simplyrecipes.com/lemon");
        assert_eq!(record.image, "https://cdn.example.com/x.jpg");

        let record = normalize_draft(RecipeDraft::default(), "https://www.food.com/x");
        assert_eq!(record.image, "");
    }

    #[test]
    fn test_normalize_empty_title_placeholder() {
        let record = normalize_draft(RecipeDraft::default(), "https://www.food.com/x");
        assert_eq!(record.title, "Recipe Title Not Found");
    }
}
