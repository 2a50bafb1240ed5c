use crate::clean::{clean_text, clean_time, clean_title};
use crate::domains::host_of;
use crate::error::ScoutError;
use crate::extractors::{Extractor, ParsingContext};
use crate::model::RecipeDraft;
use log::debug;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

/// One selector group in the heuristic cascade. Templates are tried in
/// order and the first one that yields an accepted candidate wins; generic
/// selectors are noisy, so they only run when the specific ones fail.
pub struct ExtractionTemplate {
    pub name: &'static str,
    pub container: &'static str,
    pub title: &'static str,
    pub image: &'static str,
    pub link: &'static str,
    pub rating: &'static str,
    pub time: &'static str,
}

/// Containers examined per template. Bounds the scan cost on pages with
/// hundreds of matching elements.
const MAX_CANDIDATES_PER_TEMPLATE: usize = 3;

const TEMPLATES: &[ExtractionTemplate] = &[
    ExtractionTemplate {
        name: "recipe-site",
        container: ".recipe, .recipe-card, .recipe-item",
        title: ".recipe-title, .recipe-name, h1, h2",
        image: ".recipe-image img, .recipe-photo img, img",
        link: ".recipe-title a, .recipe-name a, a",
        rating: ".recipe-rating, .rating, .stars",
        time: ".recipe-time, .cook-time, .prep-time",
    },
    ExtractionTemplate {
        name: "blog-style",
        container: ".post, .entry, .article",
        title: ".entry-title, .post-title, .article-title, h1, h2",
        image: ".post-thumbnail img, .entry-image img, img",
        link: ".entry-title a, .post-title a, a",
        rating: ".rating, .stars, .score",
        time: ".cook-time, .prep-time, .duration",
    },
    ExtractionTemplate {
        name: "generic-content",
        container: "[class*='recipe'], [class*='card'], .content, .main, article",
        title: "[class*='title'], h1, h2, h3",
        image: "img",
        link: "a",
        rating: "[class*='rating'], [class*='star']",
        time: "[class*='time'], [class*='duration']",
    },
];

/// Title keywords scoring 2 points each.
const RECIPE_KEYWORDS: &[&str] = &[
    "recipe", "cook", "bake", "roast", "grill", "dish", "meal", "dinner", "homemade",
];

/// Title keywords scoring 1 point each.
const FOOD_KEYWORDS: &[&str] = &[
    "chicken", "beef", "pork", "fish", "salmon", "shrimp", "pasta", "noodle", "rice",
    "salad", "soup", "stew", "curry", "cake", "bread", "cookie", "pie", "sauce",
    "cheese", "chocolate", "vegetable", "potato",
];

/// Tokens in the container body that signal real recipe content; worth a
/// 2-point bonus and a lower acceptance threshold.
const CONTENT_TOKENS: &[&str] = &[
    "teaspoon", "tablespoon", "cup", "ounce", "gram", "preheat", "mix", "stir",
    "whisk", "simmer", "saute", "marinate", "oven",
];

/// Ingredient list selectors, tried in order; the first that yields any
/// items wins. Covers plain semantic markup, WP Recipe Maker output and
/// loose class-name conventions.
const INGREDIENT_SELECTORS: &[&str] = &[
    ".ingredients li",
    ".recipe-ingredients li",
    ".ingredient-list li",
    ".wprm-recipe-ingredient",
    "[itemprop='recipeIngredient']",
    "[class*='ingredient'] li",
];

const INSTRUCTION_SELECTORS: &[&str] = &[
    ".instructions li",
    ".recipe-instructions li",
    ".directions li",
    ".method li",
    ".wprm-recipe-instruction",
    "[itemprop='recipeInstructions']",
    "[class*='instruction'] li",
    "[class*='direction'] li",
];

/// Titles carrying these are navigation chrome, not recipes.
const NAV_NOISE: &[&str] = &[
    "menu", "login", "log in", "sign up", "subscribe", "newsletter", "privacy",
    "cookie policy", "about us", "contact", "advertise", "careers",
];

/// Shallow recipe candidate pulled out of a listing-style page.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub title: String,
    pub image: String,
    pub link: String,
    pub rating: String,
    pub time: String,
}

pub struct HeuristicExtractor {
    /// Hosts that never carry recipes; candidates from them are rejected.
    excluded_domains: Vec<String>,
}

impl HeuristicExtractor {
    pub fn new(excluded_domains: Vec<String>) -> Self {
        HeuristicExtractor { excluded_domains }
    }

    /// Runs the cascade and returns every accepted candidate from the first
    /// template that produced any.
    pub fn candidates(&self, context: &ParsingContext) -> Vec<Candidate> {
        if let Some(host) = host_of(&context.url) {
            if self.excluded_domains.iter().any(|d| host.contains(d.as_str())) {
                debug!("Skipping non-recipe host {host}");
                return Vec::new();
            }
        }

        for template in TEMPLATES {
            let accepted = self.scan_template(context, template);
            if !accepted.is_empty() {
                debug!(
                    "Template '{}' accepted {} candidate(s) on {}",
                    template.name,
                    accepted.len(),
                    context.url
                );
                return accepted;
            }
        }
        Vec::new()
    }

    fn scan_template(
        &self,
        context: &ParsingContext,
        template: &ExtractionTemplate,
    ) -> Vec<Candidate> {
        let Ok(container_sel) = Selector::parse(template.container) else {
            return Vec::new();
        };

        let mut accepted = Vec::new();
        for container in context
            .document
            .select(&container_sel)
            .take(MAX_CANDIDATES_PER_TEMPLATE)
        {
            if let Some(candidate) = self.examine_container(context, template, container) {
                accepted.push(candidate);
            }
        }
        accepted
    }

    fn examine_container(
        &self,
        context: &ParsingContext,
        template: &ExtractionTemplate,
        container: ElementRef,
    ) -> Option<Candidate> {
        let title = clean_title(&first_text(container, template.title)?);
        if title.chars().count() < 5 {
            return None;
        }

        let title_lower = title.to_lowercase();
        if NAV_NOISE.iter().any(|noise| title_lower.contains(noise)) {
            return None;
        }

        let body = container.text().collect::<Vec<_>>().join(" ").to_lowercase();
        if !passes_relevance(&title_lower, &body) {
            return None;
        }

        let image = first_attr(container, template.image, &["src", "data-src"])
            .map(|src| absolutize(&context.url, &src))
            .unwrap_or_default();
        let link = first_attr(container, template.link, &["href"])
            .map(|href| absolutize(&context.url, &href))
            .unwrap_or_else(|| context.url.clone());
        let rating = first_text(container, template.rating)
            .map(|r| clean_time(&r))
            .unwrap_or_default();
        let time = first_text(container, template.time)
            .map(|t| clean_time(&t))
            .unwrap_or_default();

        Some(Candidate {
            title,
            image,
            link,
            rating,
            time,
        })
    }
}

/// Relevance gate: recipe keywords weigh 2, food keywords 1, plus a 2-point
/// bonus when the body reads like ingredients or steps. Threshold is 2 with
/// the bonus, 3 without it.
fn passes_relevance(title_lower: &str, body_lower: &str) -> bool {
    let mut score = 0usize;
    for keyword in RECIPE_KEYWORDS {
        if title_lower.contains(keyword) {
            score += 2;
        }
    }
    for keyword in FOOD_KEYWORDS {
        if title_lower.contains(keyword) {
            score += 1;
        }
    }

    let bonus = CONTENT_TOKENS.iter().any(|token| body_lower.contains(token));
    if bonus {
        score += 2;
        score >= 2
    } else {
        score >= 3
    }
}

fn first_text(container: ElementRef, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    container
        .select(&sel)
        .next()
        .map(|el| el.text().collect::<Vec<_>>().join(" "))
        .map(|text| clean_text(&text, 500))
        .filter(|text| !text.is_empty())
}

fn first_attr(container: ElementRef, selector: &str, attrs: &[&str]) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    for element in container.select(&sel) {
        for attr in attrs {
            if let Some(value) = element.value().attr(attr) {
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
        }
    }
    None
}

/// First selector in the cascade that matches any elements, as trimmed text.
fn first_matching_list(document: &Html, selectors: &[&str]) -> Vec<String> {
    for selector in selectors {
        let Ok(sel) = Selector::parse(selector) else {
            continue;
        };
        let items: Vec<String> = document
            .select(&sel)
            .map(|el| clean_text(&el.text().collect::<Vec<_>>().join(" "), 500))
            .filter(|text| !text.is_empty())
            .collect();
        if !items.is_empty() {
            return items;
        }
    }
    Vec::new()
}

/// Resolve protocol-relative and path-relative URLs against the page.
pub(crate) fn absolutize(page_url: &str, href: &str) -> String {
    if href.starts_with("http") {
        return href.to_string();
    }
    if let Some(rest) = href.strip_prefix("//") {
        return format!("https://{rest}");
    }
    match Url::parse(page_url).and_then(|base| base.join(href)) {
        Ok(joined) => joined.to_string(),
        Err(_) => href.to_string(),
    }
}

impl Extractor for HeuristicExtractor {
    fn parse(&self, context: &ParsingContext) -> Result<RecipeDraft, ScoutError> {
        // Content lists come from their own selector cascades over the whole
        // document; the container templates only provide title and metadata.
        // Pages with plain `.ingredients li` markup and no recognizable
        // container still yield a full draft.
        let ingredients = first_matching_list(&context.document, INGREDIENT_SELECTORS);
        let instructions = first_matching_list(&context.document, INSTRUCTION_SELECTORS);
        let mut candidates = self.candidates(context);

        if candidates.is_empty() && ingredients.is_empty() && instructions.is_empty() {
            return Err(ScoutError::ParseError(
                "No heuristic template matched".to_string(),
            ));
        }

        let mut draft = if candidates.is_empty() {
            RecipeDraft {
                title: primary_heading(&context.document).unwrap_or_default(),
                ..RecipeDraft::default()
            }
        } else {
            let first = candidates.remove(0);
            RecipeDraft {
                title: first.title,
                image: first.image,
                link: first.link,
                rating: first.rating,
                total_time: first.time,
                ..RecipeDraft::default()
            }
        };
        draft.ingredients = ingredients;
        draft.instructions = instructions;
        Ok(draft)
    }
}

/// Best-effort page heading for title-only drafts when every strategy fails.
pub fn primary_heading(document: &Html) -> Option<String> {
    let selector = Selector::parse("h1, h2").unwrap();
    document
        .select(&selector)
        .next()
        .map(|el| clean_title(&el.text().collect::<Vec<_>>().join(" ")))
        .filter(|title| !title.is_empty())
}
