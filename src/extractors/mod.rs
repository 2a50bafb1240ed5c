use crate::error::ScoutError;
use crate::model::RecipeDraft;
use scraper::Html;

mod heuristic;
mod json_ld;
mod microdata;

pub(crate) use self::heuristic::absolutize;
pub use self::heuristic::{primary_heading, Candidate, HeuristicExtractor};
pub use self::json_ld::JsonLdExtractor;
pub use self::microdata::MicroDataExtractor;

/// Parsed page plus the URL it came from.
pub struct ParsingContext {
    pub url: String,
    pub document: Html,
}

impl ParsingContext {
    pub fn new(url: &str, html: &str) -> Self {
        ParsingContext {
            url: url.to_string(),
            document: Html::parse_document(html),
        }
    }
}

/// A single extraction strategy. Strategies are tried in order by the scrape
/// pipeline; failure just means the next one runs.
pub trait Extractor {
    fn parse(&self, context: &ParsingContext) -> Result<RecipeDraft, ScoutError>;
}
