use thiserror::Error;

/// Errors that can occur while scraping and searching for recipes.
///
/// Upstream fetch/parse failures are deliberately absorbed inside the
/// pipeline and adapters (they degrade to fallback output); the variants here
/// are the ones that reach callers.
#[derive(Error, Debug)]
pub enum ScoutError {
    /// Scrape target is not on the trusted domain allowlist
    #[error("Domain not supported for scraping: {0}")]
    UnsupportedDomain(String),

    /// Failed to fetch a page or API endpoint
    #[error("Failed to fetch URL: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Failed to parse recipe content from a page
    #[error("Failed to parse recipe: {0}")]
    ParseError(String),
}
