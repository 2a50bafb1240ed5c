pub mod clean;
pub mod config;
pub mod domains;
pub mod error;
pub mod extractors;
pub mod fallback;
pub mod fetch;
pub mod model;
pub mod pipeline;
pub mod search;
pub mod server;
pub mod sources;
pub mod store;
pub mod suggestions;

pub use config::AppConfig;
pub use error::ScoutError;
pub use model::{RecipeRecord, SearchResultSet};
pub use pipeline::{ScrapeOutcome, ScrapePipeline};
pub use search::SearchAggregator;
