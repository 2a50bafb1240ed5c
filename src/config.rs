use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// TheMealDB adapter (free, always on)
    #[serde(default)]
    pub mealdb: MealDbConfig,
    /// Edamam adapter (requires registration, disabled by default)
    #[serde(default)]
    pub edamam: EdamamConfig,
    /// Spoonacular adapter (requires an API key, disabled by default)
    #[serde(default)]
    pub spoonacular: SpoonacularConfig,
    /// Outbound fetch behavior for page scrapes and web search
    #[serde(default)]
    pub scraping: ScrapingConfig,
    /// Response cache lifetimes
    #[serde(default)]
    pub cache: CacheConfig,
    /// Per-client request throttling
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    /// Trusted recipe-site domain fragments for direct scraping
    #[serde(default = "default_allowed_domains")]
    pub allowed_domains: Vec<String>,
    /// Domains dropped during web-search result triage
    #[serde(default = "default_excluded_domains")]
    pub excluded_domains: Vec<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MealDbConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_mealdb_base_url")]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EdamamConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub app_id: String,
    #[serde(default)]
    pub app_key: String,
    #[serde(default = "default_edamam_base_url")]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SpoonacularConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_spoonacular_base_url")]
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ScrapingConfig {
    /// Timeout for a single page or API fetch, in seconds
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
    /// Tighter budget for per-candidate scrapes during web search, in seconds
    #[serde(default = "default_candidate_timeout")]
    pub candidate_timeout_secs: u64,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Upper bound on candidate URLs scraped per web search
    #[serde(default = "default_max_candidates")]
    pub max_candidates: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CacheConfig {
    #[serde(default = "default_cache_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    #[serde(default = "default_requests_per_window")]
    pub requests_per_window: u32,
    #[serde(default = "default_window")]
    pub window_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig { port: default_port() }
    }
}

impl Default for MealDbConfig {
    fn default() -> Self {
        MealDbConfig {
            enabled: true,
            base_url: default_mealdb_base_url(),
        }
    }
}

impl Default for EdamamConfig {
    fn default() -> Self {
        EdamamConfig {
            enabled: false,
            app_id: String::new(),
            app_key: String::new(),
            base_url: default_edamam_base_url(),
        }
    }
}

impl Default for SpoonacularConfig {
    fn default() -> Self {
        SpoonacularConfig {
            enabled: false,
            api_key: String::new(),
            base_url: default_spoonacular_base_url(),
        }
    }
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        ScrapingConfig {
            timeout_secs: default_fetch_timeout(),
            candidate_timeout_secs: default_candidate_timeout(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            max_candidates: default_max_candidates(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            ttl_secs: default_cache_ttl(),
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        RateLimitConfig {
            requests_per_window: default_requests_per_window(),
            window_secs: default_window(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            server: ServerConfig::default(),
            mealdb: MealDbConfig::default(),
            edamam: EdamamConfig::default(),
            spoonacular: SpoonacularConfig::default(),
            scraping: ScrapingConfig::default(),
            cache: CacheConfig::default(),
            rate_limit: RateLimitConfig::default(),
            allowed_domains: default_allowed_domains(),
            excluded_domains: default_excluded_domains(),
        }
    }
}

// Default value functions
fn default_port() -> u16 {
    4000
}

fn default_true() -> bool {
    true
}

fn default_mealdb_base_url() -> String {
    "https://www.themealdb.com/api/json/v1/1".to_string()
}

fn default_edamam_base_url() -> String {
    "https://api.edamam.com/api/recipes/v2".to_string()
}

fn default_spoonacular_base_url() -> String {
    "https://api.spoonacular.com/recipes".to_string()
}

fn default_fetch_timeout() -> u64 {
    12
}

fn default_candidate_timeout() -> u64 {
    8
}

fn default_max_redirects() -> usize {
    5
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_max_candidates() -> usize {
    5
}

fn default_cache_ttl() -> u64 {
    300
}

fn default_sweep_interval() -> u64 {
    600
}

fn default_requests_per_window() -> u32 {
    10
}

fn default_window() -> u64 {
    60
}

fn default_allowed_domains() -> Vec<String> {
    [
        "allrecipes.com",
        "foodnetwork.com",
        "epicurious.com",
        "bonappetit.com",
        "seriouseats.com",
        "thekitchn.com",
        "simplyrecipes.com",
        "tasteofhome.com",
        "food.com",
        "cookinglight.com",
        "eatingwell.com",
        "delish.com",
        "goodhousekeeping.com",
        "bbcgoodfood.com",
        "jamieoliver.com",
        "pioneerwoman.com",
        "smittenkitchen.com",
        "pinchofyum.com",
        "minimalistbaker.com",
        "101cookbooks.com",
        "loveandlemons.com",
        "themealdb.com",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

fn default_excluded_domains() -> Vec<String> {
    [
        "stackoverflow.com",
        "github.com",
        "tiktok.com",
        "instagram.com",
        "facebook.com",
        "twitter.com",
        "youtube.com",
        "reddit.com",
        "pinterest.com",
        "linkedin.com",
        "medium.com",
        "dev.to",
        "wikipedia.org",
        "quora.com",
        "yahoo.com",
        "bing.com",
        "google.com",
        "duckduckgo.com",
        "amazon.com",
        "ebay.com",
        "etsy.com",
        "shopify.com",
    ]
    .iter()
    .map(ToString::to_string)
    .collect()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE__SPOONACULAR__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Use double underscore for nested: RECIPE__EDAMAM__APP_ID
            .add_source(
                Environment::with_prefix("RECIPE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
