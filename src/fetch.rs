use crate::config::ScrapingConfig;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Shared outbound HTTP client for page scrapes and API adapters.
///
/// Pages refuse obvious bot user agents, so fetches carry a browser identity
/// header. Timeout and redirect caps come from configuration.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &ScrapingConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(Policy::limited(config.max_redirects))
            .user_agent(config.user_agent.clone())
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    pub async fn fetch(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        response.text().await
    }

    /// Raw client handle for adapters that need query parameters or JSON.
    pub fn client(&self) -> &Client {
        &self.client
    }
}

impl Default for PageFetcher {
    fn default() -> Self {
        PageFetcher::new(&ScrapingConfig::default())
    }
}
