use log::{debug, info};
use std::sync::Arc;

use recipe_scout::config::AppConfig;
use recipe_scout::server::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let config = AppConfig::load()?;
    let port = config.server.port;

    let state = Arc::new(AppState::new(&config));

    // Periodic eviction so idle entries do not pile up between requests.
    let sweeper = state.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(sweeper.cache_sweep_interval);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let evicted = sweeper.search_cache.sweep()
                + sweeper.scrape_cache.sweep()
                + sweeper.limiter.sweep();
            if evicted > 0 {
                debug!("Swept {evicted} expired entries");
            }
        }
    });

    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
    info!("Recipe scout listening on port {port}");
    axum::serve(listener, app).await?;

    Ok(())
}
