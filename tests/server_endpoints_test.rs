use axum::body::Body;
use axum::http::{Request, StatusCode};
use recipe_scout::config::AppConfig;
use recipe_scout::server::{build_router, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn app(config: AppConfig) -> axum::Router {
    build_router(Arc::new(AppState::new(&config)))
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_search_without_query_is_bad_request() {
    let response = app(AppConfig::default())
        .oneshot(
            Request::builder()
                .uri("/api/search")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Missing search query");
}

#[tokio::test]
async fn test_scrape_without_url_is_bad_request() {
    let response = app(AppConfig::default())
        .oneshot(
            Request::builder()
                .uri("/api/scrape")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Missing url");
}

#[tokio::test]
async fn test_scrape_unknown_domain_is_bad_request() {
    let response = app(AppConfig::default())
        .oneshot(
            Request::builder()
                .uri("/api/scrape?url=https://definitely-not-a-recipe-site.xyz/page")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Domain not supported");
}

#[tokio::test]
async fn test_search_rate_limit_kicks_in() {
    let mut config = AppConfig::default();
    config.rate_limit.requests_per_window = 2;
    let router = app(config);

    // Requests without a query still count against the window.
    for _ in 0..2 {
        let response = router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/search")
                    .header("x-forwarded-for", "203.0.113.9")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/search")
                .header("x-forwarded-for", "203.0.113.9")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // A different client still has headroom.
    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/search")
                .header("x-forwarded-for", "203.0.113.10")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_scrape_recovers_after_upstream_blip() {
    let mut server = mockito::Server::new_async().await;
    let broken = server
        .mock("GET", "/r")
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let mut config = AppConfig::default();
    config.allowed_domains.push("127.0.0.1".to_string());
    let router = app(config);
    let uri = format!("/api/scrape?url={}/r", server.url());

    let response = router
        .clone()
        .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(!body["note"].as_str().unwrap().is_empty());
    broken.assert_async().await;

    // The upstream comes back; the template answer must not have been cached.
    let _healthy = server
        .mock("GET", "/r")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(
            r#"
            <html><head><script type="application/ld+json">
            {
                "@type": "Recipe",
                "name": "Garlic Butter Salmon",
                "recipeIngredient": ["2 salmon fillets", "3 tablespoons butter"],
                "recipeInstructions": ["Sear the salmon skin side down.", "Baste with the garlic butter."]
            }
            </script></head><body></body></html>
            "#,
        )
        .create_async()
        .await;

    let response = router
        .oneshot(Request::builder().uri(&uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["title"], "Garlic Butter Salmon");
    assert_eq!(body["note"], "");
}

#[tokio::test]
async fn test_suggestions_endpoint() {
    let response = app(AppConfig::default())
        .oneshot(
            Request::builder()
                .uri("/api/suggestions?q=chick&limit=5")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["query"], "chick");
    let suggestions = body["suggestions"].as_array().unwrap();
    assert!(!suggestions.is_empty());
    assert!(suggestions.len() <= 5);
    assert!(suggestions
        .iter()
        .all(|s| s.as_str().unwrap().to_lowercase().contains("chick")));
}

#[tokio::test]
async fn test_hello_reports_store_sizes() {
    let response = app(AppConfig::default())
        .oneshot(
            Request::builder()
                .uri("/api/hello")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["msg"], "Recipe scout is running.");
    assert_eq!(body["cacheEntries"], 0);
    assert_eq!(body["rateLimitEntries"], 0);
}
