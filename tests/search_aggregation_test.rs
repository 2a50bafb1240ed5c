use recipe_scout::config::{MealDbConfig, ScrapingConfig};
use recipe_scout::fetch::PageFetcher;
use recipe_scout::search::SearchAggregator;
use recipe_scout::sources::{MealDbSource, SearchSource};

fn mealdb_source(base_url: String) -> Box<dyn SearchSource> {
    let config = MealDbConfig {
        enabled: true,
        base_url,
    };
    Box::new(MealDbSource::new(
        config,
        PageFetcher::new(&ScrapingConfig::default()),
    ))
}

#[tokio::test]
async fn test_live_results_from_mealdb() {
    let mut server = mockito::Server::new_async().await;
    let body = r#"
    {
        "meals": [
            {
                "idMeal": "52940",
                "strMeal": "Brown Stew Chicken",
                "strMealThumb": "https://www.themealdb.com/images/52940.jpg",
                "strIngredient1": "Chicken",
                "strMeasure1": "1 whole",
                "strIngredient2": "Tomato",
                "strMeasure2": "1 chopped",
                "strIngredient3": "",
                "strMeasure3": ""
            },
            {
                "idMeal": "52956",
                "strMeal": "Chicken Congee",
                "strMealThumb": "https://www.themealdb.com/images/52956.jpg",
                "strIngredient1": "Chicken",
                "strMeasure1": "8 oz"
            }
        ]
    }
    "#;
    let mock = server
        .mock("GET", "/search.php?s=chicken")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let aggregator = SearchAggregator::with_sources(vec![mealdb_source(server.url())]);
    let result = aggregator.search("chicken", 5).await;

    assert!(!result.is_fallback);
    assert_eq!(result.total, 2);
    assert!(!result.has_more);
    assert_eq!(result.recipes[0].title, "Brown Stew Chicken");
    assert_eq!(result.recipes[0].id, "mealdb-52940");
    assert_eq!(
        result.recipes[0].ingredients,
        vec!["1 whole Chicken", "1 chopped Tomato"]
    );
    assert_eq!(result.recipes[0].source, "TheMealDB");
    assert!(result.message.contains("Found 2 recipes"));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_empty_sources_fall_back_to_curated() {
    let aggregator = SearchAggregator::with_sources(Vec::new());
    let result = aggregator.search("pasta", 3).await;

    assert!(result.is_fallback);
    assert_eq!(result.recipes.len(), 3);
    assert!(result.message.contains("curated suggestions"));
    assert!(result
        .recipes
        .iter()
        .all(|r| r.id.starts_with("pasta-")));
}

#[tokio::test]
async fn test_source_failure_is_soft() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search.php?s=soup")
        .with_status(503)
        .create_async()
        .await;

    let aggregator = SearchAggregator::with_sources(vec![mealdb_source(server.url())]);
    let result = aggregator.search("soup", 5).await;

    // A broken upstream degrades to the curated list instead of an error.
    assert!(result.is_fallback);
    assert!(!result.recipes.is_empty());
    mock.assert_async().await;
}
