// ABOUTME: Integration tests for the nutrition lookup chain against mocked provider APIs
// ABOUTME: Covers provider ordering, barcode gating, USDA key gating, and the synthetic fallback
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use babycare_providers::models::{FoodLookupResult, LookupSource, NutrientProfile};
use babycare_providers::{NutritionLookupConfig, NutritionLookupService};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Point every provider at a path prefix on one mock server
fn config_for(server: &MockServer, usda_api_key: Option<&str>) -> NutritionLookupConfig {
    NutritionLookupConfig {
        mealdb_base_url: format!("{}/mealdb", server.uri()),
        open_food_facts_base_url: format!("{}/off", server.uri()),
        usda_base_url: format!("{}/usda", server.uri()),
        usda_api_key: usda_api_key.map(str::to_owned),
        provider_timeout: Duration::from_secs(2),
    }
}

async fn mount_no_meals(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/mealdb/search.php"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "meals": null })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_unreachable_providers_return_fallback() {
    let config = NutritionLookupConfig {
        mealdb_base_url: "http://127.0.0.1:9".to_owned(),
        open_food_facts_base_url: "http://127.0.0.1:9".to_owned(),
        usda_base_url: "http://127.0.0.1:9".to_owned(),
        usda_api_key: Some("test-key".to_owned()),
        provider_timeout: Duration::from_secs(2),
    };
    let service = NutritionLookupService::new(&config);

    let result = service.lookup("banana").await;

    assert_eq!(result.food_id, "mock-id");
    assert_eq!(result.label, "banana");
    assert_eq!(result.nutrients, NutrientProfile::FALLBACK_ESTIMATE);
    assert_eq!(result.source, LookupSource::Estimate);
}

#[tokio::test]
async fn test_server_errors_return_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let service = NutritionLookupService::new(&config_for(&server, Some("test-key")));
    let result = service.lookup("Sweet Potato Mash").await;

    assert_eq!(result, FoodLookupResult::fallback("Sweet Potato Mash"));
}

#[tokio::test]
async fn test_recipe_match_uses_estimate_constants() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mealdb/search.php"))
        .and(query_param("s", "porridge"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "meals": [
                {
                    "idMeal": "52957",
                    "strMeal": "Porridge",
                    "strCategory": "Breakfast",
                    "strArea": "British",
                    "strInstructions": "Simmer oats in milk.",
                    "strMealThumb": "https://example.test/porridge.jpg",
                    "strIngredient1": "Oats",
                    "strMeasure1": "50g",
                    "strIngredient2": "Milk",
                    "strMeasure2": "300ml",
                    "strIngredient3": "",
                    "strMeasure3": ""
                },
                { "idMeal": "1", "strMeal": "Second" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = NutritionLookupService::new(&config_for(&server, None));
    let result = service.lookup("porridge").await;

    assert_eq!(result.food_id, "52957");
    assert_eq!(result.label, "Porridge");
    assert_eq!(result.source, LookupSource::MealDb);
    assert_eq!(result.nutrients, NutrientProfile::RECIPE_ESTIMATE);
    assert_eq!(result.image.as_deref(), Some("https://example.test/porridge.jpg"));
    assert_eq!(result.category.as_deref(), Some("Breakfast"));
    let names: Vec<_> = result
        .ingredients
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(names, vec!["Oats", "Milk"]);
}

#[tokio::test]
async fn test_barcode_resolved_by_open_food_facts() {
    let server = MockServer::start().await;
    mount_no_meals(&server).await;
    Mock::given(method("GET"))
        .and(path("/off/0123456789012.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 1,
            "code": "0123456789012",
            "product": {
                "product_name": "Apple Puree",
                "brands": "Tiny Spoons",
                "image_url": "https://example.test/apple.jpg",
                "ingredients_text": "apples",
                "nutriments": {
                    "energy-kcal_100g": 52,
                    "carbohydrates_100g": "12.5"
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/usda/foods/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "foods": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let service = NutritionLookupService::new(&config_for(&server, Some("test-key")));
    let result = service.lookup("0123456789012").await;

    assert_eq!(result.source, LookupSource::OpenFoodFacts);
    assert_eq!(result.food_id, "0123456789012");
    assert_eq!(result.label, "Apple Puree");
    assert_eq!(result.brand.as_deref(), Some("Tiny Spoons"));
    assert_eq!(result.ingredients_text.as_deref(), Some("apples"));
    assert!((result.nutrients.calories - 52.0).abs() < f64::EPSILON);
    assert!((result.nutrients.carbs - 12.5).abs() < f64::EPSILON);
    assert!(result.nutrients.protein.abs() < f64::EPSILON);
    assert_eq!(result.nutrients.sugar, Some(0.0));
}

#[tokio::test]
async fn test_unknown_barcode_moves_on_to_usda() {
    let server = MockServer::start().await;
    mount_no_meals(&server).await;
    Mock::given(method("GET"))
        .and(path("/off/12345678.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": 0,
            "status_verbose": "product not found"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/usda/foods/search"))
        .and(query_param("query", "12345678"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "foods": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let service = NutritionLookupService::new(&config_for(&server, Some("test-key")));
    let result = service.lookup("12345678").await;

    assert_eq!(result, FoodLookupResult::fallback("12345678"));
}

#[tokio::test]
async fn test_text_query_never_reaches_open_food_facts() {
    let server = MockServer::start().await;
    mount_no_meals(&server).await;
    Mock::given(method("GET"))
        .and(path("/off/banana.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": 1 })))
        .expect(0)
        .mount(&server)
        .await;

    let service = NutritionLookupService::new(&config_for(&server, None));
    let result = service.lookup("banana").await;

    assert_eq!(result.source, LookupSource::Estimate);
}

#[tokio::test]
async fn test_usda_matches_nutrients_by_name() {
    let server = MockServer::start().await;
    mount_no_meals(&server).await;
    Mock::given(method("GET"))
        .and(path("/usda/foods/search"))
        .and(query_param("api_key", "test-key"))
        .and(query_param("query", "banana"))
        .and(query_param("pageSize", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "totalHits": 1,
            "foods": [{
                "fdcId": 1_105_314,
                "description": "Bananas, ripe and slightly ripe, raw",
                "dataType": "Foundation",
                "brandName": "Chiquita",
                "foodNutrients": [
                    { "nutrientId": 1003, "nutrientName": "Protein", "unitName": "G", "value": 0.74 },
                    { "nutrientId": 1008, "nutrientName": "Energy", "unitName": "KCAL", "value": 97.0 },
                    { "nutrientId": 1005, "nutrientName": "Carbohydrate, by difference", "unitName": "G", "value": 23.0 },
                    { "nutrientId": 2000, "nutrientName": "Sugars, total including NLEA", "unitName": "G", "value": 15.8 }
                ]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = NutritionLookupService::new(&config_for(&server, Some("test-key")));
    let result = service.lookup("banana").await;

    assert_eq!(result.source, LookupSource::Usda);
    assert_eq!(result.food_id, "1105314");
    assert_eq!(result.label, "Bananas, ripe and slightly ripe, raw");
    assert_eq!(result.brand.as_deref(), Some("Chiquita"));
    assert!((result.nutrients.calories - 97.0).abs() < f64::EPSILON);
    assert!((result.nutrients.protein - 0.74).abs() < f64::EPSILON);
    assert!(result.nutrients.fat.abs() < f64::EPSILON);
    assert!(result.nutrients.fiber.abs() < f64::EPSILON);
    assert_eq!(result.nutrients.sugar, Some(15.8));
}

#[tokio::test]
async fn test_usda_skipped_without_api_key() {
    let server = MockServer::start().await;
    mount_no_meals(&server).await;
    Mock::given(method("GET"))
        .and(path("/usda/foods/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "foods": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let service = NutritionLookupService::new(&config_for(&server, None));
    let result = service.lookup("carrot").await;

    assert_eq!(result, FoodLookupResult::fallback("carrot"));
}

#[tokio::test]
async fn test_malformed_recipe_body_is_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/mealdb/search.php"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/usda/foods/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "foods": [{ "fdcId": 7, "description": "Peas", "foodNutrients": [] }]
        })))
        .mount(&server)
        .await;

    let service = NutritionLookupService::new(&config_for(&server, Some("test-key")));
    let result = service.lookup("peas").await;

    assert_eq!(result.source, LookupSource::Usda);
    assert_eq!(result.label, "Peas");
    assert_eq!(result.nutrients.sugar, Some(0.0));
}
