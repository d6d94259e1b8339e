// ABOUTME: Open Food Facts barcode client, second step of the nutrition lookup chain
// ABOUTME: Only consulted for 8-14 digit queries; reads per-100g nutriments of a found product
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Open Food Facts product lookup
//!
//! API reference: <https://openfoodfacts.github.io/openfoodfacts-server/api/>

use crate::constants::providers::{BARCODE_MAX_DIGITS, BARCODE_MIN_DIGITS};
use crate::core::FoodDataProvider;
use crate::errors::ProviderResult;
use crate::http_client::fetch_json;
use crate::models::{FoodLookupResult, LookupSource, NutrientProfile};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

const PROVIDER_NAME: &str = "open_food_facts";

/// Status flag Open Food Facts sets when the barcode is known
const PRODUCT_FOUND: i64 = 1;

#[derive(Debug, Deserialize)]
struct ProductResponse {
    #[serde(default)]
    status: i64,
    code: Option<String>,
    product: Option<Product>,
}

#[derive(Debug, Deserialize)]
struct Product {
    code: Option<String>,
    product_name: Option<String>,
    brands: Option<String>,
    image_url: Option<String>,
    ingredients_text: Option<String>,
    #[serde(default)]
    nutriments: Map<String, Value>,
}

/// Whether `query` looks like a product barcode (8 to 14 ASCII digits)
#[must_use]
pub fn is_barcode(query: &str) -> bool {
    (BARCODE_MIN_DIGITS..=BARCODE_MAX_DIGITS).contains(&query.len())
        && query.bytes().all(|b| b.is_ascii_digit())
}

/// Read a nutriment that may be encoded as a number or a numeric string
fn nutriment(nutriments: &Map<String, Value>, key: &str) -> Option<f64> {
    match nutriments.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Open Food Facts product client
pub struct OpenFoodFactsClient {
    http_client: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl OpenFoodFactsClient {
    /// Create a client against `base_url` (the `/api/v0/product` prefix)
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            timeout_secs,
        }
    }

    /// Look up a product by barcode
    ///
    /// Non-barcode input resolves to `Ok(None)` without a network call.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` if the request fails or the body is malformed
    pub async fn get_product(&self, barcode: &str) -> ProviderResult<Option<FoodLookupResult>> {
        if !is_barcode(barcode) {
            return Ok(None);
        }

        let url = format!("{}/{barcode}.json", self.base_url);
        let response: ProductResponse =
            fetch_json(self.http_client.get(&url), PROVIDER_NAME, self.timeout_secs).await?;

        if response.status != PRODUCT_FOUND {
            debug!(barcode, status = response.status, "Open Food Facts product not found");
            return Ok(None);
        }
        let Some(product) = response.product else {
            debug!(barcode, "Open Food Facts reported a match without a product body");
            return Ok(None);
        };

        let n = &product.nutriments;
        let nutrients = NutrientProfile::from_upstream(
            nutriment(n, "energy-kcal_100g"),
            nutriment(n, "proteins_100g"),
            nutriment(n, "fat_100g"),
            nutriment(n, "carbohydrates_100g"),
            nutriment(n, "fiber_100g"),
            nutriment(n, "sugars_100g"),
        );

        let food_id = product
            .code
            .or(response.code)
            .unwrap_or_else(|| barcode.to_owned());
        let label = product
            .product_name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| barcode.to_owned());

        let mut result =
            FoodLookupResult::new(food_id, label, nutrients, LookupSource::OpenFoodFacts);
        result.brand = product.brands.filter(|b| !b.is_empty());
        result.image = product.image_url;
        result.ingredients_text = product.ingredients_text.filter(|t| !t.is_empty());

        Ok(Some(result))
    }
}

#[async_trait]
impl FoodDataProvider for OpenFoodFactsClient {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn accepts(&self, query: &str) -> bool {
        is_barcode(query)
    }

    async fn resolve(&self, query: &str) -> ProviderResult<Option<FoodLookupResult>> {
        self.get_product(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_barcode_pattern() {
        assert!(is_barcode("12345678"));
        assert!(is_barcode("0123456789012"));
        assert!(is_barcode("12345678901234"));
        assert!(!is_barcode("1234567"));
        assert!(!is_barcode("123456789012345"));
        assert!(!is_barcode("banana"));
        assert!(!is_barcode(" 12345678"));
        assert!(!is_barcode("1234567８"));
    }

    #[test]
    fn test_nutriment_accepts_numbers_and_numeric_strings() {
        let map = match json!({"a": 52, "b": "1.5", "c": "n/a", "d": null}) {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        assert_eq!(nutriment(&map, "a"), Some(52.0));
        assert_eq!(nutriment(&map, "b"), Some(1.5));
        assert_eq!(nutriment(&map, "c"), None);
        assert_eq!(nutriment(&map, "d"), None);
        assert_eq!(nutriment(&map, "missing"), None);
    }
}
