// ABOUTME: USDA FoodData Central API client, last network step of the nutrition lookup chain
// ABOUTME: Searches foods by name and maps nutrients located by their exact USDA names
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! USDA `FoodData` Central API Client
//!
//! The API is free but requires an API key. Without one the provider is not
//! part of the lookup chain at all.
//!
//! # API Reference
//! USDA `FoodData` Central API: <https://fdc.nal.usda.gov/api-guide.html>

use crate::core::FoodDataProvider;
use crate::errors::ProviderResult;
use crate::http_client::fetch_json;
use crate::models::{FoodLookupResult, LookupSource, NutrientProfile};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const PROVIDER_NAME: &str = "usda";

/// Largest page size the search endpoint accepts
const MAX_PAGE_SIZE: u32 = 200;

/// USDA nutrient names read into a `NutrientProfile`
pub mod nutrient_names {
    /// Energy in kcal
    pub const ENERGY: &str = "Energy";
    /// Protein in g
    pub const PROTEIN: &str = "Protein";
    /// Total fat in g
    pub const FAT: &str = "Total lipid (fat)";
    /// Carbohydrate in g
    pub const CARBOHYDRATE: &str = "Carbohydrate, by difference";
    /// Dietary fiber in g
    pub const FIBER: &str = "Fiber, total dietary";
    /// Total sugars in g
    pub const SUGARS: &str = "Sugars, total including NLEA";
}

/// USDA API client configuration
#[derive(Debug, Clone)]
pub struct UsdaClientConfig {
    /// USDA API key (free from <https://fdc.nal.usda.gov/api-key-signup.html>)
    pub api_key: String,
    /// Base URL for USDA API (default: <https://api.nal.usda.gov/fdc/v1>)
    pub base_url: String,
    /// Request timeout in seconds, used for error reporting
    pub timeout_secs: u64,
}

/// A food from the search endpoint, with its abridged nutrient list
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodSearchResult {
    /// `FoodData` Central ID
    pub fdc_id: u64,
    /// Food description
    #[serde(default)]
    pub description: String,
    /// Brand name (branded foods only)
    pub brand_name: Option<String>,
    /// Data type (e.g. "Branded", "Foundation", "SR Legacy")
    pub data_type: Option<String>,
    /// Nutrients per 100 g
    #[serde(default)]
    pub food_nutrients: Vec<SearchNutrient>,
}

/// A nutrient entry as returned by `/foods/search`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchNutrient {
    /// Nutrient ID
    pub nutrient_id: Option<u32>,
    /// Nutrient name (e.g. "Protein", "Energy")
    #[serde(default)]
    pub nutrient_name: String,
    /// Nutrient unit (e.g. "G", "KCAL")
    pub unit_name: Option<String>,
    /// Amount per 100 g
    pub value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<FoodSearchResult>,
}

impl FoodSearchResult {
    /// Value of the first nutrient whose name equals `name` exactly
    #[must_use]
    pub fn nutrient_value(&self, name: &str) -> Option<f64> {
        self.food_nutrients
            .iter()
            .find(|n| n.nutrient_name == name)
            .and_then(|n| n.value)
    }

    fn into_lookup_result(self) -> FoodLookupResult {
        let nutrients = NutrientProfile::from_upstream(
            self.nutrient_value(nutrient_names::ENERGY),
            self.nutrient_value(nutrient_names::PROTEIN),
            self.nutrient_value(nutrient_names::FAT),
            self.nutrient_value(nutrient_names::CARBOHYDRATE),
            self.nutrient_value(nutrient_names::FIBER),
            self.nutrient_value(nutrient_names::SUGARS),
        );

        let mut result = FoodLookupResult::new(
            self.fdc_id.to_string(),
            self.description,
            nutrients,
            LookupSource::Usda,
        );
        result.brand = self.brand_name.filter(|b| !b.is_empty());
        result
    }
}

/// USDA `FoodData` Central API Client
pub struct UsdaClient {
    config: UsdaClientConfig,
    http_client: reqwest::Client,
}

impl UsdaClient {
    /// Create a new USDA API client sharing `http_client`'s connection pool
    #[must_use]
    pub const fn new(config: UsdaClientConfig, http_client: reqwest::Client) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Search for foods by query string
    ///
    /// # Arguments
    /// * `query` - Search query (e.g., "apple", "chicken breast")
    /// * `page_size` - Number of results to return, clamped to 1-200
    ///
    /// An empty query returns no foods without calling the API.
    ///
    /// # Errors
    /// Returns a `ProviderError` if the API request fails or the body is malformed
    pub async fn search_foods(
        &self,
        query: &str,
        page_size: u32,
    ) -> ProviderResult<Vec<FoodSearchResult>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }

        let page_size = page_size.clamp(1, MAX_PAGE_SIZE).to_string();
        let url = format!("{}/foods/search", self.config.base_url);
        let request = self.http_client.get(&url).query(&[
            ("api_key", self.config.api_key.as_str()),
            ("query", query),
            ("pageSize", page_size.as_str()),
        ]);

        let response: SearchResponse =
            fetch_json(request, PROVIDER_NAME, self.config.timeout_secs).await?;
        Ok(response.foods)
    }
}

#[async_trait]
impl FoodDataProvider for UsdaClient {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn resolve(&self, query: &str) -> ProviderResult<Option<FoodLookupResult>> {
        let Some(food) = self.search_foods(query, 1).await?.into_iter().next() else {
            debug!(query, "USDA search returned no foods");
            return Ok(None);
        };
        Ok(Some(food.into_lookup_result()))
    }
}
