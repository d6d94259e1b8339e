// ABOUTME: TheMealDB recipe search client, first step of the nutrition lookup chain
// ABOUTME: Maps the first matching meal to a result with estimated nutrients and ingredients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! TheMealDB recipe search
//!
//! TheMealDB is free and keyless but carries no nutrient data. A match is
//! reported with [`NutrientProfile::RECIPE_ESTIMATE`] and the meal's
//! ingredient list, image, and instructions.
//!
//! API reference: <https://www.themealdb.com/api.php>

use crate::constants::providers::MEALDB_INGREDIENT_SLOTS;
use crate::core::FoodDataProvider;
use crate::errors::ProviderResult;
use crate::http_client::fetch_json;
use crate::models::{FoodLookupResult, Ingredient, LookupSource, NutrientProfile};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

const PROVIDER_NAME: &str = "meal_db";

/// `search.php` response; `meals` is `null` when nothing matches
#[derive(Debug, Deserialize)]
struct MealSearchResponse {
    meals: Option<Vec<Meal>>,
}

#[derive(Debug, Deserialize)]
struct Meal {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strCategory")]
    category: Option<String>,
    #[serde(rename = "strArea")]
    area: Option<String>,
    #[serde(rename = "strInstructions")]
    instructions: Option<String>,
    #[serde(rename = "strMealThumb")]
    thumbnail: Option<String>,
    /// Numbered `strIngredientN` / `strMeasureN` slots and anything else
    #[serde(flatten)]
    slots: Map<String, Value>,
}

/// TheMealDB search client
pub struct MealDbClient {
    http_client: reqwest::Client,
    base_url: String,
    timeout_secs: u64,
}

impl MealDbClient {
    /// Create a client against `base_url` (no trailing slash)
    pub fn new(http_client: reqwest::Client, base_url: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            http_client,
            base_url: base_url.into(),
            timeout_secs,
        }
    }

    /// Search meals by name and return the first match, if any
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` if the request fails or the body is malformed
    pub async fn search_first(&self, query: &str) -> ProviderResult<Option<FoodLookupResult>> {
        let url = format!("{}/search.php", self.base_url);
        let request = self.http_client.get(&url).query(&[("s", query)]);
        let response: MealSearchResponse =
            fetch_json(request, PROVIDER_NAME, self.timeout_secs).await?;

        let Some(meal) = response.meals.and_then(|meals| meals.into_iter().next()) else {
            debug!(query, "TheMealDB returned no meals");
            return Ok(None);
        };

        let mut result = FoodLookupResult::new(
            meal.id,
            meal.name,
            NutrientProfile::RECIPE_ESTIMATE,
            LookupSource::MealDb,
        );
        result.ingredients = Some(extract_ingredients(&meal.slots));
        result.image = meal.thumbnail;
        result.instructions = meal.instructions;
        result.category = meal.category;
        result.area = meal.area;

        Ok(Some(result))
    }
}

#[async_trait]
impl FoodDataProvider for MealDbClient {
    fn name(&self) -> &'static str {
        PROVIDER_NAME
    }

    async fn resolve(&self, query: &str) -> ProviderResult<Option<FoodLookupResult>> {
        self.search_first(query).await
    }
}

/// Collect ingredients from the numbered meal slots
///
/// Only slots `1..=20` are read. Slots whose ingredient name is missing,
/// empty, or whitespace are skipped; a missing measure becomes `""`.
#[must_use]
pub fn extract_ingredients(slots: &Map<String, Value>) -> Vec<Ingredient> {
    (1..=MEALDB_INGREDIENT_SLOTS)
        .filter_map(|slot| {
            let name = slots
                .get(&format!("strIngredient{slot}"))
                .and_then(Value::as_str)
                .filter(|name| !name.trim().is_empty())?;
            let measure = slots
                .get(&format!("strMeasure{slot}"))
                .and_then(Value::as_str)
                .unwrap_or_default();

            Some(Ingredient {
                name: name.to_owned(),
                measure: measure.to_owned(),
            })
        })
        .collect()
}
