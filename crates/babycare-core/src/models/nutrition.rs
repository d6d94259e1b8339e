// ABOUTME: Nutrition lookup models shared by the provider chain and the HTTP layer
// ABOUTME: NutrientProfile, Ingredient, FoodLookupResult, and LookupSource definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::MOCK_FOOD_ID;
use serde::{Deserialize, Serialize};

/// Macro-nutrient quantities attached to every lookup result
///
/// Wire keys follow the nutrient codes the web client already understands
/// (`ENERC_KCAL`, `PROCNT`, ...). All values are non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct NutrientProfile {
    /// Energy in kcal
    #[serde(rename = "ENERC_KCAL")]
    pub calories: f64,
    /// Protein in grams
    #[serde(rename = "PROCNT")]
    pub protein: f64,
    /// Total fat in grams
    #[serde(rename = "FAT")]
    pub fat: f64,
    /// Carbohydrate in grams
    #[serde(rename = "CHOCDF")]
    pub carbs: f64,
    /// Dietary fiber in grams
    #[serde(rename = "FIBTG")]
    pub fiber: f64,
    /// Sugars in grams, when the source reports them
    #[serde(rename = "SUGAR", default, skip_serializing_if = "Option::is_none")]
    pub sugar: Option<f64>,
}

impl NutrientProfile {
    /// Placeholder estimate attached to any recipe-database match.
    ///
    /// The recipe provider carries no nutrient data, so every meal gets the
    /// same numbers regardless of what matched.
    pub const RECIPE_ESTIMATE: Self = Self {
        calories: 250.0,
        protein: 15.0,
        fat: 10.0,
        carbs: 30.0,
        fiber: 5.0,
        sugar: None,
    };

    /// Synthetic profile returned when no provider resolves the query
    pub const FALLBACK_ESTIMATE: Self = Self {
        calories: 100.0,
        protein: 5.0,
        fat: 3.0,
        carbs: 15.0,
        fiber: 2.0,
        sugar: Some(5.0),
    };

    /// Build a profile from optional upstream values, defaulting missing ones to 0
    #[must_use]
    pub fn from_upstream(
        calories: Option<f64>,
        protein: Option<f64>,
        fat: Option<f64>,
        carbs: Option<f64>,
        fiber: Option<f64>,
        sugar: Option<f64>,
    ) -> Self {
        Self {
            calories: non_negative(calories),
            protein: non_negative(protein),
            fat: non_negative(fat),
            carbs: non_negative(carbs),
            fiber: non_negative(fiber),
            sugar: Some(non_negative(sugar)),
        }
    }
}

/// Missing, NaN, or negative upstream values collapse to zero
fn non_negative(value: Option<f64>) -> f64 {
    value
        .filter(|v| v.is_finite())
        .map_or(0.0, |v| v.max(0.0))
}

/// One ingredient line of a recipe match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name as reported by the provider
    pub name: String,
    /// Free-text measure ("1 cup"), empty when the provider has none
    #[serde(default)]
    pub measure: String,
}

/// Which step of the lookup chain produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupSource {
    /// TheMealDB recipe search
    MealDb,
    /// Open Food Facts barcode lookup
    OpenFoodFacts,
    /// USDA `FoodData` Central search
    Usda,
    /// Synthetic fallback; treat as low-confidence data
    Estimate,
}

impl LookupSource {
    /// Stable name used in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MealDb => "meal_db",
            Self::OpenFoodFacts => "open_food_facts",
            Self::Usda => "usda",
            Self::Estimate => "estimate",
        }
    }
}

/// A resolved food item with exactly one nutrient profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodLookupResult {
    /// Provider-scoped identifier
    pub food_id: String,
    /// Display name
    pub label: String,
    /// Nutrient profile, never absent
    pub nutrients: NutrientProfile,
    /// Brand or manufacturer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Image URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Structured ingredient list (recipe matches)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<Ingredient>>,
    /// Free-text ingredient list (packaged products)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients_text: Option<String>,
    /// Preparation instructions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    /// Recipe category ("Dessert", "Chicken", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Recipe cuisine area ("Italian", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    /// Provider that resolved this result
    pub source: LookupSource,
}

impl FoodLookupResult {
    /// Create a result with only the guaranteed fields set
    pub fn new(
        food_id: impl Into<String>,
        label: impl Into<String>,
        nutrients: NutrientProfile,
        source: LookupSource,
    ) -> Self {
        Self {
            food_id: food_id.into(),
            label: label.into(),
            nutrients,
            brand: None,
            image: None,
            ingredients: None,
            ingredients_text: None,
            instructions: None,
            category: None,
            area: None,
            source,
        }
    }

    /// Synthetic result used when every provider came back empty
    #[must_use]
    pub fn fallback(query: &str) -> Self {
        Self::new(
            MOCK_FOOD_ID,
            query,
            NutrientProfile::FALLBACK_ESTIMATE,
            LookupSource::Estimate,
        )
    }

    /// Whether the nutrients are a synthetic estimate rather than provider data
    #[must_use]
    pub fn is_estimate(&self) -> bool {
        matches!(self.source, LookupSource::Estimate | LookupSource::MealDb)
    }
}
