// ABOUTME: Food intake records logged against a baby
// ABOUTME: FoodIntake, FoodType, IntakeUnit, and NutritionalInfo definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::nutrition::NutrientProfile;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Kind of food given
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoodType {
    /// Breast milk
    #[serde(rename = "breast milk")]
    BreastMilk,
    /// Infant formula
    #[serde(rename = "formula")]
    Formula,
    /// Solid food
    #[serde(rename = "solid food")]
    SolidFood,
    /// Water
    #[serde(rename = "water")]
    Water,
    /// Anything else
    #[serde(rename = "other")]
    Other,
}

impl FoodType {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BreastMilk => "breast milk",
            Self::Formula => "formula",
            Self::SolidFood => "solid food",
            Self::Water => "water",
            Self::Other => "other",
        }
    }

    /// Parse from string, rejecting unknown values
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "breast milk" => Some(Self::BreastMilk),
            "formula" => Some(Self::Formula),
            "solid food" => Some(Self::SolidFood),
            "water" => Some(Self::Water),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// Unit the amount is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntakeUnit {
    /// Millilitres
    Ml,
    /// Fluid ounces
    Oz,
    /// Grams
    G,
    /// One serving
    Serving,
}

impl IntakeUnit {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ml => "ml",
            Self::Oz => "oz",
            Self::G => "g",
            Self::Serving => "serving",
        }
    }

    /// Parse from string, rejecting unknown values
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ml" => Some(Self::Ml),
            "oz" => Some(Self::Oz),
            "g" => Some(Self::G),
            "serving" => Some(Self::Serving),
            _ => None,
        }
    }
}

/// Nutrition stored alongside an intake record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NutritionalInfo {
    /// Energy in kcal
    pub calories: f64,
    /// Protein in grams
    pub protein: f64,
    /// Carbohydrate in grams
    pub carbs: f64,
    /// Fat in grams
    pub fat: f64,
    /// Fiber in grams
    pub fiber: f64,
    /// Sugar in grams
    pub sugar: f64,
    /// Vitamin name to amount
    pub vitamins: BTreeMap<String, f64>,
    /// Mineral name to amount
    pub minerals: BTreeMap<String, f64>,
}

impl From<&NutrientProfile> for NutritionalInfo {
    fn from(profile: &NutrientProfile) -> Self {
        Self {
            calories: profile.calories,
            protein: profile.protein,
            carbs: profile.carbs,
            fat: profile.fat,
            fiber: profile.fiber,
            sugar: profile.sugar.unwrap_or(0.0),
            vitamins: BTreeMap::new(),
            minerals: BTreeMap::new(),
        }
    }
}

/// A single feeding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodIntake {
    /// Unique identifier
    pub id: Uuid,
    /// Baby this feeding belongs to
    pub baby_id: Uuid,
    /// Name of the food
    pub food_name: String,
    /// Kind of food
    pub food_type: FoodType,
    /// Quantity consumed
    pub amount: f64,
    /// Unit of `amount`
    pub unit: IntakeUnit,
    /// When the food was consumed
    pub consumed_at: DateTime<Utc>,
    /// Nutrition for this feeding
    pub nutritional_info: NutritionalInfo,
    /// Free-text notes
    pub notes: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
