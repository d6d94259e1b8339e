// ABOUTME: External food-data providers and the nutrition lookup fallback chain
// ABOUTME: Provider trait, shared HTTP client, TheMealDB, Open Food Facts, and USDA clients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! Food-data provider implementations and the lookup chain built on them.
//!
//! Providers are tried in a fixed order (recipe database, barcode database,
//! government database) and the first one that resolves a query wins. When
//! none do, the chain returns a synthetic estimate instead of an error.

// Re-export babycare-core modules so provider files can keep `use crate::errors::*`
pub use babycare_core::constants;
pub use babycare_core::errors;
pub use babycare_core::models;

/// Core provider trait shared by every food-data source
pub mod core;
/// Shared HTTP client construction and JSON fetching
pub mod http_client;
/// Ordered fallback chain over the configured providers
pub mod lookup;
/// TheMealDB recipe search provider
pub mod mealdb;
/// Open Food Facts barcode provider
pub mod open_food_facts;
/// USDA `FoodData` Central provider
pub mod usda;

pub use self::core::FoodDataProvider;
pub use http_client::{build_client, HttpClientConfig};
pub use lookup::{NutritionLookupConfig, NutritionLookupService};
pub use mealdb::MealDbClient;
pub use open_food_facts::{is_barcode, OpenFoodFactsClient};
pub use usda::{UsdaClient, UsdaClientConfig};
