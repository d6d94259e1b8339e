// ABOUTME: Application-wide constants for service names, limits, and nutrition defaults
// ABOUTME: Groups constants by domain so routes, providers, and config share one source
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Service identifiers used in logs and JWT audiences
pub mod service_names {
    /// Name of the HTTP API service
    pub const BABYCARE_SERVER: &str = "babycare-server";
}

/// Default network settings
pub mod ports {
    /// Default HTTP port for the API server
    pub const DEFAULT_HTTP_PORT: u16 = 8081;
}

/// External food-data provider endpoints and limits
pub mod providers {
    /// TheMealDB v1 public API
    pub const MEALDB_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";
    /// Open Food Facts product API
    pub const OPEN_FOOD_FACTS_BASE_URL: &str = "https://world.openfoodfacts.org/api/v0/product";
    /// USDA `FoodData` Central API
    pub const USDA_BASE_URL: &str = "https://api.nal.usda.gov/fdc/v1";
    /// Per-provider timeout applied to each step of the lookup chain
    pub const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 5;
    /// Connection timeout for the shared HTTP client
    pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 3;
    /// TheMealDB exposes ingredients in numbered slots `1..=20`
    pub const MEALDB_INGREDIENT_SLOTS: usize = 20;
    /// Barcodes are 8 to 14 decimal digits (EAN-8 through GTIN-14)
    pub const BARCODE_MIN_DIGITS: usize = 8;
    /// Upper bound on barcode length
    pub const BARCODE_MAX_DIGITS: usize = 14;
}

/// Food id reported for the synthetic fallback result
pub const MOCK_FOOD_ID: &str = "mock-id";
