// ABOUTME: System-wide constants and environment-backed configuration values
// ABOUTME: Re-exports shared constants from babycare-core and adds env var accessors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Constants Module
//!
//! Hardcoded constants live in `babycare-core`; this module adds the
//! environment variable accessors the server configuration is built from.

pub use babycare_core::constants::{ports, providers, service_names, MOCK_FOOD_ID};

use std::env;

/// Name of the cookie the session provider stores its JWT in
pub const AUTH_COOKIE_NAME: &str = "auth_token";

/// Signing secret used only in development when `JWT_SECRET` is unset
pub const DEV_JWT_SECRET: &str = "babycare-development-secret-change-me";

/// Upper bound on a whole HTTP request
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Most providers a single nutrition lookup can try before the fallback
pub const MAX_NUTRITION_PROVIDERS: u64 = 3;

/// Environment-based configuration accessors
pub mod env_config {
    use super::{env, ports, providers};

    /// Get `HTTP` server port from environment or default
    #[must_use]
    pub fn http_port() -> u16 {
        env::var("HTTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(ports::DEFAULT_HTTP_PORT)
    }

    /// Get bind host from environment or default
    #[must_use]
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into())
    }

    /// Get database `URL` from environment or default
    #[must_use]
    pub fn database_url() -> String {
        env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./data/babycare.db".into())
    }

    /// Get the JWT signing secret, if configured
    #[must_use]
    pub fn jwt_secret() -> Option<String> {
        non_empty("JWT_SECRET")
    }

    /// Get the USDA `FoodData` Central API key, if configured
    #[must_use]
    pub fn fdc_api_key() -> Option<String> {
        non_empty("FDC_API_KEY")
    }

    /// Get TheMealDB base URL from environment or default
    #[must_use]
    pub fn mealdb_base_url() -> String {
        env::var("MEALDB_BASE_URL").unwrap_or_else(|_| providers::MEALDB_BASE_URL.into())
    }

    /// Get Open Food Facts base URL from environment or default
    #[must_use]
    pub fn open_food_facts_base_url() -> String {
        env::var("OPEN_FOOD_FACTS_BASE_URL")
            .unwrap_or_else(|_| providers::OPEN_FOOD_FACTS_BASE_URL.into())
    }

    /// Get USDA base URL from environment or default
    #[must_use]
    pub fn usda_base_url() -> String {
        env::var("USDA_BASE_URL").unwrap_or_else(|_| providers::USDA_BASE_URL.into())
    }

    /// Get per-provider lookup timeout in seconds
    #[must_use]
    pub fn nutrition_provider_timeout_secs() -> u64 {
        env::var("NUTRITION_PROVIDER_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(providers::DEFAULT_PROVIDER_TIMEOUT_SECS)
    }

    /// Get deployment environment name
    #[must_use]
    pub fn environment() -> String {
        env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into())
    }

    /// Get comma-separated CORS origins
    #[must_use]
    pub fn cors_allowed_origins() -> String {
        env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".into())
    }

    fn non_empty(key: &str) -> Option<String> {
        env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}
