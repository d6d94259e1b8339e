// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, deployment modes, and validation of server settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management for production deployment

use crate::constants::{
    env_config, DEV_JWT_SECRET, MAX_NUTRITION_PROVIDERS, REQUEST_TIMEOUT_SECS,
};
use anyhow::{bail, Result};
use babycare_providers::NutritionLookupConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use tracing::{info, warn};

/// Environment type for security and other configurations
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// External food-data provider settings
#[derive(Debug, Clone)]
pub struct NutritionConfig {
    /// TheMealDB API base URL
    pub mealdb_base_url: String,
    /// Open Food Facts product API base URL
    pub open_food_facts_base_url: String,
    /// USDA `FoodData` Central API base URL
    pub usda_base_url: String,
    /// USDA API key; lookups skip USDA when unset
    pub fdc_api_key: Option<String>,
    /// Per-provider timeout in seconds
    pub provider_timeout_secs: u64,
}

impl NutritionConfig {
    /// Lookup-chain configuration derived from these settings
    #[must_use]
    pub fn lookup_config(&self) -> NutritionLookupConfig {
        NutritionLookupConfig {
            mealdb_base_url: self.mealdb_base_url.clone(),
            open_food_facts_base_url: self.open_food_facts_base_url.clone(),
            usda_base_url: self.usda_base_url.clone(),
            usda_api_key: self.fdc_api_key.clone(),
            provider_timeout: Duration::from_secs(self.provider_timeout_secs),
        }
    }
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Bind address
    pub host: String,
    /// `SQLx` database URL (`sqlite:...`)
    pub database_url: String,
    /// HS256 secret shared with the session provider
    pub jwt_secret: Option<String>,
    /// Deployment environment
    pub environment: Environment,
    /// Allowed CORS origins; `*` allows any
    pub cors_allowed_origins: Vec<String>,
    /// Nutrition provider settings
    pub nutrition: NutritionConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the loaded configuration fails [`Self::validate`]
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let config = Self {
            http_port: env_config::http_port(),
            host: env_config::host(),
            database_url: env_config::database_url(),
            jwt_secret: env_config::jwt_secret(),
            environment: Environment::from_str_or_default(&env_config::environment()),
            cors_allowed_origins: parse_origins(&env_config::cors_allowed_origins()),
            nutrition: NutritionConfig {
                mealdb_base_url: env_config::mealdb_base_url(),
                open_food_facts_base_url: env_config::open_food_facts_base_url(),
                usda_base_url: env_config::usda_base_url(),
                fdc_api_key: env_config::fdc_api_key(),
                provider_timeout_secs: env_config::nutrition_provider_timeout_secs(),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns an error for a zero port, a provider timeout that is zero or
    /// lets the full provider chain outlast the request timeout, or a
    /// production deployment without `JWT_SECRET`
    pub fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            bail!("HTTP_PORT must be a non-zero port number");
        }
        if self.nutrition.provider_timeout_secs == 0 {
            bail!("NUTRITION_PROVIDER_TIMEOUT_SECS must be at least 1");
        }
        let chain_budget_secs = self
            .nutrition
            .provider_timeout_secs
            .saturating_mul(MAX_NUTRITION_PROVIDERS);
        if chain_budget_secs >= REQUEST_TIMEOUT_SECS {
            bail!(
                "NUTRITION_PROVIDER_TIMEOUT_SECS must be below {}s so {MAX_NUTRITION_PROVIDERS} providers finish within the {REQUEST_TIMEOUT_SECS}s request timeout",
                REQUEST_TIMEOUT_SECS.div_ceil(MAX_NUTRITION_PROVIDERS)
            );
        }
        if self.jwt_secret.is_none() {
            if self.environment.is_production() {
                bail!("JWT_SECRET is required in production");
            }
            warn!("JWT_SECRET not set, using the development signing secret");
        }
        if self.nutrition.fdc_api_key.is_none() {
            info!("FDC_API_KEY not set, USDA nutrition lookups disabled");
        }
        Ok(())
    }

    /// JWT secret, falling back to the development secret outside production
    #[must_use]
    pub fn jwt_secret_or_default(&self) -> &str {
        self.jwt_secret.as_deref().unwrap_or(DEV_JWT_SECRET)
    }

    /// Secret-free configuration summary for the startup log
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Baby-care API Configuration:\n\
             - Environment: {}\n\
             - Bind: {}:{}\n\
             - Database: {}\n\
             - JWT Secret: {}\n\
             - USDA Lookups: {}\n\
             - Provider Timeout: {}s\n\
             - CORS Origins: {}",
            self.environment,
            self.host,
            self.http_port,
            redact_database_url(&self.database_url),
            if self.jwt_secret.is_some() {
                "Configured"
            } else {
                "Development default"
            },
            if self.nutrition.fdc_api_key.is_some() {
                "Enabled"
            } else {
                "Disabled"
            },
            self.nutrition.provider_timeout_secs,
            self.cors_allowed_origins.join(", "),
        )
    }
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    origins_str
        .split(',')
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Drop any query string (which may carry credentials) from a database URL
fn redact_database_url(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}
