// ABOUTME: NutritionLookupService, the ordered fallback chain over food-data providers
// ABOUTME: Tries recipe, barcode, then USDA lookups and falls back to a synthetic estimate
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition lookup chain
//!
//! `lookup` never fails. Each provider step is bounded by the configured
//! timeout; a transport error, non-success status, malformed body, or timeout
//! is logged and the chain moves on to the next provider.

use crate::constants::providers::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_PROVIDER_TIMEOUT_SECS, MEALDB_BASE_URL,
    OPEN_FOOD_FACTS_BASE_URL, USDA_BASE_URL,
};
use crate::core::FoodDataProvider;
use crate::errors::ProviderError;
use crate::http_client::{build_client, HttpClientConfig};
use crate::mealdb::MealDbClient;
use crate::models::FoodLookupResult;
use crate::open_food_facts::OpenFoodFactsClient;
use crate::usda::{UsdaClient, UsdaClientConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Settings for the provider chain
#[derive(Debug, Clone)]
pub struct NutritionLookupConfig {
    /// TheMealDB API base URL
    pub mealdb_base_url: String,
    /// Open Food Facts product API base URL
    pub open_food_facts_base_url: String,
    /// USDA `FoodData` Central API base URL
    pub usda_base_url: String,
    /// USDA API key; the USDA step is skipped when absent or blank
    pub usda_api_key: Option<String>,
    /// Upper bound on each provider step
    pub provider_timeout: Duration,
}

impl Default for NutritionLookupConfig {
    fn default() -> Self {
        Self {
            mealdb_base_url: MEALDB_BASE_URL.to_owned(),
            open_food_facts_base_url: OPEN_FOOD_FACTS_BASE_URL.to_owned(),
            usda_base_url: USDA_BASE_URL.to_owned(),
            usda_api_key: None,
            provider_timeout: Duration::from_secs(DEFAULT_PROVIDER_TIMEOUT_SECS),
        }
    }
}

/// Ordered fallback chain over the configured providers
#[derive(Clone)]
pub struct NutritionLookupService {
    providers: Vec<Arc<dyn FoodDataProvider>>,
    provider_timeout: Duration,
}

impl NutritionLookupService {
    /// Build the standard chain: TheMealDB, Open Food Facts, then USDA when keyed
    #[must_use]
    pub fn new(config: &NutritionLookupConfig) -> Self {
        let timeout_secs = config.provider_timeout.as_secs().max(1);
        let http_client = build_client(HttpClientConfig {
            timeout_secs,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
        });

        let mut providers: Vec<Arc<dyn FoodDataProvider>> = vec![
            Arc::new(MealDbClient::new(
                http_client.clone(),
                config.mealdb_base_url.clone(),
                timeout_secs,
            )),
            Arc::new(OpenFoodFactsClient::new(
                http_client.clone(),
                config.open_food_facts_base_url.clone(),
                timeout_secs,
            )),
        ];

        match config.usda_api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => {
                providers.push(Arc::new(UsdaClient::new(
                    UsdaClientConfig {
                        api_key: key.to_owned(),
                        base_url: config.usda_base_url.clone(),
                        timeout_secs,
                    },
                    http_client,
                )));
            }
            _ => debug!("No USDA API key configured, USDA lookups disabled"),
        }

        Self::with_providers(providers, config.provider_timeout)
    }

    /// Build a chain from an explicit provider list, tried in order
    #[must_use]
    pub fn with_providers(
        providers: Vec<Arc<dyn FoodDataProvider>>,
        provider_timeout: Duration,
    ) -> Self {
        Self {
            providers,
            provider_timeout,
        }
    }

    /// Provider names in the order they are tried
    #[must_use]
    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Resolve `query` to a food, falling back to a synthetic estimate
    pub async fn lookup(&self, query: &str) -> FoodLookupResult {
        for provider in &self.providers {
            if !provider.accepts(query) {
                debug!(provider = provider.name(), query, "Provider skipped for query");
                continue;
            }

            match self.try_provider(provider.as_ref(), query).await {
                Ok(Some(result)) => {
                    info!(
                        provider = provider.name(),
                        query,
                        food_id = %result.food_id,
                        source = result.source.as_str(),
                        "Nutrition lookup resolved"
                    );
                    return result;
                }
                Ok(None) => debug!(provider = provider.name(), query, "No match from provider"),
                Err(e) => warn!(
                    provider = provider.name(),
                    query,
                    error = %e,
                    timed_out = e.is_timeout(),
                    "Nutrition provider failed, trying next"
                ),
            }
        }

        info!(query, "No provider resolved query, returning estimate");
        FoodLookupResult::fallback(query)
    }

    async fn try_provider(
        &self,
        provider: &dyn FoodDataProvider,
        query: &str,
    ) -> Result<Option<FoodLookupResult>, ProviderError> {
        tokio::time::timeout(self.provider_timeout, provider.resolve(query))
            .await
            .unwrap_or_else(|_| {
                Err(ProviderError::Timeout {
                    provider: provider.name().to_owned(),
                    timeout_secs: self.provider_timeout.as_secs(),
                })
            })
    }
}
