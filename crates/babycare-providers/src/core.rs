// ABOUTME: Core trait implemented by every external food-data provider
// ABOUTME: One capability: try to resolve a query into a normalized FoodLookupResult
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::ProviderResult;
use crate::models::FoodLookupResult;
use async_trait::async_trait;

/// A source of food and nutrient data
///
/// `Ok(None)` means the provider answered but had no match; `Err` means the
/// provider could not be consulted. The lookup chain treats both as "try the
/// next provider".
#[async_trait]
pub trait FoodDataProvider: Send + Sync {
    /// Stable provider name for logs
    fn name(&self) -> &'static str;

    /// Whether this provider should be consulted for `query` at all
    fn accepts(&self, _query: &str) -> bool {
        true
    }

    /// Resolve `query` into a normalized result
    async fn resolve(&self, query: &str) -> ProviderResult<Option<FoodLookupResult>>;
}
