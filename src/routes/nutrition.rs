// ABOUTME: Nutrition lookup route handler backed by the provider fallback chain
// ABOUTME: Resolves a food name or barcode to a nutrient profile for the caller
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition lookup routes
//!
//! The lookup never fails once the query is accepted: when every provider
//! misses, the response carries the fixed fallback estimate.

use super::authenticate;
use crate::errors::AppError;
use crate::models::FoodLookupResult;
use crate::server::ServerResources;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Query parameters for nutrition lookup
#[derive(Debug, Deserialize)]
pub struct NutritionQuery {
    /// Food name or barcode
    pub query: Option<String>,
}

/// Response body for nutrition lookup
#[derive(Debug, Serialize, Deserialize)]
pub struct NutritionResponse {
    /// Resolved food
    pub food: FoodLookupResult,
}

/// Nutrition routes implementation
pub struct NutritionRoutes;

impl NutritionRoutes {
    /// Create all nutrition routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/nutrition", get(Self::handle_lookup))
            .with_state(resources)
    }

    /// Handle GET /api/nutrition - Look up nutrition for a food name or barcode
    async fn handle_lookup(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(params): Query<NutritionQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;

        let query = params
            .query
            .filter(|q| !q.is_empty())
            .ok_or_else(|| AppError::missing_field("Food query"))?;

        debug!(user_id = %auth.user_id, query = %query, "Nutrition lookup requested");
        let food = resources.nutrition.lookup(&query).await;

        Ok((StatusCode::OK, Json(NutritionResponse { food })).into_response())
    }
}
