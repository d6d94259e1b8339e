// ABOUTME: Route module organization for the baby-care API HTTP endpoints
// ABOUTME: Domain route structs plus the request helpers they share (auth, dates, ownership)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the baby-care API
//!
//! Each domain module holds route definitions and thin handlers that
//! authenticate, validate, call a database manager or the lookup service, and
//! serialize the result.

/// Activity logging routes
pub mod activities;
/// Baby profile routes
pub mod babies;
/// Food intake logging routes
pub mod food_intake;
/// Health check and readiness routes
pub mod health;
/// Nutrition lookup routes
pub mod nutrition;

/// Activity route handlers
pub use activities::ActivitiesRoutes;
/// Baby profile route handlers
pub use babies::BabiesRoutes;
/// Food intake route handlers
pub use food_intake::FoodIntakeRoutes;
/// Health check route handlers
pub use health::HealthRoutes;
/// Nutrition lookup route handlers
pub use nutrition::NutritionRoutes;

use crate::auth::AuthResult;
use crate::errors::{AppError, AppResult};
use crate::models::Baby;
use crate::server::ServerResources;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use chrono::{DateTime, NaiveDate, Utc};
use http::HeaderMap;
use tracing::Span;
use uuid::Uuid;

/// Authenticate a request from its Authorization header or `auth_token` cookie
///
/// # Errors
///
/// Returns a 401 `AppError` when the token is missing, invalid, or expired
pub fn authenticate(headers: &HeaderMap, resources: &ServerResources) -> AppResult<AuthResult> {
    let auth = resources.auth_manager.authenticate_request(headers)?;
    Span::current().record("user_id", auth.user_id.as_str());
    Ok(auth)
}

/// Unwrap a JSON body, turning extractor rejections into 400 responses
///
/// # Errors
///
/// Returns `INVALID_INPUT` when the body is absent or not the expected JSON
pub fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::invalid_input(format!("Invalid request body: {rejection}")))
}

/// Treat a missing or blank parameter as absent
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` date (midnight UTC)
///
/// # Errors
///
/// Returns `INVALID_FORMAT` naming `field` when the value is neither
pub fn parse_datetime(field: &str, value: &str) -> AppResult<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            AppError::invalid_format(format!(
                "{field} must be an RFC 3339 timestamp or YYYY-MM-DD date"
            ))
        })
}

/// Parse an optional date filter parameter; blank values are absent
///
/// # Errors
///
/// Returns `INVALID_FORMAT` when a present value does not parse
pub fn parse_optional_datetime(field: &str, value: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    non_blank(value)
        .map(|v| parse_datetime(field, v))
        .transpose()
}

/// Load a baby owned by the caller
///
/// Unknown ids, malformed ids, and other parents' babies all report 404.
///
/// # Errors
///
/// Returns `RESOURCE_NOT_FOUND` when the caller does not own such a baby
pub async fn require_owned_baby(
    resources: &ServerResources,
    baby_id: &str,
    parent_id: &str,
) -> AppResult<Baby> {
    let Ok(id) = Uuid::parse_str(baby_id.trim()) else {
        return Err(AppError::not_found("Baby"));
    };
    resources
        .database
        .babies()
        .get_for_parent(id, parent_id)
        .await?
        .ok_or_else(|| AppError::not_found("Baby"))
}
