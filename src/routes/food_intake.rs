// ABOUTME: Food intake route handlers for logging and listing a baby's feedings
// ABOUTME: Enforces baby ownership and inclusive consumedAt date filters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Food intake routes
//!
//! Intakes are always scoped to a baby the caller owns. A baby belonging to
//! another parent is reported exactly like a missing one.

use super::{
    authenticate, json_body, non_blank, parse_datetime, parse_optional_datetime,
    require_owned_baby,
};
use crate::database::FoodIntakeFilter;
use crate::errors::{AppError, AppResult};
use crate::models::{FoodIntake, FoodType, IntakeUnit, NutritionalInfo};
use crate::server::ServerResources;
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use http::HeaderMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Query parameters for listing food intakes
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFoodIntakeQuery {
    /// Baby to list intakes for (required)
    pub baby_id: Option<String>,
    /// Earliest `consumedAt` to include
    pub start_date: Option<String>,
    /// Latest `consumedAt` to include
    pub end_date: Option<String>,
}

/// Request body for logging a food intake
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFoodIntakeBody {
    /// Baby the intake belongs to
    pub baby_id: Option<String>,
    /// What was eaten
    pub food_name: Option<String>,
    /// `breast milk`, `formula`, `solid food`, `water`, or `other`
    pub food_type: Option<String>,
    /// Quantity in `unit`; must be positive
    pub amount: Option<f64>,
    /// `ml`, `oz`, `g`, or `serving`
    pub unit: Option<String>,
    /// When it was consumed; defaults to now
    pub consumed_at: Option<String>,
    /// Nutrient values, usually copied from a nutrition lookup
    pub nutritional_info: Option<NutritionalInfo>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Response for listing food intakes
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFoodIntakeResponse {
    /// Matching intakes, most recent first
    pub food_intakes: Vec<FoodIntake>,
}

/// Response for a logged food intake
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodIntakeResponse {
    /// The stored intake
    pub food_intake: FoodIntake,
}

/// Food intake routes implementation
pub struct FoodIntakeRoutes;

impl FoodIntakeRoutes {
    /// Create all food intake routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/food-intake",
                get(Self::handle_list).post(Self::handle_create),
            )
            .with_state(resources)
    }

    /// Handle GET /api/food-intake - List a baby's intakes
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListFoodIntakeQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let baby_id =
            non_blank(query.baby_id.as_deref()).ok_or_else(|| AppError::missing_field("babyId"))?;
        let baby = require_owned_baby(&resources, baby_id, &auth.user_id).await?;

        let filter = FoodIntakeFilter {
            start: parse_optional_datetime("startDate", query.start_date.as_deref())?,
            end: parse_optional_datetime("endDate", query.end_date.as_deref())?,
        };
        let food_intakes = resources
            .database
            .food_intake()
            .list(baby.id, &filter)
            .await?;

        Ok((StatusCode::OK, Json(ListFoodIntakeResponse { food_intakes })).into_response())
    }

    /// Handle POST /api/food-intake - Log a food intake
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<CreateFoodIntakeBody>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let body = json_body(body)?;
        let fields = RequiredFields::from_body(&body)?;
        let baby = require_owned_baby(&resources, fields.baby_id, &auth.user_id).await?;

        let consumed_at = match non_blank(body.consumed_at.as_deref()) {
            Some(value) => parse_datetime("consumedAt", value)?,
            None => Utc::now(),
        };
        let intake = FoodIntake {
            id: Uuid::new_v4(),
            baby_id: baby.id,
            food_name: fields.food_name.to_owned(),
            food_type: fields.food_type,
            amount: fields.amount,
            unit: fields.unit,
            consumed_at,
            nutritional_info: body.nutritional_info.unwrap_or_default(),
            notes: body.notes.unwrap_or_default(),
            created_at: Utc::now(),
        };

        resources.database.food_intake().create(&intake).await?;
        info!(
            intake_id = %intake.id,
            baby_id = %intake.baby_id,
            food_type = intake.food_type.as_str(),
            "Logged food intake"
        );

        Ok((StatusCode::CREATED, Json(FoodIntakeResponse { food_intake: intake })).into_response())
    }
}

/// Validated required fields of a create request
struct RequiredFields<'a> {
    baby_id: &'a str,
    food_name: &'a str,
    food_type: FoodType,
    amount: f64,
    unit: IntakeUnit,
}

impl<'a> RequiredFields<'a> {
    fn from_body(body: &'a CreateFoodIntakeBody) -> AppResult<Self> {
        let baby_id =
            non_blank(body.baby_id.as_deref()).ok_or_else(|| AppError::missing_field("babyId"))?;
        let food_name = non_blank(body.food_name.as_deref())
            .ok_or_else(|| AppError::missing_field("foodName"))?;
        let food_type = non_blank(body.food_type.as_deref())
            .ok_or_else(|| AppError::missing_field("foodType"))?;
        let food_type = FoodType::parse(food_type).ok_or_else(|| {
            AppError::invalid_input(format!("Invalid foodType '{food_type}'"))
        })?;
        let amount = body.amount.ok_or_else(|| AppError::missing_field("amount"))?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AppError::invalid_input("amount must be greater than zero"));
        }
        let unit = non_blank(body.unit.as_deref()).ok_or_else(|| AppError::missing_field("unit"))?;
        let unit = IntakeUnit::parse(unit)
            .ok_or_else(|| AppError::invalid_input(format!("Invalid unit '{unit}'")))?;

        Ok(Self {
            baby_id,
            food_name,
            food_type,
            amount,
            unit,
        })
    }
}
