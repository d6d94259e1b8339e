// ABOUTME: Baby profile route handlers for listing and creating a parent's babies
// ABOUTME: Every baby belongs to the authenticated caller that created it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{authenticate, json_body, non_blank, parse_datetime};
use crate::errors::{AppError, AppResult};
use crate::models::{Baby, Gender};
use crate::server::ServerResources;
use axum::{
    extract::{rejection::JsonRejection, State},
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

/// Request body for creating a baby
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBabyBody {
    /// Display name
    pub name: Option<String>,
    /// Birth date (RFC 3339 or `YYYY-MM-DD`)
    pub birth_date: Option<String>,
    /// `male`, `female`, or `other`
    pub gender: Option<String>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Height in centimetres
    pub height: Option<f64>,
}

/// Response for listing babies
#[derive(Debug, Serialize, Deserialize)]
pub struct ListBabiesResponse {
    /// Caller's babies, newest first
    pub babies: Vec<Baby>,
}

/// Response for a created baby
#[derive(Debug, Serialize, Deserialize)]
pub struct BabyResponse {
    /// The stored profile
    pub baby: Baby,
}

/// Baby routes implementation
pub struct BabiesRoutes;

impl BabiesRoutes {
    /// Create all baby routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/babies",
                get(Self::handle_list).post(Self::handle_create),
            )
            .with_state(resources)
    }

    /// Handle GET /api/babies - List the caller's babies
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let babies = resources
            .database
            .babies()
            .list_for_parent(&auth.user_id)
            .await?;

        Ok((StatusCode::OK, Json(ListBabiesResponse { babies })).into_response())
    }

    /// Handle POST /api/babies - Create a baby profile
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<CreateBabyBody>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let body = json_body(body)?;
        let baby = Self::build_baby(&body, &auth.user_id)?;

        resources.database.babies().create(&baby).await?;
        info!(baby_id = %baby.id, parent_id = %baby.parent_id, "Created baby profile");

        Ok((StatusCode::CREATED, Json(BabyResponse { baby })).into_response())
    }

    fn build_baby(body: &CreateBabyBody, parent_id: &str) -> AppResult<Baby> {
        let name = non_blank(body.name.as_deref())
            .ok_or_else(|| AppError::missing_field("name"))?
            .to_owned();
        let birth_date = non_blank(body.birth_date.as_deref())
            .ok_or_else(|| AppError::missing_field("birthDate"))?;
        let birth_date = parse_datetime("birthDate", birth_date)?;
        let gender = non_blank(body.gender.as_deref())
            .ok_or_else(|| AppError::missing_field("gender"))?;
        let gender = Gender::parse(gender).ok_or_else(|| {
            AppError::invalid_input(format!(
                "Invalid gender '{gender}': expected male, female, or other"
            ))
        })?;

        Ok(Baby {
            id: Uuid::new_v4(),
            parent_id: parent_id.to_owned(),
            name,
            birth_date,
            gender,
            weight: positive_measurement("weight", body.weight)?,
            height: positive_measurement("height", body.height)?,
            created_at: Utc::now(),
        })
    }
}

/// Zero means "not measured"; negative values are rejected
fn positive_measurement(field: &str, value: Option<f64>) -> AppResult<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() || v < 0.0 => Err(AppError::invalid_input(format!(
            "{field} must be a non-negative number"
        ))),
        Some(v) if v > 0.0 => Ok(Some(v)),
        _ => Ok(None),
    }
}
