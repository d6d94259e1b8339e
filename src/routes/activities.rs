// ABOUTME: Activity route handlers for logging and listing diaper, sleep, bath, and medicine events
// ABOUTME: Enforces baby ownership with optional type and startTime window filters
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    authenticate, json_body, non_blank, parse_datetime, parse_optional_datetime,
    require_owned_baby,
};
use crate::database::ActivityFilter;
use crate::errors::{AppError, AppResult};
use crate::models::{Activity, ActivityType};
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
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// Query parameters for listing activities
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListActivitiesQuery {
    /// Baby to list activities for (required)
    pub baby_id: Option<String>,
    /// Only this activity type
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    /// Earliest `startTime` to include
    pub start_date: Option<String>,
    /// Latest `startTime` to include
    pub end_date: Option<String>,
}

/// Request body for logging an activity
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActivityBody {
    /// Baby the activity belongs to
    pub baby_id: Option<String>,
    /// Activity type
    #[serde(rename = "type")]
    pub activity_type: Option<String>,
    /// Type-specific attributes such as `duration` or `dosage`
    pub details: Option<Map<String, Value>>,
    /// Start of the activity; defaults to now
    pub start_time: Option<String>,
    /// End of the activity, for activities with a duration
    pub end_time: Option<String>,
    /// Free-form notes
    pub notes: Option<String>,
}

/// Response for listing activities
#[derive(Debug, Serialize, Deserialize)]
pub struct ListActivitiesResponse {
    /// Matching activities, most recent first
    pub activities: Vec<Activity>,
}

/// Response for a logged activity
#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityResponse {
    /// The stored activity
    pub activity: Activity,
}

/// Activity routes implementation
pub struct ActivitiesRoutes;

impl ActivitiesRoutes {
    /// Create all activity routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/api/activities",
                get(Self::handle_list).post(Self::handle_create),
            )
            .with_state(resources)
    }

    /// Handle GET /api/activities - List a baby's activities
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListActivitiesQuery>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let baby_id =
            non_blank(query.baby_id.as_deref()).ok_or_else(|| AppError::missing_field("babyId"))?;
        let baby = require_owned_baby(&resources, baby_id, &auth.user_id).await?;

        let filter = ActivityFilter {
            activity_type: non_blank(query.activity_type.as_deref())
                .map(parse_activity_type)
                .transpose()?,
            start: parse_optional_datetime("startDate", query.start_date.as_deref())?,
            end: parse_optional_datetime("endDate", query.end_date.as_deref())?,
        };
        let activities = resources
            .database
            .activities()
            .list(baby.id, &filter)
            .await?;

        Ok((StatusCode::OK, Json(ListActivitiesResponse { activities })).into_response())
    }

    /// Handle POST /api/activities - Log an activity
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<CreateActivityBody>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let auth = authenticate(&headers, &resources)?;
        let body = json_body(body)?;

        let baby_id =
            non_blank(body.baby_id.as_deref()).ok_or_else(|| AppError::missing_field("babyId"))?;
        let activity_type = non_blank(body.activity_type.as_deref())
            .ok_or_else(|| AppError::missing_field("type"))?;
        let activity_type = parse_activity_type(activity_type)?;
        let baby = require_owned_baby(&resources, baby_id, &auth.user_id).await?;

        let start_time = match non_blank(body.start_time.as_deref()) {
            Some(value) => parse_datetime("startTime", value)?,
            None => Utc::now(),
        };
        let end_time = parse_optional_datetime("endTime", body.end_time.as_deref())?;
        if end_time.is_some_and(|end| end < start_time) {
            return Err(AppError::invalid_input("endTime must not precede startTime"));
        }

        let activity = Activity {
            id: Uuid::new_v4(),
            baby_id: baby.id,
            activity_type,
            details: flatten_details(body.details.unwrap_or_default()),
            start_time,
            end_time,
            notes: body.notes.unwrap_or_default(),
            created_at: Utc::now(),
        };

        resources.database.activities().create(&activity).await?;
        info!(
            activity_id = %activity.id,
            baby_id = %activity.baby_id,
            activity_type = activity.activity_type.as_str(),
            "Logged activity"
        );

        Ok((StatusCode::CREATED, Json(ActivityResponse { activity })).into_response())
    }
}

fn parse_activity_type(value: &str) -> AppResult<ActivityType> {
    ActivityType::parse(value).ok_or_else(|| {
        AppError::invalid_input(format!(
            "Invalid activity type '{value}': expected diaper, poop, sleep, bath, medicine, or other"
        ))
    })
}

/// Keep string values as-is and render other JSON values as text; drop nulls
fn flatten_details(details: Map<String, Value>) -> BTreeMap<String, String> {
    details
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(text) => Some((key, text)),
            other => Some((key, other.to_string())),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_flatten_details_stringifies_values() {
        let details = json!({
            "consistency": "soft",
            "duration": 45,
            "wet": true,
            "dosage": null
        })
        .as_object()
        .cloned()
        .unwrap_or_default();

        let flat = flatten_details(details);
        assert_eq!(flat.get("consistency").map(String::as_str), Some("soft"));
        assert_eq!(flat.get("duration").map(String::as_str), Some("45"));
        assert_eq!(flat.get("wet").map(String::as_str), Some("true"));
        assert!(!flat.contains_key("dosage"));
    }

    #[test]
    fn test_unknown_activity_type_is_invalid() {
        let err = parse_activity_type("nap").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert_eq!(parse_activity_type("sleep").unwrap(), ActivityType::Sleep);
    }
}
