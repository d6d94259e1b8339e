// ABOUTME: Database operations for care activities (diaper, sleep, bath, medicine)
// ABOUTME: Insert and type/date-filtered listing of activities for one baby
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{format_timestamp, parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{Activity, ActivityType};
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Optional type and inclusive `start_time` window filters
#[derive(Debug, Clone, Copy, Default)]
pub struct ActivityFilter {
    /// Only this activity type
    pub activity_type: Option<ActivityType>,
    /// Earliest `start_time` to include
    pub start: Option<DateTime<Utc>>,
    /// Latest `start_time` to include
    pub end: Option<DateTime<Utc>>,
}

/// Activity database operations
pub struct ActivitiesManager {
    pool: SqlitePool,
}

impl ActivitiesManager {
    /// Create a new activities manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert an activity
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database operation fails
    pub async fn create(&self, activity: &Activity) -> AppResult<()> {
        let details_json = serde_json::to_string(&activity.details)?;

        sqlx::query(
            r"
            INSERT INTO activities (
                id, baby_id, activity_type, details, start_time, end_time, notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(activity.id.to_string())
        .bind(activity.baby_id.to_string())
        .bind(activity.activity_type.as_str())
        .bind(details_json)
        .bind(format_timestamp(&activity.start_time))
        .bind(activity.end_time.as_ref().map(format_timestamp))
        .bind(&activity.notes)
        .bind(format_timestamp(&activity.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create activity: {e}")))?;

        Ok(())
    }

    /// List a baby's activities, most recently started first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list(&self, baby_id: Uuid, filter: &ActivityFilter) -> AppResult<Vec<Activity>> {
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT id, baby_id, activity_type, details, start_time, end_time, notes, created_at \
             FROM activities WHERE baby_id = ",
        );
        query.push_bind(baby_id.to_string());
        if let Some(activity_type) = filter.activity_type {
            query.push(" AND activity_type = ").push_bind(activity_type.as_str());
        }
        if let Some(start) = filter.start {
            query.push(" AND start_time >= ").push_bind(format_timestamp(&start));
        }
        if let Some(end) = filter.end {
            query.push(" AND start_time <= ").push_bind(format_timestamp(&end));
        }
        query.push(" ORDER BY start_time DESC");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list activities: {e}")))?;

        rows.iter().map(row_to_activity).collect()
    }
}

fn row_to_activity(row: &SqliteRow) -> AppResult<Activity> {
    let id_str: String = row.get("id");
    let baby_id_str: String = row.get("baby_id");
    let type_str: String = row.get("activity_type");
    let details_json: String = row.get("details");
    let start_time_str: String = row.get("start_time");
    let end_time_str: Option<String> = row.get("end_time");
    let created_at_str: String = row.get("created_at");

    let details: BTreeMap<String, String> = serde_json::from_str(&details_json)?;

    Ok(Activity {
        id: parse_uuid(&id_str)?,
        baby_id: parse_uuid(&baby_id_str)?,
        activity_type: ActivityType::parse(&type_str)
            .ok_or_else(|| AppError::internal(format!("Invalid stored activity type: {type_str}")))?,
        details,
        start_time: parse_timestamp(&start_time_str)?,
        end_time: end_time_str.as_deref().map(parse_timestamp).transpose()?,
        notes: row.get("notes"),
        created_at: parse_timestamp(&created_at_str)?,
    })
}
