// ABOUTME: Database operations for food intake records
// ABOUTME: Insert and date-filtered listing of feedings for one baby
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{format_timestamp, parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{FoodIntake, FoodType, IntakeUnit, NutritionalInfo};
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};
use uuid::Uuid;

/// Inclusive time window on `consumed_at`
#[derive(Debug, Clone, Copy, Default)]
pub struct FoodIntakeFilter {
    /// Earliest `consumed_at` to include
    pub start: Option<DateTime<Utc>>,
    /// Latest `consumed_at` to include
    pub end: Option<DateTime<Utc>>,
}

/// Food intake database operations
pub struct FoodIntakeManager {
    pool: SqlitePool,
}

impl FoodIntakeManager {
    /// Create a new food intake manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a food intake record
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the database operation fails
    pub async fn create(&self, intake: &FoodIntake) -> AppResult<()> {
        let nutrition_json = serde_json::to_string(&intake.nutritional_info)?;

        sqlx::query(
            r"
            INSERT INTO food_intakes (
                id, baby_id, food_name, food_type, amount, unit,
                consumed_at, nutritional_info, notes, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ",
        )
        .bind(intake.id.to_string())
        .bind(intake.baby_id.to_string())
        .bind(&intake.food_name)
        .bind(intake.food_type.as_str())
        .bind(intake.amount)
        .bind(intake.unit.as_str())
        .bind(format_timestamp(&intake.consumed_at))
        .bind(nutrition_json)
        .bind(&intake.notes)
        .bind(format_timestamp(&intake.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create food intake: {e}")))?;

        Ok(())
    }

    /// List a baby's food intakes, most recently consumed first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list(&self, baby_id: Uuid, filter: &FoodIntakeFilter) -> AppResult<Vec<FoodIntake>> {
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT id, baby_id, food_name, food_type, amount, unit, consumed_at, \
             nutritional_info, notes, created_at FROM food_intakes WHERE baby_id = ",
        );
        query.push_bind(baby_id.to_string());
        if let Some(start) = filter.start {
            query.push(" AND consumed_at >= ").push_bind(format_timestamp(&start));
        }
        if let Some(end) = filter.end {
            query.push(" AND consumed_at <= ").push_bind(format_timestamp(&end));
        }
        query.push(" ORDER BY consumed_at DESC");

        let rows = query
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list food intakes: {e}")))?;

        rows.iter().map(row_to_food_intake).collect()
    }
}

fn row_to_food_intake(row: &SqliteRow) -> AppResult<FoodIntake> {
    let id_str: String = row.get("id");
    let baby_id_str: String = row.get("baby_id");
    let food_type_str: String = row.get("food_type");
    let unit_str: String = row.get("unit");
    let consumed_at_str: String = row.get("consumed_at");
    let nutrition_json: String = row.get("nutritional_info");
    let created_at_str: String = row.get("created_at");

    let nutritional_info: NutritionalInfo = serde_json::from_str(&nutrition_json)?;

    Ok(FoodIntake {
        id: parse_uuid(&id_str)?,
        baby_id: parse_uuid(&baby_id_str)?,
        food_name: row.get("food_name"),
        food_type: FoodType::parse(&food_type_str).ok_or_else(|| {
            AppError::internal(format!("Invalid stored food type: {food_type_str}"))
        })?,
        amount: row.get("amount"),
        unit: IntakeUnit::parse(&unit_str)
            .ok_or_else(|| AppError::internal(format!("Invalid stored unit: {unit_str}")))?,
        consumed_at: parse_timestamp(&consumed_at_str)?,
        nutritional_info,
        notes: row.get("notes"),
        created_at: parse_timestamp(&created_at_str)?,
    })
}
