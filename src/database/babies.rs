// ABOUTME: Database operations for baby profiles
// ABOUTME: Create, list, and ownership-checked lookup of babies by parent
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{format_timestamp, parse_timestamp, parse_uuid};
use crate::errors::{AppError, AppResult};
use crate::models::{Baby, Gender};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

/// Baby profile database operations
pub struct BabiesManager {
    pool: SqlitePool,
}

impl BabiesManager {
    /// Create a new babies manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a baby profile
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn create(&self, baby: &Baby) -> AppResult<()> {
        sqlx::query(
            r"
            INSERT INTO babies (id, parent_id, name, birth_date, gender, weight, height, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(baby.id.to_string())
        .bind(&baby.parent_id)
        .bind(&baby.name)
        .bind(format_timestamp(&baby.birth_date))
        .bind(baby.gender.as_str())
        .bind(baby.weight)
        .bind(baby.height)
        .bind(format_timestamp(&baby.created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create baby: {e}")))?;

        Ok(())
    }

    /// List a parent's babies, newest first
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn list_for_parent(&self, parent_id: &str) -> AppResult<Vec<Baby>> {
        let rows = sqlx::query(
            r"
            SELECT id, parent_id, name, birth_date, gender, weight, height, created_at
            FROM babies
            WHERE parent_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list babies: {e}")))?;

        rows.iter().map(row_to_baby).collect()
    }

    /// Get a baby only if it belongs to `parent_id`
    ///
    /// Another parent's baby is indistinguishable from a missing one.
    ///
    /// # Errors
    ///
    /// Returns an error if database operation fails
    pub async fn get_for_parent(&self, baby_id: Uuid, parent_id: &str) -> AppResult<Option<Baby>> {
        let row = sqlx::query(
            r"
            SELECT id, parent_id, name, birth_date, gender, weight, height, created_at
            FROM babies
            WHERE id = $1 AND parent_id = $2
            ",
        )
        .bind(baby_id.to_string())
        .bind(parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get baby: {e}")))?;

        row.as_ref().map(row_to_baby).transpose()
    }
}

fn row_to_baby(row: &SqliteRow) -> AppResult<Baby> {
    let id_str: String = row.get("id");
    let birth_date_str: String = row.get("birth_date");
    let gender_str: String = row.get("gender");
    let created_at_str: String = row.get("created_at");

    Ok(Baby {
        id: parse_uuid(&id_str)?,
        parent_id: row.get("parent_id"),
        name: row.get("name"),
        birth_date: parse_timestamp(&birth_date_str)?,
        gender: Gender::parse(&gender_str)
            .ok_or_else(|| AppError::internal(format!("Invalid stored gender: {gender_str}")))?,
        weight: row.get("weight"),
        height: row.get("height"),
        created_at: parse_timestamp(&created_at_str)?,
    })
}
