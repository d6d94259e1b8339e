// ABOUTME: SQLite database connection, schema migrations, and shared row helpers
// ABOUTME: Entry point for the babies, food intake, and activities managers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! Flat tables, one per record kind, created on startup with
//! `CREATE TABLE IF NOT EXISTS`. Timestamps are stored as fixed-width RFC 3339
//! UTC strings so that string comparison and `ORDER BY` follow time order.

mod activities;
mod babies;
mod food_intake;

pub use activities::{ActivitiesManager, ActivityFilter};
pub use babies::BabiesManager;
pub use food_intake::{FoodIntakeFilter, FoodIntakeManager};

use crate::errors::{AppError, AppResult};
use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};
use std::fs;
use std::path::Path;
use tracing::info;
use uuid::Uuid;

/// Database handle shared by all managers
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations
    ///
    /// `sqlite::memory:` is supported and backed by a single connection so all
    /// queries see the same in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrated
    pub async fn new(database_url: &str) -> Result<Self> {
        let is_memory = database_url.contains(":memory:");

        let connection_options = if is_memory || database_url.contains('?') {
            database_url.to_owned()
        } else {
            ensure_parent_dir(database_url)?;
            // Ensure SQLite creates the database file if it doesn't exist
            format!("{database_url}?mode=rwc")
        };

        let pool_options = if is_memory {
            // The in-memory database lives exactly as long as its connection
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let pool = pool_options
            .connect(&connection_options)
            .await
            .with_context(|| format!("Failed to open database {database_url}"))?;

        let db = Self { pool };
        db.migrate().await?;
        info!("Database ready");

        Ok(db)
    }

    /// Baby profile operations
    #[must_use]
    pub fn babies(&self) -> BabiesManager {
        BabiesManager::new(self.pool.clone())
    }

    /// Food intake operations
    #[must_use]
    pub fn food_intake(&self) -> FoodIntakeManager {
        FoodIntakeManager::new(self.pool.clone())
    }

    /// Activity operations
    #[must_use]
    pub fn activities(&self) -> ActivitiesManager {
        ActivitiesManager::new(self.pool.clone())
    }

    /// Check the connection with a trivial query
    ///
    /// # Errors
    ///
    /// Returns an error if the database does not answer
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Database ping failed: {e}")))?;
        Ok(())
    }

    /// Run database migrations
    ///
    /// # Errors
    ///
    /// Returns an error if any table or index cannot be created
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS babies (
                id TEXT PRIMARY KEY,
                parent_id TEXT NOT NULL,
                name TEXT NOT NULL,
                birth_date TEXT NOT NULL,
                gender TEXT NOT NULL CHECK (gender IN ('male', 'female', 'other')),
                weight REAL,
                height REAL,
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create babies table")?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS food_intakes (
                id TEXT PRIMARY KEY,
                baby_id TEXT NOT NULL REFERENCES babies(id) ON DELETE CASCADE,
                food_name TEXT NOT NULL,
                food_type TEXT NOT NULL,
                amount REAL NOT NULL,
                unit TEXT NOT NULL,
                consumed_at TEXT NOT NULL,
                nutritional_info TEXT NOT NULL DEFAULT '{}',
                notes TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create food_intakes table")?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS activities (
                id TEXT PRIMARY KEY,
                baby_id TEXT NOT NULL REFERENCES babies(id) ON DELETE CASCADE,
                activity_type TEXT NOT NULL,
                details TEXT NOT NULL DEFAULT '{}',
                start_time TEXT NOT NULL,
                end_time TEXT,
                notes TEXT NOT NULL DEFAULT '',
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await
        .context("Failed to create activities table")?;

        for index in [
            "CREATE INDEX IF NOT EXISTS idx_babies_parent ON babies(parent_id)",
            "CREATE INDEX IF NOT EXISTS idx_food_intakes_baby ON food_intakes(baby_id, consumed_at)",
            "CREATE INDEX IF NOT EXISTS idx_activities_baby ON activities(baby_id, start_time)",
        ] {
            sqlx::query(index)
                .execute(&self.pool)
                .await
                .with_context(|| format!("Failed to create index: {index}"))?;
        }

        Ok(())
    }
}

/// Create the directory holding a file-backed SQLite database
fn ensure_parent_dir(database_url: &str) -> Result<()> {
    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Fixed-width UTC timestamp used for every stored time column
pub(crate) fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::internal(format!("Invalid stored timestamp '{value}': {e}")))
}

pub(crate) fn parse_uuid(value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|e| AppError::internal(format!("Invalid UUID: {e}")))
}
