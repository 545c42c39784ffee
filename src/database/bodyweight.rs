// ABOUTME: Bodyweight sample storage operations
// ABOUTME: Records samples and serves the most recent one per user
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use fitmarket_core::errors::DatabaseError;
use fitmarket_core::models::{BodyweightSample, WeightUnit};

use super::{query_error, BodyweightReader, Database};

fn map_sample(row: &SqliteRow) -> Result<BodyweightSample, sqlx::Error> {
    let unit: String = row.try_get("unit")?;
    Ok(BodyweightSample {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        weight: row.try_get("weight")?,
        unit: WeightUnit::parse(&unit),
        recorded_at: row.try_get("recorded_at")?,
    })
}

impl Database {
    /// Create the bodyweight sample table and its lookup index
    pub(super) async fn migrate_bodyweight(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS bodyweight_samples (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                weight REAL NOT NULL,
                unit TEXT NOT NULL DEFAULT 'kg' CHECK (unit IN ('kg', 'lb', 'lbs')),
                recorded_at DATETIME NOT NULL,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("create bodyweight_samples table", &e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_bodyweight_samples_user_recorded
             ON bodyweight_samples(user_id, recorded_at)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("create bodyweight_samples index", &e))?;

        Ok(())
    }

    /// Record a bodyweight measurement for a user.
    pub async fn record_bodyweight_sample(
        &self,
        user_id: i64,
        weight: f64,
        unit: WeightUnit,
        recorded_at: DateTime<Utc>,
    ) -> Result<BodyweightSample, DatabaseError> {
        let row = sqlx::query(
            r"
            INSERT INTO bodyweight_samples (user_id, weight, unit, recorded_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, weight, unit, recorded_at
            ",
        )
        .bind(user_id)
        .bind(weight)
        .bind(unit.as_str())
        .bind(recorded_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_error("insert bodyweight sample", &e))?;

        map_sample(&row).map_err(|e| query_error("decode bodyweight sample", &e))
    }
}

#[async_trait]
impl BodyweightReader for Database {
    async fn latest_bodyweight(
        &self,
        user_id: i64,
    ) -> Result<Option<BodyweightSample>, DatabaseError> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, weight, unit, recorded_at
            FROM bodyweight_samples
            WHERE user_id = $1
            ORDER BY recorded_at DESC, id DESC
            LIMIT 1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("fetch latest bodyweight", &e))?;

        row.as_ref()
            .map(map_sample)
            .transpose()
            .map_err(|e| query_error("decode bodyweight sample", &e))
    }
}
