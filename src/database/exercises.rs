// ABOUTME: Exercise registry storage operations
// ABOUTME: Per-user ticker uniqueness enforced by a unique index
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use fitmarket_core::errors::DatabaseError;
use fitmarket_core::models::Exercise;

use super::{query_error, Database};

fn map_exercise(row: &SqliteRow) -> Result<Exercise, sqlx::Error> {
    Ok(Exercise {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        ticker: row.try_get("ticker")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        category: row.try_get("category")?,
        created_at: row.try_get("created_at")?,
    })
}

impl Database {
    /// Create the exercises table and the per-user ticker uniqueness index
    pub(super) async fn migrate_exercises(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                ticker TEXT NOT NULL,
                name TEXT NOT NULL,
                description TEXT,
                category TEXT NOT NULL,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("create exercises table", &e))?;

        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_exercises_user_ticker
             ON exercises(user_id, ticker)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("create exercises ticker index", &e))?;

        Ok(())
    }

    /// Register an exercise for a user. Tickers are unique per user; a
    /// duplicate fails with [`DatabaseError::DuplicateTicker`].
    pub async fn create_exercise(
        &self,
        user_id: i64,
        ticker: &str,
        name: &str,
        description: Option<&str>,
        category: &str,
    ) -> Result<Exercise, DatabaseError> {
        let row = sqlx::query(
            r"
            INSERT INTO exercises (user_id, ticker, name, description, category)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, ticker, name, description, category, created_at
            ",
        )
        .bind(user_id)
        .bind(ticker)
        .bind(name)
        .bind(description)
        .bind(category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
            {
                DatabaseError::DuplicateTicker {
                    user_id,
                    ticker: ticker.to_owned(),
                }
            } else {
                query_error("insert exercise", &e)
            }
        })?;

        map_exercise(&row).map_err(|e| query_error("decode exercise", &e))
    }

    /// Whether the exercise exists and belongs to the user.
    pub async fn exercise_exists(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<bool, DatabaseError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM exercises WHERE id = $1 AND user_id = $2",
        )
        .bind(exercise_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_error("check exercise existence", &e))?;

        Ok(count > 0)
    }

    /// Fetch an exercise by id, scoped to its owner.
    pub async fn get_exercise(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Option<Exercise>, DatabaseError> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, ticker, name, description, category, created_at
            FROM exercises
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(exercise_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("fetch exercise", &e))?;

        row.as_ref()
            .map(map_exercise)
            .transpose()
            .map_err(|e| query_error("decode exercise", &e))
    }
}
