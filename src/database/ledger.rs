// ABOUTME: Append-only PR history ledger keyed by (user, exercise)
// ABOUTME: Guarded append keeps per-key scores strictly increasing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row;
use tracing::debug;

use fitmarket_core::errors::DatabaseError;
use fitmarket_core::models::{NewPrRecord, PrRecord};

use super::{query_error, Database, PrLedger};

const RECORD_COLUMNS: &str = "id, user_id, exercise_id, workout_entry_id, score, \
                              weight, reps, sets, achieved_at, created_at";

fn map_record(row: &SqliteRow) -> Result<PrRecord, sqlx::Error> {
    Ok(PrRecord {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        exercise_id: row.try_get("exercise_id")?,
        workout_entry_id: row.try_get("workout_entry_id")?,
        score: row.try_get("score")?,
        weight: row.try_get("weight")?,
        reps: row.try_get("reps")?,
        sets: row.try_get("sets")?,
        achieved_at: row.try_get("achieved_at")?,
        created_at: row.try_get("created_at")?,
    })
}

impl Database {
    /// Create the PR record table and its lookup index
    pub(super) async fn migrate_ledger(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS pr_records (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                exercise_id INTEGER NOT NULL REFERENCES exercises(id),
                workout_entry_id INTEGER NOT NULL REFERENCES workout_entries(id),
                score REAL NOT NULL,
                weight REAL NOT NULL,
                reps INTEGER NOT NULL,
                sets INTEGER NOT NULL,
                achieved_at DATETIME NOT NULL,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("create pr_records table", &e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_pr_records_user_exercise
             ON pr_records(user_id, exercise_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("create pr_records index", &e))?;

        Ok(())
    }
}

#[async_trait]
impl PrLedger for Database {
    async fn best_pr_for(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Option<PrRecord>, DatabaseError> {
        let row = sqlx::query(&format!(
            r"
            SELECT {RECORD_COLUMNS} FROM pr_records
            WHERE user_id = $1 AND exercise_id = $2
            ORDER BY score DESC, achieved_at ASC, id ASC
            LIMIT 1
            "
        ))
        .bind(user_id)
        .bind(exercise_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("fetch best PR", &e))?;

        row.as_ref()
            .map(map_record)
            .transpose()
            .map_err(|e| query_error("decode PR record", &e))
    }

    async fn append_pr_record(&self, record: &NewPrRecord) -> Result<PrRecord, DatabaseError> {
        // The insert and the max-score check execute as one statement, so two
        // concurrent appends for the same key cannot both pass the guard: the
        // losing writer's insert matches zero rows and fails cleanly.
        let result = sqlx::query(
            r"
            INSERT INTO pr_records
                (user_id, exercise_id, workout_entry_id, score, weight, reps, sets, achieved_at)
            SELECT $1, $2, $3, $4, $5, $6, $7, $8
            WHERE NOT EXISTS (
                SELECT 1 FROM pr_records
                WHERE user_id = $1 AND exercise_id = $2 AND score >= $4
            )
            ",
        )
        .bind(record.user_id)
        .bind(record.exercise_id)
        .bind(record.workout_entry_id)
        .bind(record.score)
        .bind(record.weight)
        .bind(record.reps)
        .bind(record.sets)
        .bind(record.achieved_at)
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("append PR record", &e))?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::RecordSuperseded {
                user_id: record.user_id,
                exercise_id: record.exercise_id,
                score: record.score,
            });
        }

        let id = result.last_insert_rowid();
        debug!(
            user_id = record.user_id,
            exercise_id = record.exercise_id,
            record_id = id,
            score = record.score,
            "PR record appended"
        );

        let row = sqlx::query(&format!(
            "SELECT {RECORD_COLUMNS} FROM pr_records WHERE id = $1"
        ))
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_error("fetch appended PR record", &e))?;

        map_record(&row).map_err(|e| query_error("decode PR record", &e))
    }

    async fn pr_history_for(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Vec<PrRecord>, DatabaseError> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {RECORD_COLUMNS} FROM pr_records
            WHERE user_id = $1 AND exercise_id = $2
            ORDER BY achieved_at DESC, id DESC
            "
        ))
        .bind(user_id)
        .bind(exercise_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_error("fetch PR history", &e))?;

        rows.iter()
            .map(map_record)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| query_error("decode PR record", &e))
    }

    async fn best_per_exercise(
        &self,
        user_id: i64,
    ) -> Result<HashMap<i64, PrRecord>, DatabaseError> {
        // Scan best-first; the first record seen per exercise is its best
        // (max score, ties to earliest achieved-at).
        let rows = sqlx::query(&format!(
            r"
            SELECT {RECORD_COLUMNS} FROM pr_records
            WHERE user_id = $1
            ORDER BY score DESC, achieved_at ASC, id ASC
            "
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_error("fetch best records per exercise", &e))?;

        let mut best: HashMap<i64, PrRecord> = HashMap::new();
        for row in &rows {
            let record = map_record(row).map_err(|e| query_error("decode PR record", &e))?;
            best.entry(record.exercise_id).or_insert(record);
        }

        Ok(best)
    }
}
