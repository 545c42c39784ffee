// ABOUTME: Workout entry storage operations
// ABOUTME: Entries persist with their computed score and PR flag
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use fitmarket_core::errors::DatabaseError;
use fitmarket_core::models::WorkoutEntry;

use super::{query_error, Database};

const ENTRY_COLUMNS: &str =
    "id, user_id, exercise_id, weight, reps, sets, notes, performed_on, score, is_pr, created_at";

fn map_entry(row: &SqliteRow) -> Result<WorkoutEntry, sqlx::Error> {
    Ok(WorkoutEntry {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        exercise_id: row.try_get("exercise_id")?,
        weight: row.try_get("weight")?,
        reps: row.try_get("reps")?,
        sets: row.try_get("sets")?,
        notes: row.try_get("notes")?,
        performed_on: row.try_get("performed_on")?,
        score: row.try_get("score")?,
        is_pr: row.try_get("is_pr")?,
        created_at: row.try_get("created_at")?,
    })
}

/// Insertion payload for a workout entry.
#[derive(Debug, Clone)]
pub struct NewWorkoutEntry {
    /// Owner of the entry
    pub user_id: i64,
    /// Exercise the entry is logged against
    pub exercise_id: i64,
    /// Weight lifted
    pub weight: f64,
    /// Repetitions per set
    pub reps: i32,
    /// Number of sets
    pub sets: i32,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the workout took place
    pub performed_on: DateTime<Utc>,
    /// Computed performance score
    pub score: f64,
    /// PR verdict at log time
    pub is_pr: bool,
}

impl Database {
    /// Create the workout entry table and its lookup index
    pub(super) async fn migrate_entries(&self) -> Result<(), DatabaseError> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS workout_entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                exercise_id INTEGER NOT NULL REFERENCES exercises(id),
                weight REAL NOT NULL,
                reps INTEGER NOT NULL,
                sets INTEGER NOT NULL,
                notes TEXT,
                performed_on DATETIME NOT NULL,
                score REAL NOT NULL DEFAULT 0,
                is_pr BOOLEAN NOT NULL DEFAULT 0,
                created_at DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            ",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("create workout_entries table", &e))?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_workout_entries_user_exercise
             ON workout_entries(user_id, exercise_id)",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| query_error("create workout_entries index", &e))?;

        Ok(())
    }

    /// Persist a workout entry and return the stored row.
    pub async fn create_entry(
        &self,
        entry: &NewWorkoutEntry,
    ) -> Result<WorkoutEntry, DatabaseError> {
        let row = sqlx::query(&format!(
            r"
            INSERT INTO workout_entries
                (user_id, exercise_id, weight, reps, sets, notes, performed_on, score, is_pr)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {ENTRY_COLUMNS}
            "
        ))
        .bind(entry.user_id)
        .bind(entry.exercise_id)
        .bind(entry.weight)
        .bind(entry.reps)
        .bind(entry.sets)
        .bind(entry.notes.as_deref())
        .bind(entry.performed_on)
        .bind(entry.score)
        .bind(entry.is_pr)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| query_error("insert workout entry", &e))?;

        map_entry(&row).map_err(|e| query_error("decode workout entry", &e))
    }

    /// Fetch an entry by id, scoped to its owner.
    pub async fn get_entry(
        &self,
        user_id: i64,
        entry_id: i64,
    ) -> Result<Option<WorkoutEntry>, DatabaseError> {
        let row = sqlx::query(&format!(
            "SELECT {ENTRY_COLUMNS} FROM workout_entries WHERE id = $1 AND user_id = $2"
        ))
        .bind(entry_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| query_error("fetch workout entry", &e))?;

        row.as_ref()
            .map(map_entry)
            .transpose()
            .map_err(|e| query_error("decode workout entry", &e))
    }

    /// All entries for an exercise, newest workout first.
    pub async fn entries_for_exercise(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Vec<WorkoutEntry>, DatabaseError> {
        let rows = sqlx::query(&format!(
            r"
            SELECT {ENTRY_COLUMNS} FROM workout_entries
            WHERE user_id = $1 AND exercise_id = $2
            ORDER BY performed_on DESC, id DESC
            "
        ))
        .bind(user_id)
        .bind(exercise_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| query_error("list workout entries", &e))?;

        rows.iter()
            .map(map_entry)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| query_error("decode workout entry", &e))
    }

    /// Downgrade an entry's PR flag after its detection was superseded by a
    /// concurrent commit. Only the flag moves, and only from true to false;
    /// the score and raw inputs stay as logged.
    pub(crate) async fn clear_entry_pr_flag(&self, entry_id: i64) -> Result<(), DatabaseError> {
        sqlx::query("UPDATE workout_entries SET is_pr = 0 WHERE id = $1")
            .bind(entry_id)
            .execute(&self.pool)
            .await
            .map_err(|e| query_error("clear entry PR flag", &e))?;

        Ok(())
    }
}
