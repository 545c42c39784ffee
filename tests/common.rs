// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides database, exercise, and seed-record helpers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket
#![allow(
    dead_code,
    missing_docs,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_errors_doc,
    clippy::must_use_candidate
)]

//! Shared test setup for the fitmarket integration tests.

use std::sync::Once;

use anyhow::Result;
use chrono::{DateTime, Utc};
use fitmarket::database::{Database, NewWorkoutEntry, PrLedger};
use fitmarket::models::{Exercise, NewPrRecord, PrRecord, WorkoutEntry};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Result<Database> {
    init_test_logging();
    let database = Database::new("sqlite::memory:").await?;
    Ok(database)
}

/// Register a test exercise for the user
pub async fn create_test_exercise(
    database: &Database,
    user_id: i64,
    ticker: &str,
) -> Result<Exercise> {
    let exercise = database
        .create_exercise(user_id, ticker, "Barbell Bench Press", None, "push")
        .await?;
    Ok(exercise)
}

/// Persist a bare workout entry so ledger records have a valid referent
pub async fn create_test_entry(
    database: &Database,
    user_id: i64,
    exercise_id: i64,
    weight: f64,
    reps: i32,
    sets: i32,
    score: f64,
    performed_on: DateTime<Utc>,
) -> Result<WorkoutEntry> {
    let entry = database
        .create_entry(&NewWorkoutEntry {
            user_id,
            exercise_id,
            weight,
            reps,
            sets,
            notes: None,
            performed_on,
            score,
            is_pr: false,
        })
        .await?;
    Ok(entry)
}

/// Append a PR record for an already-persisted entry
pub async fn append_test_record(
    database: &Database,
    entry: &WorkoutEntry,
    score: f64,
    achieved_at: DateTime<Utc>,
) -> Result<PrRecord> {
    let record = database
        .append_pr_record(&NewPrRecord {
            user_id: entry.user_id,
            exercise_id: entry.exercise_id,
            workout_entry_id: entry.id,
            score,
            weight: entry.weight,
            reps: entry.reps,
            sets: entry.sets,
            achieved_at,
        })
        .await?;
    Ok(record)
}
