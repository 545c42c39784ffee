// ABOUTME: Database handle, migrations, and the store seams the engine consumes
// ABOUTME: An explicit SqlitePool wrapper passed into components at construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

//! # Database Management
//!
//! SQLite-backed storage for workout entries, exercises, bodyweight samples,
//! and the PR history ledger. The [`Database`] handle is an explicit value
//! created at startup and passed into each component; nothing in this crate
//! reaches for ambient global state.
//!
//! The engine consumes storage through two narrow seams, [`BodyweightReader`]
//! and [`PrLedger`], both implemented by [`Database`] and replaceable by
//! fakes in tests.

mod bodyweight;
mod entries;
mod exercises;
mod ledger;

pub use entries::NewWorkoutEntry;

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite, SqlitePool};
use tracing::info;

use fitmarket_core::errors::DatabaseError;
use fitmarket_core::models::{BodyweightSample, NewPrRecord, PrRecord};

/// Read access to a user's most recent bodyweight sample.
#[async_trait]
pub trait BodyweightReader: Send + Sync {
    /// Most recent sample for the user, by `recorded_at` descending, if any
    /// was ever recorded.
    async fn latest_bodyweight(
        &self,
        user_id: i64,
    ) -> Result<Option<BodyweightSample>, DatabaseError>;
}

/// The append-only personal-record history store, keyed by (user, exercise).
#[async_trait]
pub trait PrLedger: Send + Sync {
    /// The record with the maximum score for the pair, ties resolved to the
    /// earliest-achieved record.
    async fn best_pr_for(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Option<PrRecord>, DatabaseError>;

    /// Guarded append: inserts only if the candidate's score is strictly
    /// greater than every existing score for the pair. A losing append fails
    /// with [`DatabaseError::RecordSuperseded`].
    async fn append_pr_record(&self, record: &NewPrRecord) -> Result<PrRecord, DatabaseError>;

    /// All records for the pair, newest first.
    async fn pr_history_for(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Vec<PrRecord>, DatabaseError>;

    /// The single best record for every exercise the user has PR'd on.
    async fn best_per_exercise(
        &self,
        user_id: i64,
    ) -> Result<HashMap<i64, PrRecord>, DatabaseError>;
}

/// Database manager for workout, exercise, bodyweight, and PR storage
#[derive(Clone)]
pub struct Database {
    pool: Pool<Sqlite>,
}

impl Database {
    /// Create a new database connection and run migrations.
    pub async fn new(database_url: &str) -> Result<Self, DatabaseError> {
        let is_memory = database_url.contains(":memory:");

        // Ensure SQLite creates the database file if it doesn't exist
        let connection_options = if database_url.starts_with("sqlite:") && !is_memory {
            format!("{database_url}?mode=rwc")
        } else {
            database_url.to_owned()
        };

        let pool = if is_memory {
            // A pooled in-memory database opens a fresh database per
            // connection; pin the pool to one long-lived connection so all
            // queries see the same state.
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect(&connection_options)
                .await
        } else {
            SqlitePool::connect(&connection_options).await
        }
        .map_err(|e| DatabaseError::ConnectionError {
            context: format!("failed to open {database_url}: {e}"),
        })?;

        let db = Self { pool };
        db.migrate().await?;

        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<(), DatabaseError> {
        self.migrate_exercises().await?;
        self.migrate_entries().await?;
        self.migrate_bodyweight().await?;
        self.migrate_ledger().await?;

        info!("database migrations complete");
        Ok(())
    }
}

pub(crate) fn query_error(operation: &str, err: &sqlx::Error) -> DatabaseError {
    DatabaseError::QueryError {
        context: format!("{operation}: {err}"),
    }
}
