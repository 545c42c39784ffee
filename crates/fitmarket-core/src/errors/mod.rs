// ABOUTME: Error taxonomy shared by the storage layer and the PR engine
// ABOUTME: Distinguishes transient store failures from append conflicts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

//! Error types for storage and engine operations.
//!
//! The taxonomy follows three rules: a transient store failure is never
//! silently mapped to "no history", a losing concurrent append fails with a
//! dedicated conflict variant so the caller can re-run the full
//! detect-then-commit sequence, and non-positive workout inputs are not
//! errors at all (they degrade to a zero score upstream).

use thiserror::Error;

/// Errors surfaced by the relational store.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A query could not be completed (transient store failure)
    #[error("query failed: {context}")]
    QueryError {
        /// Description of the failed operation
        context: String,
    },

    /// The connection or pool could not be established
    #[error("connection failed: {context}")]
    ConnectionError {
        /// Description of the connection failure
        context: String,
    },

    /// Conditional append lost: a record with an equal or higher score
    /// already exists for the (user, exercise) key
    #[error(
        "record append superseded for user {user_id} exercise {exercise_id}: \
         a record with score >= {score} already exists"
    )]
    RecordSuperseded {
        /// Owner of the ledger key
        user_id: i64,
        /// Exercise the append targeted
        exercise_id: i64,
        /// Score of the rejected candidate
        score: f64,
    },

    /// Ticker symbol already registered for this user
    #[error("ticker '{ticker}' already exists for user {user_id}")]
    DuplicateTicker {
        /// Owner of the exercise registry
        user_id: i64,
        /// The conflicting ticker symbol
        ticker: String,
    },
}

impl DatabaseError {
    /// True when the error is the append-conflict variant, which callers
    /// recover from by re-running detection rather than retrying the append.
    #[must_use]
    pub const fn is_superseded(&self) -> bool {
        matches!(self, Self::RecordSuperseded { .. })
    }
}

/// Errors surfaced by the engine and the workout service.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The referenced exercise does not exist for this user
    #[error("exercise {exercise_id} not found for user {user_id}")]
    ExerciseNotFound {
        /// Authenticated user id
        user_id: i64,
        /// Exercise id from the request
        exercise_id: i64,
    },

    /// Every commit attempt lost to a concurrent writer
    #[error(
        "record commit for user {user_id} exercise {exercise_id} \
         lost to concurrent writers after {attempts} attempts"
    )]
    CommitContention {
        /// Authenticated user id
        user_id: i64,
        /// Exercise the commits targeted
        exercise_id: i64,
        /// Number of full detect-then-commit attempts made
        attempts: u32,
    },

    /// Underlying store failure
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superseded_is_distinguishable_from_query_failure() {
        let conflict = DatabaseError::RecordSuperseded {
            user_id: 1,
            exercise_id: 2,
            score: 1500.0,
        };
        let transient = DatabaseError::QueryError {
            context: "connection reset".into(),
        };

        assert!(conflict.is_superseded());
        assert!(!transient.is_superseded());
    }

    #[test]
    fn database_error_converts_into_engine_error() {
        let err: EngineError = DatabaseError::QueryError {
            context: "disk I/O error".into(),
        }
        .into();

        assert!(matches!(err, EngineError::Database(_)));
    }
}
