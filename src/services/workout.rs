// ABOUTME: Workout service - entry logging orchestration and history queries
// ABOUTME: Owns the retry policy for commit conflicts; the engine retries nothing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use fitmarket_core::errors::{DatabaseError, EngineError};
use fitmarket_core::models::{PrDetection, PrRecord, WorkoutEntry};

use crate::database::{Database, NewWorkoutEntry, PrLedger};
use crate::pr::PrEngine;
use crate::scoring::BodyweightNormalizer;

/// Full detect-then-commit re-runs before giving up on a contended key.
/// A genuine conflict resolves on the first re-run (the re-read best now
/// covers the winner); further attempts only matter if the normalization
/// factor moved between runs.
const MAX_COMMIT_ATTEMPTS: u32 = 3;

/// A request to log one workout entry.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Exercise the entry is logged against; must belong to the user
    pub exercise_id: i64,
    /// Weight lifted
    pub weight: f64,
    /// Repetitions per set
    pub reps: i32,
    /// Number of sets
    pub sets: i32,
    /// Free-form notes
    pub notes: Option<String>,
    /// When the workout took place; defaults to now
    pub performed_on: Option<DateTime<Utc>>,
}

impl LogEntry {
    /// A plain entry for the given exercise and inputs.
    #[must_use]
    pub const fn new(exercise_id: i64, weight: f64, reps: i32, sets: i32) -> Self {
        Self {
            exercise_id,
            weight,
            reps,
            sets,
            notes: None,
            performed_on: None,
        }
    }

    /// Attach free-form notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Set an explicit workout date instead of "now".
    #[must_use]
    pub const fn performed_on(mut self, date: DateTime<Utc>) -> Self {
        self.performed_on = Some(date);
        self
    }
}

/// What came out of logging an entry: the stored row and the final verdict.
#[derive(Debug, Clone)]
pub struct EntryOutcome {
    /// The persisted workout entry
    pub entry: WorkoutEntry,
    /// The detection result the caller can surface to the user
    pub detection: PrDetection,
}

/// Entry-logging orchestration over the database and the PR engine.
#[derive(Clone)]
pub struct WorkoutService {
    db: Database,
    engine: PrEngine,
}

impl WorkoutService {
    /// Wire a service over the given database handle.
    #[must_use]
    pub fn new(db: Database) -> Self {
        let ledger: Arc<dyn PrLedger> = Arc::new(db.clone());
        let normalizer = BodyweightNormalizer::new(Arc::new(db.clone()));
        let engine = PrEngine::new(ledger, normalizer);

        Self { db, engine }
    }

    /// The engine, for callers that drive detection and commit themselves.
    #[must_use]
    pub const fn engine(&self) -> &PrEngine {
        &self.engine
    }

    /// The underlying database handle.
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// Log a workout entry: score it, decide PR status, persist the entry,
    /// and commit the record when one was set.
    ///
    /// The entry is persisted exactly once regardless of PR status. When the
    /// commit loses to a concurrent writer, the whole detect-then-commit
    /// sequence re-runs against the fresh best; if the entry no longer
    /// qualifies, its stored PR flag is downgraded before returning.
    ///
    /// # Errors
    ///
    /// [`EngineError::ExerciseNotFound`] when the exercise does not belong to
    /// the user, [`EngineError::CommitContention`] when every commit attempt
    /// lost the race, and [`EngineError::Database`] for store failures.
    pub async fn log_entry(
        &self,
        user_id: i64,
        request: LogEntry,
    ) -> Result<EntryOutcome, EngineError> {
        if !self.db.exercise_exists(user_id, request.exercise_id).await? {
            return Err(EngineError::ExerciseNotFound {
                user_id,
                exercise_id: request.exercise_id,
            });
        }

        let performed_on = request.performed_on.unwrap_or_else(Utc::now);

        let mut detection = self
            .engine
            .score_and_detect(
                user_id,
                request.exercise_id,
                request.weight,
                request.reps,
                request.sets,
            )
            .await?;

        let entry = self
            .db
            .create_entry(&NewWorkoutEntry {
                user_id,
                exercise_id: request.exercise_id,
                weight: request.weight,
                reps: request.reps,
                sets: request.sets,
                notes: request.notes.clone(),
                performed_on,
                score: detection.score,
                is_pr: detection.is_pr,
            })
            .await?;

        let mut attempts = 0;
        while detection.is_pr {
            attempts += 1;
            match self
                .engine
                .commit_pr(
                    user_id,
                    request.exercise_id,
                    entry.id,
                    request.weight,
                    request.reps,
                    request.sets,
                    performed_on,
                )
                .await
            {
                Ok(record) => {
                    info!(
                        user_id,
                        exercise_id = request.exercise_id,
                        record_id = record.id,
                        score = record.score,
                        "personal record committed"
                    );
                    break;
                }
                Err(DatabaseError::RecordSuperseded { .. }) => {
                    if attempts >= MAX_COMMIT_ATTEMPTS {
                        return Err(EngineError::CommitContention {
                            user_id,
                            exercise_id: request.exercise_id,
                            attempts,
                        });
                    }

                    warn!(
                        user_id,
                        exercise_id = request.exercise_id,
                        attempts, "PR commit superseded; re-running detection"
                    );

                    detection = self
                        .engine
                        .score_and_detect(
                            user_id,
                            request.exercise_id,
                            request.weight,
                            request.reps,
                            request.sets,
                        )
                        .await?;

                    if !detection.is_pr {
                        // A concurrent entry set a better record between our
                        // detection and commit; the stored flag must follow
                        // the final verdict.
                        self.db.clear_entry_pr_flag(entry.id).await?;
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }

        let entry = self
            .db
            .get_entry(user_id, entry.id)
            .await?
            .unwrap_or(entry);

        Ok(EntryOutcome { entry, detection })
    }

    /// Chronological PR history for an exercise, newest first.
    pub async fn pr_history(
        &self,
        user_id: i64,
        exercise_id: i64,
    ) -> Result<Vec<PrRecord>, EngineError> {
        if !self.db.exercise_exists(user_id, exercise_id).await? {
            return Err(EngineError::ExerciseNotFound {
                user_id,
                exercise_id,
            });
        }

        Ok(self.db.pr_history_for(user_id, exercise_id).await?)
    }

    /// The single best record for every exercise the user has PR'd on.
    pub async fn best_per_exercise(
        &self,
        user_id: i64,
    ) -> Result<HashMap<i64, PrRecord>, EngineError> {
        Ok(self.db.best_per_exercise(user_id).await?)
    }
}
