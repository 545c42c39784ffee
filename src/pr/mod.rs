// ABOUTME: PR detection engine - scores entries and compares against history
// ABOUTME: Detection is read-only; committing a record is a separate explicit step
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

//! # PR Engine
//!
//! [`PrEngine::score_and_detect`] answers "does this entry beat the user's
//! best for the exercise?" without touching the ledger, so that entry
//! persistence and record persistence can be sequenced and retried
//! independently by the caller. [`PrEngine::commit_pr`] performs the
//! explicit append and surfaces a clean conflict when a concurrent writer
//! got there first with an equal or better score.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use fitmarket_core::errors::DatabaseError;
use fitmarket_core::models::{NewPrRecord, PrDetection, PrRecord};

use crate::database::PrLedger;
use crate::scoring::{score, BodyweightNormalizer};

/// Personal-record detection and commit over a history ledger.
#[derive(Clone)]
pub struct PrEngine {
    ledger: Arc<dyn PrLedger>,
    normalizer: BodyweightNormalizer,
}

impl PrEngine {
    /// Create an engine over the given ledger and normalizer.
    #[must_use]
    pub fn new(ledger: Arc<dyn PrLedger>, normalizer: BodyweightNormalizer) -> Self {
        Self { ledger, normalizer }
    }

    /// Score an entry and decide whether it is a personal record.
    ///
    /// The first-ever entry for a (user, exercise) pair is always a PR; after
    /// that only a strictly greater score qualifies — a repeated score is not
    /// re-recorded. A zero score (non-positive inputs) is never a PR, even
    /// with empty history.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`DatabaseError`] when the bodyweight lookup or
    /// the history lookup fails. A lookup failure is never treated as "no
    /// prior record".
    pub async fn score_and_detect(
        &self,
        user_id: i64,
        exercise_id: i64,
        weight: f64,
        reps: i32,
        sets: i32,
    ) -> Result<PrDetection, DatabaseError> {
        let factor = self.normalizer.factor_for(user_id).await?;
        let new_score = score(weight, reps, sets, factor);

        if new_score <= 0.0 {
            return Ok(PrDetection::not_a_record(new_score, None));
        }

        let best = self.ledger.best_pr_for(user_id, exercise_id).await?;

        let detection = match best {
            None => PrDetection::first_record(new_score),
            Some(ref previous) if new_score > previous.score => {
                PrDetection::new_record(new_score, previous.score)
            }
            Some(ref previous) => PrDetection::not_a_record(new_score, Some(previous.score)),
        };

        if detection.is_pr {
            info!(
                user_id,
                exercise_id,
                score = detection.score,
                previous_best = detection.previous_best,
                "personal record detected"
            );
        }

        Ok(detection)
    }

    /// Commit a detected PR to the ledger.
    ///
    /// Recomputes the score from the raw inputs (the factor is freshly
    /// queried, as at detection time) and appends under the ledger's
    /// strict-increase guard.
    ///
    /// # Errors
    ///
    /// Returns [`DatabaseError::RecordSuperseded`] when a concurrent commit
    /// reached the ledger first with an equal or better score; the caller
    /// recovers by re-running the full detect-then-commit sequence, not by
    /// retrying the append with its now-stale premise.
    pub async fn commit_pr(
        &self,
        user_id: i64,
        exercise_id: i64,
        workout_entry_id: i64,
        weight: f64,
        reps: i32,
        sets: i32,
        achieved_at: DateTime<Utc>,
    ) -> Result<PrRecord, DatabaseError> {
        let factor = self.normalizer.factor_for(user_id).await?;
        let record = NewPrRecord {
            user_id,
            exercise_id,
            workout_entry_id,
            score: score(weight, reps, sets, factor),
            weight,
            reps,
            sets,
            achieved_at,
        };

        self.ledger.append_pr_record(&record).await
    }
}
