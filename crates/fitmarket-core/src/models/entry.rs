// ABOUTME: Workout entry model - one logged performance for an exercise
// ABOUTME: Immutable once scored; the PR flag reflects detection at log time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One logged workout performance.
///
/// Entries are persisted regardless of PR status; `score` and `is_pr` are
/// computed once at creation and never revised afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutEntry {
    /// Sequence id assigned by the store
    pub id: i64,
    /// Owner of the entry
    pub user_id: i64,
    /// Exercise this entry was logged against
    pub exercise_id: i64,
    /// Weight lifted
    pub weight: f64,
    /// Repetitions per set
    pub reps: i32,
    /// Number of sets
    pub sets: i32,
    /// Free-form notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the workout took place
    pub performed_on: DateTime<Utc>,
    /// Normalized performance score computed at creation
    pub score: f64,
    /// Whether this entry set a personal record when logged
    pub is_pr: bool,
    /// When the entry was persisted
    pub created_at: DateTime<Utc>,
}
