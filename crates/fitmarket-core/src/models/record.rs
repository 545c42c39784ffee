// ABOUTME: PR record models - one entry per PR-qualifying event
// ABOUTME: Append-only; per (user, exercise) scores strictly increase over time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One personal-record event in the ledger.
///
/// Records are created only when a new best is confirmed and are never
/// updated or deleted. For a given (user, exercise) pair, ordering records by
/// `achieved_at` yields strictly increasing scores; the store's guarded
/// append enforces this.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrRecord {
    /// Sequence id assigned by the store
    pub id: i64,
    /// Owner of the record
    pub user_id: i64,
    /// Exercise the record was set on
    pub exercise_id: i64,
    /// The workout entry that set this record
    pub workout_entry_id: i64,
    /// Normalized performance score at the time the record was set
    pub score: f64,
    /// Raw weight input
    pub weight: f64,
    /// Raw reps input
    pub reps: i32,
    /// Raw sets input
    pub sets: i32,
    /// When the record-setting workout took place
    pub achieved_at: DateTime<Utc>,
    /// When the record was persisted
    pub created_at: DateTime<Utc>,
}

/// Insertion payload for a PR record, before the store assigns an id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPrRecord {
    /// Owner of the record
    pub user_id: i64,
    /// Exercise the record was set on
    pub exercise_id: i64,
    /// The workout entry that set this record
    pub workout_entry_id: i64,
    /// Normalized performance score
    pub score: f64,
    /// Raw weight input
    pub weight: f64,
    /// Raw reps input
    pub reps: i32,
    /// Raw sets input
    pub sets: i32,
    /// When the record-setting workout took place
    pub achieved_at: DateTime<Utc>,
}
