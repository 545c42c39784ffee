// ABOUTME: Exercise model - the per-user scoring domain key
// ABOUTME: Ticker symbols are unique per user, enforced by the store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An exercise a user tracks, addressed by a ticker symbol.
///
/// The engine treats the id as an opaque scoring-domain key; records for two
/// different exercises are never conflated. Tickers are unique per user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Sequence id assigned by the store
    pub id: i64,
    /// Owner of the exercise
    pub user_id: i64,
    /// Ticker symbol, unique within the user's registry
    pub ticker: String,
    /// Display name
    pub name: String,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category label (e.g. push, pull, legs)
    pub category: String,
    /// When the exercise was registered
    pub created_at: DateTime<Utc>,
}
