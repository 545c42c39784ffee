// ABOUTME: PR detection result - the outcome of scoring one workout entry
// ABOUTME: Carries the score, PR verdict, improvement delta, and message
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

use serde::{Deserialize, Serialize};

/// Outcome of scoring a workout entry against the user's history.
///
/// `previous_best` is present whenever a prior record exists, PR or not;
/// `improvement` and `message` are present only on a PR. Detection alone
/// never writes to the ledger: a `true` verdict must be followed by an
/// explicit commit.
///
/// # Examples
///
/// ```rust
/// use fitmarket_core::models::PrDetection;
///
/// let first = PrDetection::first_record(1607.14);
/// assert!(first.is_pr);
/// assert!(first.previous_best.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrDetection {
    /// Whether the entry beats the user's historical best for the exercise
    pub is_pr: bool,
    /// Normalized performance score of the entry
    pub score: f64,
    /// Score of the previous best record, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_best: Option<f64>,
    /// `score - previous_best`, present only on a PR over an existing best
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improvement: Option<f64>,
    /// Celebration message, present only on a PR
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PrDetection {
    /// First-ever record for the (user, exercise) pair.
    #[must_use]
    pub fn first_record(score: f64) -> Self {
        Self {
            is_pr: true,
            score,
            previous_best: None,
            improvement: None,
            message: Some(crate::constants::messages::FIRST_RECORD.to_owned()),
        }
    }

    /// A new best over `previous_best`.
    #[must_use]
    pub fn new_record(score: f64, previous_best: f64) -> Self {
        Self {
            is_pr: true,
            score,
            previous_best: Some(previous_best),
            improvement: Some(score - previous_best),
            message: Some(crate::constants::messages::NEW_RECORD.to_owned()),
        }
    }

    /// Not a record; `previous_best` is carried when history exists.
    #[must_use]
    pub const fn not_a_record(score: f64, previous_best: Option<f64>) -> Self {
        Self {
            is_pr: false,
            score,
            previous_best,
            improvement: None,
            message: None,
        }
    }
}
