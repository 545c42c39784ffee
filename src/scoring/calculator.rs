// ABOUTME: Pure score functions - deterministic in their inputs
// ABOUTME: Non-positive inputs contribute a zero score, not an error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

/// Unnormalized performance score: `weight * reps * sets`.
///
/// A non-positive weight, reps, or sets is a zero-value contribution, not a
/// scoring failure; validation belongs to the caller's boundary.
#[must_use]
pub fn raw_score(weight: f64, reps: i32, sets: i32) -> f64 {
    if weight <= 0.0 || reps <= 0 || sets <= 0 {
        return 0.0;
    }

    weight * f64::from(reps) * f64::from(sets)
}

/// Canonical performance score: the raw score scaled by the bodyweight
/// normalization factor.
///
/// With `factor = 1.0` this reduces to the raw score. Deterministic: equal
/// inputs always produce an equal score.
#[must_use]
pub fn score(weight: f64, reps: i32, sets: i32, factor: f64) -> f64 {
    raw_score(weight, reps, sets) * factor
}
