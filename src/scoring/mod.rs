// ABOUTME: Scoring pipeline - pure calculator plus bodyweight normalization
// ABOUTME: Converts (weight, reps, sets) into a comparable performance score
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

//! # Scoring
//!
//! Two halves: [`calculator`] holds the pure score functions, and
//! [`normalizer`] derives the bodyweight normalization factor that levels
//! scores across users of different size. The canonical score of an entry is
//! `weight * reps * sets * factor`.

pub mod calculator;
pub mod normalizer;

pub use calculator::{raw_score, score};
pub use normalizer::BodyweightNormalizer;
