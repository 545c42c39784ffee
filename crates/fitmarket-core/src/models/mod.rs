// ABOUTME: Domain models for the Fitmarket scoring engine
// ABOUTME: Workout entries, PR records, bodyweight samples, and exercises
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

//! Domain models.
//!
//! All models serialize with `serde`; the excluded API layer shapes them for
//! clients as-is. Identifiers are 64-bit sequence ids assigned by the store;
//! user ids are opaque values produced at the authentication boundary.

mod bodyweight;
mod detection;
mod entry;
mod exercise;
mod record;

pub use bodyweight::{BodyweightSample, WeightUnit};
pub use detection::PrDetection;
pub use entry::WorkoutEntry;
pub use exercise::Exercise;
pub use record::{NewPrRecord, PrRecord};
