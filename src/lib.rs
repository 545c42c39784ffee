// ABOUTME: Main library entry point for the Fitmarket scoring engine
// ABOUTME: Wires storage, scoring, PR detection, and the workout service
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

#![deny(unsafe_code)]

//! # Fitmarket
//!
//! Backend core of a personal-fitness tracker that treats workout
//! performance like a tradable asset: exercises carry ticker symbols, and
//! every logged entry is scored like a trade. This crate is the
//! personal-record (PR) detection and scoring engine behind that metaphor.
//!
//! ## Architecture
//!
//! - **Scoring**: a pure calculator (`weight * reps * sets`, scaled by a
//!   bodyweight normalization factor) plus the normalizer that derives the
//!   factor from the user's latest recorded bodyweight.
//! - **PR engine**: compares a fresh score against the historical best for
//!   the (user, exercise) pair and reports the verdict; committing a record
//!   is a separate, explicit step.
//! - **Ledger**: append-only PR history in SQLite with a guarded append
//!   that keeps per-key scores strictly increasing under concurrency.
//! - **Workout service**: the entry-logging orchestration a thin API layer
//!   calls; persists entries, commits records, and owns retry policy.
//!
//! Authentication, HTTP transport, and input validation live outside this
//! crate; callers hand the engine validated numbers and an authenticated
//! user id.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fitmarket::database::Database;
//! use fitmarket::services::{LogEntry, WorkoutService};
//!
//! # async fn run() -> Result<(), fitmarket::errors::EngineError> {
//! let db = Database::new("sqlite:fitmarket.db").await?;
//! let service = WorkoutService::new(db);
//!
//! let outcome = service
//!     .log_entry(42, LogEntry::new(1, 100.0, 5, 3))
//!     .await?;
//! if outcome.detection.is_pr {
//!     println!("new record: {:.2}", outcome.detection.score);
//! }
//! # Ok(())
//! # }
//! ```

/// Environment-based configuration
pub mod config;

/// SQLite-backed storage: entries, exercises, bodyweight samples, PR ledger
pub mod database;

/// Logging configuration and tracing setup
pub mod logging;

/// PR detection engine
pub mod pr;

/// Score calculation and bodyweight normalization
pub mod scoring;

/// Entry-logging orchestration and history queries
pub mod services;

pub use fitmarket_core::{constants, errors, models};
