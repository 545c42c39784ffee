// ABOUTME: Foundation crate for the Fitmarket scoring engine
// ABOUTME: Holds domain models, error types, and scoring constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

#![deny(unsafe_code)]

//! # Fitmarket Core
//!
//! Foundation types for the Fitmarket workout scoring and personal-record
//! engine: domain models (entries, records, bodyweight samples, exercises),
//! the error taxonomy shared across the storage and engine layers, and the
//! scoring constants.
//!
//! This crate is deliberately free of I/O concerns; the database layer and
//! the engine live in the `fitmarket` crate and build on top of these types.

/// Scoring and unit-conversion constants
pub mod constants;

/// Error taxonomy for storage and engine operations
pub mod errors;

/// Domain models
pub mod models;
