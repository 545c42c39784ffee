// ABOUTME: Service layer - the operations a thin API layer calls
// ABOUTME: Entry logging orchestration plus history and overview queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

//! Service layer. HTTP shaping, authentication, and input validation happen
//! upstream; these services receive validated values and an authenticated
//! user id.

mod workout;

pub use workout::{EntryOutcome, LogEntry, WorkoutService};
