// ABOUTME: Named constants used by the scoring and normalization pipeline
// ABOUTME: Bodyweight reference values and unit-conversion factors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

//! Application constants, grouped by concern.

/// Bodyweight normalization constants
pub mod scoring {
    /// Reference bodyweight all scores are leveled against (kilograms)
    pub const REFERENCE_BODYWEIGHT_KG: f64 = 75.0;

    /// Bodyweight assumed for users with no recorded sample (kilograms)
    pub const DEFAULT_BODYWEIGHT_KG: f64 = 70.0;

    /// Pounds to kilograms conversion factor
    pub const LB_TO_KG: f64 = 0.453_592;
}

/// Celebration messages attached to PR detection results
pub mod messages {
    /// Emitted when the first-ever record for an exercise is set
    pub const FIRST_RECORD: &str = "\u{1f389} First record set! Keep going!";

    /// Emitted when a previous best is beaten
    pub const NEW_RECORD: &str =
        "\u{1f3c6} New Personal Record! You beat your previous best!";
}
