// ABOUTME: Bodyweight sample model and weight unit handling
// ABOUTME: Canonical unit is kilograms; pound-family units convert on read
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::scoring::LB_TO_KG;

/// Unit a bodyweight sample was recorded in.
///
/// Kilograms is the canonical unit; everything downstream of the store works
/// in kilograms. `"lbs"` is accepted as an alias for pounds on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightUnit {
    /// Kilograms (canonical)
    #[serde(rename = "kg")]
    Kilograms,
    /// Pounds, converted to kilograms on read
    #[serde(rename = "lb", alias = "lbs")]
    Pounds,
}

impl WeightUnit {
    /// Storage representation of the unit
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kilograms => "kg",
            Self::Pounds => "lb",
        }
    }

    /// Parse a stored unit string. Unknown values read as kilograms, the
    /// canonical unit; only the pound family triggers conversion.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "lb" | "lbs" => Self::Pounds,
            _ => Self::Kilograms,
        }
    }
}

/// One recorded bodyweight measurement for a user.
///
/// The normalizer only ever reads the most recent sample per user; samples
/// are never mutated after recording.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyweightSample {
    /// Sequence id assigned by the store
    pub id: i64,
    /// Owner of the sample
    pub user_id: i64,
    /// Measured weight in `unit`
    pub weight: f64,
    /// Unit the measurement was taken in
    pub unit: WeightUnit,
    /// When the measurement was taken
    pub recorded_at: DateTime<Utc>,
}

impl BodyweightSample {
    /// The sample's weight expressed in kilograms.
    #[must_use]
    pub fn weight_kg(&self) -> f64 {
        match self.unit {
            WeightUnit::Kilograms => self.weight,
            WeightUnit::Pounds => self.weight * LB_TO_KG,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pounds_convert_to_kilograms() {
        let sample = BodyweightSample {
            id: 1,
            user_id: 7,
            weight: 165.0,
            unit: WeightUnit::Pounds,
            recorded_at: Utc::now(),
        };

        let kg = sample.weight_kg();
        assert!((kg - 74.84268).abs() < 1e-6);
    }

    #[test]
    fn kilograms_pass_through_unchanged() {
        let sample = BodyweightSample {
            id: 1,
            user_id: 7,
            weight: 82.5,
            unit: WeightUnit::Kilograms,
            recorded_at: Utc::now(),
        };

        assert!((sample.weight_kg() - 82.5).abs() < f64::EPSILON);
    }

    #[test]
    fn lbs_alias_parses_as_pounds() {
        assert_eq!(WeightUnit::parse("lbs"), WeightUnit::Pounds);
        assert_eq!(WeightUnit::parse("lb"), WeightUnit::Pounds);
        assert_eq!(WeightUnit::parse("kg"), WeightUnit::Kilograms);
    }

    #[test]
    fn unknown_unit_reads_as_kilograms() {
        assert_eq!(WeightUnit::parse("stone"), WeightUnit::Kilograms);
    }
}
