// ABOUTME: Bodyweight normalization factor derivation
// ABOUTME: Factor = reference bodyweight / user's current bodyweight in kg
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

use std::sync::Arc;

use tracing::debug;

use fitmarket_core::constants::scoring::{DEFAULT_BODYWEIGHT_KG, REFERENCE_BODYWEIGHT_KG};
use fitmarket_core::errors::DatabaseError;

use crate::database::BodyweightReader;

/// Derives the multiplicative factor that levels scores across users of
/// different bodyweight.
///
/// The factor is `75.0 / current_bodyweight_kg` and is freshly queried for
/// every scoring operation; a user's scores track their latest logged
/// bodyweight rather than a snapshot taken when a record was set.
#[derive(Clone)]
pub struct BodyweightNormalizer {
    reader: Arc<dyn BodyweightReader>,
}

impl BodyweightNormalizer {
    /// Create a normalizer over the given bodyweight store.
    #[must_use]
    pub fn new(reader: Arc<dyn BodyweightReader>) -> Self {
        Self { reader }
    }

    /// The user's most recent bodyweight in kilograms, pound-family samples
    /// converted. Users with no recorded sample default to 70.0 kg.
    pub async fn current_bodyweight_kg(&self, user_id: i64) -> Result<f64, DatabaseError> {
        let sample = self.reader.latest_bodyweight(user_id).await?;

        Ok(sample.map_or(DEFAULT_BODYWEIGHT_KG, |s| s.weight_kg()))
    }

    /// Normalization factor for the user's next score.
    ///
    /// A non-positive bodyweight cannot come from validated input; should it
    /// appear anyway, the factor degrades to 1.0 (no normalization).
    pub async fn factor_for(&self, user_id: i64) -> Result<f64, DatabaseError> {
        let bodyweight = self.current_bodyweight_kg(user_id).await?;
        if bodyweight <= 0.0 {
            return Ok(1.0);
        }

        let factor = REFERENCE_BODYWEIGHT_KG / bodyweight;
        debug!(user_id, bodyweight, factor, "normalization factor derived");

        Ok(factor)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Utc;
    use fitmarket_core::models::{BodyweightSample, WeightUnit};

    use super::*;

    struct FixedReader(Option<BodyweightSample>);

    #[async_trait]
    impl BodyweightReader for FixedReader {
        async fn latest_bodyweight(
            &self,
            _user_id: i64,
        ) -> Result<Option<BodyweightSample>, DatabaseError> {
            Ok(self.0.clone())
        }
    }

    fn sample(weight: f64, unit: WeightUnit) -> BodyweightSample {
        BodyweightSample {
            id: 1,
            user_id: 1,
            weight,
            unit,
            recorded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn missing_sample_defaults_to_seventy_kilograms() {
        let normalizer = BodyweightNormalizer::new(Arc::new(FixedReader(None)));

        let bodyweight = normalizer.current_bodyweight_kg(1).await.unwrap();
        assert!((bodyweight - 70.0).abs() < f64::EPSILON);

        let factor = normalizer.factor_for(1).await.unwrap();
        assert!((factor - 75.0 / 70.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn pound_samples_convert_before_the_ratio() {
        let reader = FixedReader(Some(sample(165.0, WeightUnit::Pounds)));
        let normalizer = BodyweightNormalizer::new(Arc::new(reader));

        let bodyweight = normalizer.current_bodyweight_kg(1).await.unwrap();
        assert!((bodyweight - 74.84268).abs() < 1e-6);
    }

    #[tokio::test]
    async fn non_positive_bodyweight_degrades_to_identity_factor() {
        let reader = FixedReader(Some(sample(0.0, WeightUnit::Kilograms)));
        let normalizer = BodyweightNormalizer::new(Arc::new(reader));

        let factor = normalizer.factor_for(1).await.unwrap();
        assert!((factor - 1.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn heavier_than_reference_shrinks_the_factor() {
        let reader = FixedReader(Some(sample(100.0, WeightUnit::Kilograms)));
        let normalizer = BodyweightNormalizer::new(Arc::new(reader));

        let factor = normalizer.factor_for(1).await.unwrap();
        assert!((factor - 0.75).abs() < 1e-9);
    }
}
