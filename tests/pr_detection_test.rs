// ABOUTME: Integration tests for the PR detection engine
// ABOUTME: First-record rule, strict-greater comparison, and failure semantics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitmarket

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use fitmarket::database::{BodyweightReader, PrLedger};
use fitmarket::errors::DatabaseError;
use fitmarket::models::{BodyweightSample, NewPrRecord, PrRecord, WeightUnit};
use fitmarket::pr::PrEngine;
use fitmarket::scoring::BodyweightNormalizer;

fn engine_over(db: &fitmarket::database::Database) -> PrEngine {
    let ledger: Arc<dyn PrLedger> = Arc::new(db.clone());
    let normalizer = BodyweightNormalizer::new(Arc::new(db.clone()));
    PrEngine::new(ledger, normalizer)
}

#[tokio::test]
async fn first_entry_is_always_a_record() -> Result<()> {
    let db = common::create_test_database().await?;
    common::create_test_exercise(&db, 1, "BNCH").await?;
    let engine = engine_over(&db);

    // No bodyweight sample: default 70 kg, factor 75/70.
    let detection = engine.score_and_detect(1, 1, 100.0, 5, 3).await?;

    assert!(detection.is_pr);
    assert!((detection.score - 1607.142_857_142_857).abs() < 1e-6);
    assert!(detection.previous_best.is_none());
    assert!(detection.improvement.is_none());
    assert!(detection.message.unwrap().contains("First record"));

    Ok(())
}

#[tokio::test]
async fn repeated_identical_entry_is_not_a_record() -> Result<()> {
    let db = common::create_test_database().await?;
    let exercise = common::create_test_exercise(&db, 1, "BNCH").await?;
    let engine = engine_over(&db);

    let first = engine.score_and_detect(1, exercise.id, 100.0, 5, 3).await?;
    assert!(first.is_pr);

    let entry = common::create_test_entry(
        &db, 1, exercise.id, 100.0, 5, 3, first.score, Utc::now(),
    )
    .await?;
    engine
        .commit_pr(1, exercise.id, entry.id, 100.0, 5, 3, entry.performed_on)
        .await?;

    // Identical inputs produce the identical score; equality is not a PR.
    let second = engine.score_and_detect(1, exercise.id, 100.0, 5, 3).await?;
    assert!(!second.is_pr);
    assert!((second.score - first.score).abs() < f64::EPSILON);
    assert!((second.previous_best.unwrap() - first.score).abs() < 1e-9);
    assert!(second.improvement.is_none());
    assert!(second.message.is_none());

    Ok(())
}

#[tokio::test]
async fn hairline_improvement_is_a_record() -> Result<()> {
    let db = common::create_test_database().await?;
    let exercise = common::create_test_exercise(&db, 1, "BNCH").await?;
    // Bodyweight pinned to the reference: factor 1.0, scores are raw products.
    db.record_bodyweight_sample(1, 75.0, WeightUnit::Kilograms, Utc::now())
        .await?;
    let engine = engine_over(&db);

    // Baseline best of exactly 1000.
    let baseline = engine.score_and_detect(1, exercise.id, 100.0, 10, 1).await?;
    assert!((baseline.score - 1000.0).abs() < f64::EPSILON);
    let entry = common::create_test_entry(
        &db, 1, exercise.id, 100.0, 10, 1, baseline.score, Utc::now(),
    )
    .await?;
    engine
        .commit_pr(1, exercise.id, entry.id, 100.0, 10, 1, entry.performed_on)
        .await?;

    // Exactly 1000 again: not a PR.
    let tie = engine.score_and_detect(1, exercise.id, 100.0, 10, 1).await?;
    assert!(!tie.is_pr);

    // 1000.01 clears the bar by a hair.
    let better = engine
        .score_and_detect(1, exercise.id, 100.001, 10, 1)
        .await?;
    assert!(better.is_pr);
    assert!((better.improvement.unwrap() - 0.01).abs() < 1e-6);
    assert!(better.message.unwrap().contains("Personal Record"));

    Ok(())
}

#[tokio::test]
async fn zero_inputs_never_set_a_record() -> Result<()> {
    let db = common::create_test_database().await?;
    let exercise = common::create_test_exercise(&db, 1, "BNCH").await?;
    let engine = engine_over(&db);

    // Even with empty history, a zero-value contribution is not a PR.
    let detection = engine.score_and_detect(1, exercise.id, 0.0, 5, 3).await?;
    assert!(!detection.is_pr);
    assert!(detection.score.abs() < f64::EPSILON);
    assert!(detection.message.is_none());

    let negative = engine.score_and_detect(1, exercise.id, 100.0, -2, 3).await?;
    assert!(!negative.is_pr);

    Ok(())
}

#[tokio::test]
async fn records_are_scoped_per_exercise_and_user() -> Result<()> {
    let db = common::create_test_database().await?;
    let bench = common::create_test_exercise(&db, 1, "BNCH").await?;
    let squat = common::create_test_exercise(&db, 1, "SQT").await?;
    let engine = engine_over(&db);

    let detection = engine.score_and_detect(1, bench.id, 100.0, 5, 3).await?;
    let entry = common::create_test_entry(
        &db, 1, bench.id, 100.0, 5, 3, detection.score, Utc::now(),
    )
    .await?;
    engine
        .commit_pr(1, bench.id, entry.id, 100.0, 5, 3, entry.performed_on)
        .await?;

    // A different exercise starts from a clean slate.
    let other_exercise = engine.score_and_detect(1, squat.id, 60.0, 5, 3).await?;
    assert!(other_exercise.is_pr);
    assert!(other_exercise.previous_best.is_none());

    // So does a different user on the same exercise id space.
    let other_user = engine.score_and_detect(2, bench.id, 60.0, 5, 3).await?;
    assert!(other_user.is_pr);

    Ok(())
}

// A ledger that is down: every lookup fails.
struct UnreachableLedger;

#[async_trait]
impl PrLedger for UnreachableLedger {
    async fn best_pr_for(
        &self,
        _user_id: i64,
        _exercise_id: i64,
    ) -> Result<Option<PrRecord>, DatabaseError> {
        Err(DatabaseError::QueryError {
            context: "history store unreachable".into(),
        })
    }

    async fn append_pr_record(&self, _record: &NewPrRecord) -> Result<PrRecord, DatabaseError> {
        Err(DatabaseError::QueryError {
            context: "history store unreachable".into(),
        })
    }

    async fn pr_history_for(
        &self,
        _user_id: i64,
        _exercise_id: i64,
    ) -> Result<Vec<PrRecord>, DatabaseError> {
        Err(DatabaseError::QueryError {
            context: "history store unreachable".into(),
        })
    }

    async fn best_per_exercise(
        &self,
        _user_id: i64,
    ) -> Result<HashMap<i64, PrRecord>, DatabaseError> {
        Err(DatabaseError::QueryError {
            context: "history store unreachable".into(),
        })
    }
}

struct NoSamples;

#[async_trait]
impl BodyweightReader for NoSamples {
    async fn latest_bodyweight(
        &self,
        _user_id: i64,
    ) -> Result<Option<BodyweightSample>, DatabaseError> {
        Ok(None)
    }
}

#[tokio::test]
async fn store_failure_is_never_mistaken_for_empty_history() {
    common::init_test_logging();
    let engine = PrEngine::new(
        Arc::new(UnreachableLedger),
        BodyweightNormalizer::new(Arc::new(NoSamples)),
    );

    let result = engine.score_and_detect(1, 1, 100.0, 5, 3).await;

    // A transient failure must surface as an error, not as "first record".
    match result {
        Err(DatabaseError::QueryError { context }) => {
            assert!(context.contains("unreachable"));
        }
        other => panic!("expected a query error, got {other:?}"),
    }
}
