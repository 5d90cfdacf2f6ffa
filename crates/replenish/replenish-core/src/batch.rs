//! Parallel batch recommendation runs.
//!
//! Fans a set of inventory snapshots out to the reorder engine with bounded
//! parallelism. Every item lands in exactly one outcome bucket; a missing
//! forecast or a per-item error never aborts the batch.

use std::collections::HashMap;

use rayon::prelude::*;
use tracing::warn;

use demand_spi::ModelKey;
use replenish_api::ReorderConfig;
use replenish_spi::{BatchReport, FailedItem, InventorySnapshot, ReorderRecommendation, SkippedItem};

use crate::engine::ReorderPointEngine;

/// Per-item outcome before partitioning into the report.
enum ItemOutcome {
    Success(ReorderRecommendation),
    Skipped(SkippedItem),
    Failed(FailedItem),
}

/// Batch scheduler driving the reorder engine across an assortment.
#[derive(Debug, Clone)]
pub struct BatchScheduler {
    engine: ReorderPointEngine,
}

impl BatchScheduler {
    /// Create a scheduler around a configured engine.
    pub fn new(engine: ReorderPointEngine) -> Self {
        Self { engine }
    }

    /// Create a scheduler with the default reorder policy.
    pub fn with_defaults() -> Self {
        Self::new(ReorderPointEngine::with_defaults())
    }

    /// Evaluate every snapshot against its forecast series.
    ///
    /// `forecasts_by_key` supplies the per-day demand series (typically P90)
    /// per item; `config_overrides` supplies per-item policies, with the
    /// engine default applying otherwise. Successful recommendations come
    /// back ascending by urgency rank, input order preserved within a tier;
    /// skipped and failed items are reported separately.
    pub fn generate(
        &self,
        snapshots: &[InventorySnapshot],
        forecasts_by_key: &HashMap<ModelKey, Vec<f64>>,
        config_overrides: &HashMap<ModelKey, ReorderConfig>,
    ) -> BatchReport {
        let outcomes: Vec<ItemOutcome> = snapshots
            .par_iter()
            .map(|snapshot| {
                let key = snapshot.key();
                let Some(series) = forecasts_by_key.get(&key) else {
                    warn!(key = %key, "skipping item: no forecast available");
                    return ItemOutcome::Skipped(SkippedItem {
                        key,
                        reason: "no forecast available".to_string(),
                    });
                };

                let config = config_overrides.get(&key);
                match self.engine.recommend(snapshot, series, config) {
                    Ok(recommendation) => ItemOutcome::Success(recommendation),
                    Err(error) => {
                        warn!(key = %key, %error, "reorder recommendation failed");
                        ItemOutcome::Failed(FailedItem { key, error })
                    }
                }
            })
            .collect();

        let mut recommendations = Vec::new();
        let mut skipped = Vec::new();
        let mut failed = Vec::new();
        for outcome in outcomes {
            match outcome {
                ItemOutcome::Success(recommendation) => recommendations.push(recommendation),
                ItemOutcome::Skipped(item) => skipped.push(item),
                ItemOutcome::Failed(item) => failed.push(item),
            }
        }

        // Stable sort: equal-urgency items keep their input order.
        recommendations.sort_by_key(|r| r.urgency.rank());

        BatchReport {
            recommendations,
            skipped,
            failed,
        }
    }
}
