//! Batch outcome report types.
//!
//! Batch runs never fail wholesale: each item lands in exactly one of three
//! lists, and the caller inspects outcomes without any exception control
//! flow.

use serde::{Deserialize, Serialize};

use demand_spi::ModelKey;

use crate::error::ReplenishError;
use crate::model::ReorderRecommendation;

/// An item skipped before evaluation (e.g. no forecast available).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedItem {
    /// Identity of the skipped item.
    pub key: ModelKey,
    /// Why it was skipped.
    pub reason: String,
}

/// An item whose evaluation failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedItem {
    /// Identity of the failed item.
    pub key: ModelKey,
    /// The error the reorder engine returned.
    pub error: ReplenishError,
}

/// Aggregated outcome of a batch recommendation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Successful recommendations, ascending by urgency rank; input order is
    /// preserved within an urgency tier.
    pub recommendations: Vec<ReorderRecommendation>,
    /// Items skipped for missing inputs.
    pub skipped: Vec<SkippedItem>,
    /// Items whose evaluation errored.
    pub failed: Vec<FailedItem>,
}

impl BatchReport {
    /// Total number of items that went into the batch.
    pub fn total_items(&self) -> usize {
        self.recommendations.len() + self.skipped.len() + self.failed.len()
    }

    /// Recommendations that actually call for an order.
    pub fn actionable(&self) -> impl Iterator<Item = &ReorderRecommendation> {
        self.recommendations.iter().filter(|r| r.reorder_quantity > 0)
    }
}
