//! Training and update result types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{AccuracyMetrics, ModelKey};

/// Inclusive date range of a training history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Summary returned by a successful training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingResult {
    /// Identity the model was trained for.
    pub key: ModelKey,
    /// Number of distinct observation dates used.
    pub training_samples: usize,
    /// First and last observation dates.
    pub date_range: DateRange,
    /// Cross-validated accuracy metrics.
    pub metrics: AccuracyMetrics,
    /// Version string of the fitted model.
    pub model_version: String,
    /// When training completed.
    pub trained_at: DateTime<Utc>,
}

/// Summary returned by a successful model update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateResult {
    /// Identity the model was refit for.
    pub key: ModelKey,
    /// Number of new observations merged in.
    pub merged_samples: usize,
    /// Total distinct observation dates after the merge.
    pub total_samples: usize,
    /// First and last observation dates after the merge.
    pub date_range: DateRange,
    /// Recomputed accuracy metrics.
    pub metrics: AccuracyMetrics,
    /// Version string of the refit model.
    pub model_version: String,
    /// When the update completed.
    pub updated_at: DateTime<Utc>,
}
