//! Forecast accuracy metrics.

use serde::{Deserialize, Serialize};

/// Accuracy metrics from rolling-origin cross-validation.
///
/// Error metrics are averaged across validation folds; `coverage` is the
/// fraction of held-out actuals that fell inside the model's confidence
/// interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    /// Mean absolute error.
    pub mae: f64,
    /// Mean absolute percentage error.
    pub mape: f64,
    /// Root mean squared error.
    pub rmse: f64,
    /// Median absolute percentage error.
    pub mdape: f64,
    /// Symmetric mean absolute percentage error.
    pub smape: f64,
    /// Confidence interval coverage in [0, 1].
    pub coverage: f64,
}
