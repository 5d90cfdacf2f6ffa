//! Trait for quantile band computation.

use crate::model::QuantileBands;

/// Trait for deriving confidence bands and the P90 series from a point
/// forecast and fit residuals.
pub trait QuantileEstimator: Send + Sync {
    /// Compute lower/upper bounds at `confidence_level` plus the P90 series
    /// for the given point forecast.
    fn bands(&self, forecast: &[f64], residuals: &[f64], confidence_level: f64) -> QuantileBands;

    /// Short tag describing the estimation method and its assumptions
    /// (e.g. "normal-approximation"), recorded on produced forecasts.
    fn method(&self) -> &'static str;
}
