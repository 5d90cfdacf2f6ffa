//! Trait for per-item demand models.

use crate::error::DemandError;
use crate::model::ModelComponents;

/// A univariate daily-demand model.
///
/// Implementations fit on a contiguous daily quantity series and produce
/// point forecasts. Residuals from the fit are exposed so that quantile
/// estimators can derive confidence bands for models without native
/// interval output.
pub trait DemandModel: Send + Sync {
    /// Fit the model to a daily demand series.
    fn fit(&mut self, series: &[f64]) -> Result<(), DemandError>;

    /// Forecast the next `steps` days of demand.
    fn predict(&self, steps: usize) -> Result<Vec<f64>, DemandError>;

    /// One-step-ahead in-sample residuals from the last fit.
    ///
    /// Empty until the model has been fitted.
    fn residuals(&self) -> &[f64];

    /// Trend and seasonal components over the next `steps` days, if the
    /// model decomposes its forecast.
    fn components(&self, steps: usize) -> Option<ModelComponents>;

    /// Check if the model has been fitted.
    fn is_fitted(&self) -> bool;

    /// Short model identifier used in version strings (e.g. "holt-winters").
    fn name(&self) -> &'static str;
}
