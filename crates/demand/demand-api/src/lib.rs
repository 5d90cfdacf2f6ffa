//! Demand Forecasting Consumer API
//!
//! Configuration types for the forecast engine.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use demand_spi::{
    normalize_observations, AccuracyMetrics, DateRange, DemandError, DemandModel, ForecastPoint,
    ModelComponents, ModelKey, QuantileBands, QuantileEstimator, QuantileForecast, Result,
    SalesObservation, TrainingResult, UpdateResult,
};

/// How confidence bands are derived from a fitted model.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum QuantileMethod {
    /// Normal approximation from fit residuals: interval bounds at
    /// z-scaled residual standard errors, P90 at 1.28 standard deviations
    /// above the point forecast.
    #[default]
    NormalApproximation,
    /// Bootstrap resampling of fit residuals into an ensemble, with
    /// empirical percentiles per horizon day.
    Bootstrap {
        /// Number of resampling iterations.
        iterations: usize,
    },
}

/// Rolling-origin cross-validation settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CrossValidationConfig {
    /// Length of the first training window, in days.
    pub initial_window_days: usize,
    /// Days the training window grows between folds.
    pub period_days: usize,
    /// Held-out horizon evaluated per fold, in days.
    pub horizon_days: usize,
}

impl Default for CrossValidationConfig {
    fn default() -> Self {
        Self {
            initial_window_days: 90,
            period_days: 30,
            horizon_days: 30,
        }
    }
}

/// Configuration for the forecast engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seasonal cycle length of daily demand (7 = weekly).
    pub seasonal_period_days: usize,
    /// Minimum distinct observation dates required to train.
    pub min_training_days: usize,
    /// Confidence level for the p05/p95 bounds.
    pub confidence_level: f64,
    /// Quantile estimation strategy.
    pub quantile_method: QuantileMethod,
    /// Seed for the bootstrap random source; fixed for reproducibility.
    pub bootstrap_seed: u64,
    /// Cross-validation settings used at train/update time.
    pub cross_validation: CrossValidationConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seasonal_period_days: 7,
            min_training_days: 30,
            confidence_level: 0.95,
            quantile_method: QuantileMethod::default(),
            bootstrap_seed: 42,
            cross_validation: CrossValidationConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Set the seasonal period, at least 2 days.
    pub fn seasonal_period_days(mut self, days: usize) -> Self {
        self.seasonal_period_days = days.max(2);
        self
    }

    /// Set the minimum training history length.
    pub fn min_training_days(mut self, days: usize) -> Self {
        self.min_training_days = days.max(2);
        self
    }

    /// Set the confidence level, clamped into (0, 1).
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.confidence_level = level.clamp(0.5, 0.999);
        self
    }

    /// Select the quantile estimation strategy.
    pub fn quantile_method(mut self, method: QuantileMethod) -> Self {
        self.quantile_method = method;
        self
    }

    /// Set the bootstrap seed.
    pub fn bootstrap_seed(mut self, seed: u64) -> Self {
        self.bootstrap_seed = seed;
        self
    }

    /// Set the cross-validation windows.
    pub fn cross_validation(mut self, cv: CrossValidationConfig) -> Self {
        self.cross_validation = cv;
        self
    }
}
