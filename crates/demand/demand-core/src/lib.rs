//! Demand Forecasting Core
//!
//! Implementations for the demand forecasting stack:
//!
//! - [`smoothing`]: exponential-smoothing demand models
//! - [`quantile`]: confidence band estimators (normal approximation, bootstrap)
//! - [`metrics`]: forecast accuracy metrics
//! - [`validation`]: rolling-origin cross-validation
//! - [`engine`]: the per-key model registry and its operations

pub mod engine;
pub mod metrics;
pub mod quantile;
pub mod smoothing;
pub mod validation;

// Re-export API (which includes SPI)
pub use demand_api::*;

pub use engine::ForecastEngine;
pub use quantile::{BootstrapEstimator, NormalApproximationEstimator};
pub use smoothing::{fit_demand_model, SeasonalSmoothing, TrendSmoothing};
