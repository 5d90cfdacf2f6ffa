//! Demand Forecasting Service Provider Interface
//!
//! Defines traits for demand models and quantile estimation, the data types
//! they exchange, and the error taxonomy for the demand forecasting stack.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at the crate root for convenience
pub use contract::{DemandModel, QuantileEstimator};
pub use error::DemandError;
pub use model::{
    normalize_observations, AccuracyMetrics, DateRange, ForecastPoint, ModelComponents, ModelKey,
    QuantileBands, QuantileForecast, SalesObservation, TrainingResult, UpdateResult,
};

/// Result type for demand forecasting operations.
pub type Result<T> = std::result::Result<T, DemandError>;
