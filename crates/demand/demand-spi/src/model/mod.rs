//! Model module containing demand forecasting data structures.
//!
//! - [`SalesObservation`] - A dated demand observation
//! - [`ModelKey`] - Structured (product, store) identity
//! - [`QuantileForecast`] - Per-day quantile forecast output
//! - [`AccuracyMetrics`] / [`TrainingResult`] / [`UpdateResult`] - Training outputs

mod forecast;
mod key;
mod metrics;
mod observation;
mod training;

pub use forecast::{ForecastPoint, ModelComponents, QuantileBands, QuantileForecast};
pub use key::ModelKey;
pub use metrics::AccuracyMetrics;
pub use observation::{normalize_observations, SalesObservation};
pub use training::{DateRange, TrainingResult, UpdateResult};
