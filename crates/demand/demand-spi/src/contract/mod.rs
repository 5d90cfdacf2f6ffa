//! Contract module containing demand forecasting traits.
//!
//! - [`DemandModel`] - Fitted per-item demand models
//! - [`QuantileEstimator`] - Confidence band computation strategies

mod demand_model;
mod quantile_estimator;

pub use demand_model::DemandModel;
pub use quantile_estimator::QuantileEstimator;
