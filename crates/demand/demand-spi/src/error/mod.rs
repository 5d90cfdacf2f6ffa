//! Error module containing demand forecasting error types.

mod demand_error;

pub use demand_error::DemandError;
