//! Replenishment error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during reorder calculations.
///
/// Serializable so batch reports can carry per-item failures to callers.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ReplenishError {
    /// The forecast series is shorter than the lead time it must cover.
    #[error("Insufficient forecast horizon: need at least {required} days, got {actual}")]
    InsufficientForecastHorizon { required: usize, actual: usize },

    /// A policy value is out of range.
    #[error("Invalid config '{name}': {reason}")]
    InvalidConfig { name: String, reason: String },

    /// Numerical computation error.
    #[error("Numerical error: {0}")]
    NumericalError(String),
}
