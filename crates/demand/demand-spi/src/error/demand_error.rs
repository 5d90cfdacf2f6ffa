//! Demand forecasting error types.

use thiserror::Error;

use crate::model::ModelKey;

/// Errors that can occur during demand forecasting operations.
#[derive(Error, Debug)]
pub enum DemandError {
    /// Insufficient history for training.
    #[error("Insufficient training data: need at least {required} distinct days, got {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// No trained model exists for the requested key.
    #[error("No trained model found for {key}")]
    ModelNotFound { key: ModelKey },

    /// Invalid parameter value.
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Model has not been fitted yet.
    #[error("Model must be fitted before forecasting")]
    NotFitted,

    /// Numerical computation error.
    #[error("Numerical error: {0}")]
    NumericalError(String),
}
