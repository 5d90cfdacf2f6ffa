//! Error module containing replenishment error types.

mod replenish_error;

pub use replenish_error::ReplenishError;
