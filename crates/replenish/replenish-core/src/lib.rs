//! Replenishment Core
//!
//! Implementations for the reorder decision stack:
//!
//! - [`stats`]: statistical helpers (percentiles, inverse normal CDF)
//! - [`engine`]: the reorder point decision pipeline
//! - [`batch`]: parallel batch recommendation runs

pub mod batch;
pub mod engine;
pub mod stats;

// Re-export API (which includes SPI)
pub use replenish_api::*;

pub use batch::BatchScheduler;
pub use engine::ReorderPointEngine;
