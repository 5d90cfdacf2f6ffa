//! Replenishment Facade
//!
//! High-level API for reorder decisions. Re-exports all public types from
//! the replenish stack for convenient usage.
//!
//! # Example
//!
//! ```ignore
//! use replenish_facade::prelude::*;
//!
//! let engine = ReorderPointEngine::with_defaults();
//! let recommendation = engine.recommend(&snapshot, &p90_series, None)?;
//! println!("{}", recommendation.reasoning);
//! ```

// Re-export everything from core (which includes API and SPI)
pub use replenish_core::*;

/// Prelude module for convenient imports
pub mod prelude {
    // Shared identity
    pub use demand_spi::ModelKey;

    // Configuration
    pub use replenish_api::ReorderConfig;

    // Model and error types
    pub use replenish_spi::{
        BatchReport, FailedItem, InventorySnapshot, LeadTimeDemand, ReorderRecommendation,
        ReplenishError, Result, SkippedItem, Urgency,
    };

    // Implementations
    pub use replenish_core::{BatchScheduler, ReorderPointEngine};
}
