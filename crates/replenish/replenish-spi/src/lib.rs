//! Replenishment Service Provider Interface
//!
//! Defines the data types exchanged by the reorder decision stack — inventory
//! snapshots in, recommendations and batch reports out — and its error
//! taxonomy.

pub mod error;
pub mod model;

// Re-export all public items at the crate root for convenience
pub use error::ReplenishError;
pub use model::{
    BatchReport, FailedItem, InventorySnapshot, LeadTimeDemand, ReorderRecommendation, SkippedItem,
    Urgency,
};

/// Result type for replenishment operations.
pub type Result<T> = std::result::Result<T, ReplenishError>;
