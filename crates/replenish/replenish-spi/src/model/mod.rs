//! Model module containing replenishment data structures.
//!
//! - [`InventorySnapshot`] - Caller-supplied stock position
//! - [`Urgency`] / [`LeadTimeDemand`] / [`ReorderRecommendation`] - Decision outputs
//! - [`BatchReport`] - Per-item outcome aggregation

mod inventory;
mod recommendation;
mod report;

pub use inventory::InventorySnapshot;
pub use recommendation::{LeadTimeDemand, ReorderRecommendation, Urgency};
pub use report::{BatchReport, FailedItem, SkippedItem};
