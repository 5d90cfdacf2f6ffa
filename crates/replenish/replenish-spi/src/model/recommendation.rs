//! Reorder recommendation output types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Triage classification of a reorder need.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// Inventory at or below safety stock.
    Critical,
    /// Inventory at or below half the reorder point.
    High,
    /// Inventory at or below the reorder point.
    Medium,
    /// Inventory above the reorder point.
    Low,
}

impl Urgency {
    /// Sort rank: critical first.
    pub fn rank(&self) -> u8 {
        match self {
            Urgency::Critical => 0,
            Urgency::High => 1,
            Urgency::Medium => 2,
            Urgency::Low => 3,
        }
    }

    /// Escalate to at least `floor`, never downgrading.
    pub fn at_least(self, floor: Urgency) -> Urgency {
        if floor.rank() < self.rank() {
            floor
        } else {
            self
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Urgency::Critical => write!(f, "critical"),
            Urgency::High => write!(f, "high"),
            Urgency::Medium => write!(f, "medium"),
            Urgency::Low => write!(f, "low"),
        }
    }
}

/// Demand statistics over the first `lead_time_days` of a forecast series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadTimeDemand {
    /// Mean daily demand over the lead time.
    pub p50_demand: f64,
    /// 90th percentile of daily demand over the lead time.
    pub p90_demand: f64,
    /// Sample standard deviation of daily demand.
    pub std_demand: f64,
    /// Total demand over the lead time.
    pub total_demand: f64,
}

/// A complete reorder recommendation for one (product, store).
///
/// Constructed once per request and never mutated; persisting it is the
/// caller's responsibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderRecommendation {
    /// Product identifier.
    pub product_id: String,
    /// Store identifier; `None` means the product across all stores.
    pub store_id: Option<String>,
    /// Units on hand when the recommendation was made.
    pub current_inventory: u32,
    /// Inventory level at which a new order should be triggered.
    pub reorder_point: u32,
    /// Units to order now; zero when no reorder is needed.
    pub reorder_quantity: u32,
    /// Buffer stock absorbing demand and lead-time variability.
    pub safety_stock: u32,
    /// P90 demand expected during the lead time.
    pub demand_during_lead_time: u32,
    /// Lead time the calculation assumed, in days.
    pub lead_time_days: u32,
    /// Service level the calculation targeted.
    pub service_level: f64,
    /// Cost of the recommended order.
    pub total_cost: f64,
    /// Triage classification.
    pub urgency: Urgency,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
    /// When the recommendation was generated.
    pub recommended_at: DateTime<Utc>,
}
