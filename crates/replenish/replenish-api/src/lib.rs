//! Replenishment Consumer API
//!
//! Reorder policy configuration.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use replenish_spi::{
    BatchReport, FailedItem, InventorySnapshot, LeadTimeDemand, ReorderRecommendation,
    ReplenishError, Result, SkippedItem, Urgency,
};

/// Reorder policy for one product or a whole assortment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderConfig {
    /// Target probability of not stocking out during the lead time.
    pub service_level: f64,
    /// Expected days between placing and receiving an order.
    pub lead_time_days: u32,
    /// Standard deviation of the lead time, in days.
    pub lead_time_std_days: f64,
    /// Smallest order the supplier accepts.
    pub min_order_quantity: u32,
    /// Orders must be multiples of this many units.
    pub case_pack_size: u32,
    /// Optional ceiling on the cost of a single order.
    pub budget_cap: Option<f64>,
    /// Days between inventory reviews.
    pub review_period_days: u32,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            service_level: 0.95,
            lead_time_days: 7,
            lead_time_std_days: 2.0,
            min_order_quantity: 1,
            case_pack_size: 1,
            budget_cap: None,
            review_period_days: 1,
        }
    }
}

impl ReorderConfig {
    /// Set the service level.
    pub fn service_level(mut self, level: f64) -> Self {
        self.service_level = level;
        self
    }

    /// Set the expected lead time in days.
    pub fn lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }

    /// Set the lead time standard deviation in days.
    pub fn lead_time_std_days(mut self, days: f64) -> Self {
        self.lead_time_std_days = days;
        self
    }

    /// Set the minimum order quantity.
    pub fn min_order_quantity(mut self, quantity: u32) -> Self {
        self.min_order_quantity = quantity;
        self
    }

    /// Set the case pack size.
    pub fn case_pack_size(mut self, size: u32) -> Self {
        self.case_pack_size = size;
        self
    }

    /// Set the budget cap.
    pub fn budget_cap(mut self, cap: f64) -> Self {
        self.budget_cap = Some(cap);
        self
    }

    /// Set the review period in days.
    pub fn review_period_days(mut self, days: u32) -> Self {
        self.review_period_days = days;
        self
    }

    /// Validate all policy values, failing with the first out-of-range one.
    pub fn validate(&self) -> Result<()> {
        if !(self.service_level > 0.0 && self.service_level < 1.0) {
            return Err(invalid(
                "service_level",
                "must be between 0 and 1 (exclusive)",
            ));
        }
        if self.lead_time_days < 1 {
            return Err(invalid("lead_time_days", "must be at least 1"));
        }
        if !(self.lead_time_std_days >= 0.0 && self.lead_time_std_days.is_finite()) {
            return Err(invalid("lead_time_std_days", "must be finite and >= 0"));
        }
        if self.min_order_quantity < 1 {
            return Err(invalid("min_order_quantity", "must be at least 1"));
        }
        if self.case_pack_size < 1 {
            return Err(invalid("case_pack_size", "must be at least 1"));
        }
        if let Some(cap) = self.budget_cap {
            if !(cap > 0.0 && cap.is_finite()) {
                return Err(invalid("budget_cap", "must be finite and > 0 when set"));
            }
        }
        if self.review_period_days < 1 {
            return Err(invalid("review_period_days", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(name: &str, reason: &str) -> ReplenishError {
    ReplenishError::InvalidConfig {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}
