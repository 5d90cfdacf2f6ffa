//! Reorder point decision engine.
//!
//! A deterministic pipeline of pure steps, run once per recommendation:
//! demand during lead time → safety stock → reorder point → order quantity →
//! urgency, followed by an optional budget clamp and a reasoning summary.
//! The engine holds no mutable state and performs no I/O; a recommendation
//! is a function of its inputs.

use chrono::Utc;
use tracing::debug;

use replenish_api::ReorderConfig;
use replenish_spi::{
    InventorySnapshot, LeadTimeDemand, ReorderRecommendation, ReplenishError, Result, Urgency,
};

use crate::stats::{mean, normal_inv_cdf, percentile, sample_std};

/// Engine for reorder point calculations against P90 demand forecasts.
#[derive(Debug, Clone)]
pub struct ReorderPointEngine {
    config: ReorderConfig,
}

impl ReorderPointEngine {
    /// Create an engine with a validated default policy.
    pub fn new(config: ReorderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Create an engine with the default policy.
    pub fn with_defaults() -> Self {
        Self {
            config: ReorderConfig::default(),
        }
    }

    /// The engine's default policy.
    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    /// Demand statistics over the first `lead_time_days` of a forecast
    /// series.
    ///
    /// Fails with [`ReplenishError::InsufficientForecastHorizon`] when the
    /// series is shorter than the lead time.
    pub fn lead_time_demand(
        daily_forecasts: &[f64],
        lead_time_days: u32,
    ) -> Result<LeadTimeDemand> {
        let lead = lead_time_days as usize;
        if daily_forecasts.len() < lead {
            return Err(ReplenishError::InsufficientForecastHorizon {
                required: lead,
                actual: daily_forecasts.len(),
            });
        }

        let window = &daily_forecasts[..lead];
        Ok(LeadTimeDemand {
            p50_demand: mean(window),
            p90_demand: percentile(window, 0.90),
            std_demand: sample_std(window),
            total_demand: window.iter().sum(),
        })
    }

    /// Safety stock from demand and lead-time variability.
    ///
    /// `demand_during_lead_time` must be the freshly computed value from
    /// [`Self::lead_time_demand`] — it is threaded through explicitly rather
    /// than read from any stored field.
    ///
    /// `z * sqrt(L * σ_d² + d² * σ_L²)`, floored at zero. The z-score comes
    /// from the exact inverse normal CDF, so any service level resolves
    /// correctly.
    pub fn safety_stock(
        std_demand: f64,
        demand_during_lead_time: f64,
        lead_time_days: u32,
        lead_time_std_days: f64,
        service_level: f64,
    ) -> f64 {
        let z = normal_inv_cdf(service_level);
        let variance = lead_time_days as f64 * std_demand.powi(2)
            + demand_during_lead_time.powi(2) * lead_time_std_days.powi(2);
        (z * variance.sqrt()).max(0.0)
    }

    /// Reorder point: lead-time demand plus safety stock plus the demand
    /// expected over one review period, rounded up.
    pub fn reorder_point(
        demand_during_lead_time: f64,
        safety_stock: f64,
        lead_time_days: u32,
        review_period_days: u32,
    ) -> u32 {
        let review_demand =
            demand_during_lead_time * (review_period_days as f64 / lead_time_days as f64);
        let point = demand_during_lead_time + safety_stock + review_demand;
        point.max(0.0).ceil() as u32
    }

    /// Units to order once the reorder point is breached: the shortfall,
    /// rounded up to whole case packs, at least the minimum order quantity.
    /// Zero when inventory is at or above the reorder point.
    pub fn reorder_quantity(
        reorder_point: u32,
        current_inventory: u32,
        min_order_quantity: u32,
        case_pack_size: u32,
    ) -> u32 {
        if current_inventory >= reorder_point {
            return 0;
        }

        let needed = reorder_point - current_inventory;
        let quantity = if case_pack_size > 1 {
            needed.div_ceil(case_pack_size) * case_pack_size
        } else {
            needed
        };
        quantity.max(min_order_quantity)
    }

    /// Triage the reorder need.
    pub fn urgency(current_inventory: u32, reorder_point: u32, safety_stock: f64) -> Urgency {
        let inventory = current_inventory as f64;
        if inventory <= safety_stock {
            Urgency::Critical
        } else if inventory <= 0.5 * reorder_point as f64 {
            Urgency::High
        } else if inventory <= reorder_point as f64 {
            Urgency::Medium
        } else {
            Urgency::Low
        }
    }

    /// Produce a complete recommendation for one stock position.
    ///
    /// `config` overrides the engine default for this item; it is validated
    /// before use. `daily_forecasts` is the per-day demand series the caller
    /// selected (typically the P90 series of a quantile forecast).
    pub fn recommend(
        &self,
        snapshot: &InventorySnapshot,
        daily_forecasts: &[f64],
        config: Option<&ReorderConfig>,
    ) -> Result<ReorderRecommendation> {
        let config = match config {
            Some(override_config) => {
                override_config.validate()?;
                override_config
            }
            None => &self.config,
        };

        let lead_time = Self::lead_time_demand(daily_forecasts, config.lead_time_days)?;

        let safety_stock = Self::safety_stock(
            lead_time.std_demand,
            lead_time.p90_demand,
            config.lead_time_days,
            config.lead_time_std_days,
            config.service_level,
        );

        // The conservative P90 demand drives the reorder point.
        let reorder_point = Self::reorder_point(
            lead_time.p90_demand,
            safety_stock,
            config.lead_time_days,
            config.review_period_days,
        );

        let mut reorder_quantity = Self::reorder_quantity(
            reorder_point,
            snapshot.current_inventory,
            config.min_order_quantity,
            config.case_pack_size,
        );

        let mut urgency = Self::urgency(snapshot.current_inventory, reorder_point, safety_stock);
        let mut total_cost = reorder_quantity as f64 * snapshot.unit_cost;

        // Budget clamp: the cap is the harder constraint and may undercut
        // pack multiples and the minimum order quantity. Skipped for free
        // items.
        if let Some(cap) = config.budget_cap {
            if total_cost > cap && snapshot.unit_cost > 0.0 {
                reorder_quantity = (cap / snapshot.unit_cost).floor() as u32;
                total_cost = reorder_quantity as f64 * snapshot.unit_cost;
                urgency = urgency.at_least(Urgency::High);
            }
        }

        let reasoning = build_reasoning(
            snapshot.current_inventory,
            reorder_point,
            safety_stock,
            reorder_quantity,
            &lead_time,
            config.lead_time_days,
            urgency,
        );

        debug!(
            product_id = %snapshot.product_id,
            reorder_point,
            reorder_quantity,
            urgency = %urgency,
            "generated reorder recommendation"
        );

        Ok(ReorderRecommendation {
            product_id: snapshot.product_id.clone(),
            store_id: snapshot.store_id.clone(),
            current_inventory: snapshot.current_inventory,
            reorder_point,
            reorder_quantity,
            safety_stock: safety_stock.max(0.0) as u32,
            demand_during_lead_time: lead_time.p90_demand.max(0.0) as u32,
            lead_time_days: config.lead_time_days,
            service_level: config.service_level,
            total_cost,
            urgency,
            reasoning,
            recommended_at: Utc::now(),
        })
    }
}

/// Deterministic, human-readable explanation of a recommendation.
fn build_reasoning(
    current_inventory: u32,
    reorder_point: u32,
    safety_stock: f64,
    reorder_quantity: u32,
    lead_time: &LeadTimeDemand,
    lead_time_days: u32,
    urgency: Urgency,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    if current_inventory as f64 <= safety_stock {
        parts.push("Critical: inventory below safety stock level".to_string());
    } else if current_inventory < reorder_point {
        parts.push(format!(
            "Reorder needed: current inventory ({current_inventory}) below reorder point ({reorder_point})"
        ));
    }

    parts.push(format!(
        "P90 demand during {lead_time_days}-day lead time: {:.1}",
        lead_time.p90_demand
    ));
    parts.push(format!("Safety stock: {safety_stock:.1}"));

    if reorder_quantity > 0 {
        parts.push(format!("Recommended order: {reorder_quantity} units"));
        match urgency {
            Urgency::Critical => {
                parts.push("URGENT: order immediately to prevent stockout".to_string())
            }
            Urgency::High => parts.push("Order soon to maintain service levels".to_string()),
            Urgency::Medium => parts.push("Order with the next replenishment cycle".to_string()),
            Urgency::Low => {}
        }
    } else {
        parts.push("No reorder needed at this time".to_string());
    }

    parts.join(". ")
}
