//! Integration tests for the reorder decision stack.
//!
//! The worked policy scenarios: flat demand below and above the reorder
//! point, case-pack rounding, and the budget clamp.

use replenish_facade::prelude::*;

fn snapshot(inventory: u32, unit_cost: f64) -> InventorySnapshot {
    InventorySnapshot::new("SKU-1", None, inventory, unit_cost)
}

fn no_lead_time_variance() -> ReorderConfig {
    ReorderConfig::default().lead_time_std_days(0.0)
}

#[test]
fn flat_demand_below_reorder_point() {
    // 10 units/day over a 7-day lead time with zero variance:
    // safety stock 0, reorder point ceil(10 + 0 + 10/7) = 12.
    let engine = ReorderPointEngine::new(no_lead_time_variance()).unwrap();
    let rec = engine.recommend(&snapshot(5, 1.0), &[10.0; 10], None).unwrap();

    assert_eq!(rec.safety_stock, 0);
    assert_eq!(rec.reorder_point, 12);
    assert_eq!(rec.reorder_quantity, 7);
    // 5 on hand is at most half the reorder point (6).
    assert_eq!(rec.urgency, Urgency::High);
}

#[test]
fn flat_demand_above_reorder_point() {
    let engine = ReorderPointEngine::new(no_lead_time_variance()).unwrap();
    let rec = engine.recommend(&snapshot(15, 1.0), &[10.0; 10], None).unwrap();

    assert_eq!(rec.reorder_point, 12);
    assert_eq!(rec.reorder_quantity, 0);
    assert_eq!(rec.urgency, Urgency::Low);
}

#[test]
fn case_pack_rounds_needed_quantity_up() {
    // needed = 7, packs of 6 -> 12 units.
    let config = no_lead_time_variance().case_pack_size(6);
    let engine = ReorderPointEngine::new(config).unwrap();
    let rec = engine.recommend(&snapshot(5, 1.0), &[10.0; 10], None).unwrap();

    assert_eq!(rec.reorder_quantity, 12);
    assert_eq!(rec.reorder_quantity % 6, 0);
}

#[test]
fn budget_cap_clamps_quantity_and_escalates() {
    // Computed order of 12 units at 10.0 each exceeds the 50.0 cap:
    // clamp to floor(50 / 10) = 5, recompute cost, force at least high.
    let config = no_lead_time_variance().case_pack_size(6).budget_cap(50.0);
    let engine = ReorderPointEngine::new(config).unwrap();
    let rec = engine.recommend(&snapshot(5, 10.0), &[10.0; 10], None).unwrap();

    assert_eq!(rec.reorder_quantity, 5);
    assert_eq!(rec.total_cost, 50.0);
    assert_eq!(rec.urgency, Urgency::High);
}

#[test]
fn budget_cap_never_exceeded() {
    let series: Vec<f64> = (0..14).map(|i| 9.0 + (i % 6) as f64).collect();
    for cap in [10.0, 35.0, 120.0, 900.0] {
        for unit_cost in [0.5, 3.0, 25.0] {
            let config = ReorderConfig::default().budget_cap(cap);
            let engine = ReorderPointEngine::new(config).unwrap();
            let rec = engine.recommend(&snapshot(2, unit_cost), &series, None).unwrap();
            assert!(
                rec.total_cost <= cap + 1e-9,
                "cost {} exceeds cap {cap} at unit cost {unit_cost}",
                rec.total_cost
            );
        }
    }
}

#[test]
fn p90_demand_never_below_p50() {
    let shapes: Vec<Vec<f64>> = vec![
        vec![10.0; 7],
        (0..10).map(|i| i as f64).collect(),
        vec![0.0; 7],
        vec![3.0, 30.0, 3.0, 30.0, 3.0, 30.0, 3.0],
    ];
    for series in shapes {
        let lt = ReorderPointEngine::lead_time_demand(&series, 7).unwrap();
        assert!(lt.p90_demand >= lt.p50_demand - 1e-9);
        assert!(lt.std_demand >= 0.0);
    }
}

#[test]
fn reasoning_mentions_the_numbers_that_drove_the_decision() {
    let engine = ReorderPointEngine::new(no_lead_time_variance()).unwrap();
    let rec = engine.recommend(&snapshot(5, 1.0), &[10.0; 10], None).unwrap();

    assert!(rec.reasoning.contains("P90 demand during 7-day lead time: 10.0"));
    assert!(rec.reasoning.contains("Safety stock: 0.0"));
    assert!(rec.reasoning.contains("Recommended order: 7 units"));
    assert!(rec.reasoning.contains("Order soon"));
}

#[test]
fn recommendation_carries_identity_and_policy() {
    let engine = ReorderPointEngine::with_defaults();
    let snapshot = InventorySnapshot::new("SKU-9", Some("store-2".to_string()), 4, 2.5);
    let rec = engine.recommend(&snapshot, &[6.0; 14], None).unwrap();

    assert_eq!(rec.product_id, "SKU-9");
    assert_eq!(rec.store_id.as_deref(), Some("store-2"));
    assert_eq!(rec.current_inventory, 4);
    assert_eq!(rec.lead_time_days, 7);
    assert_eq!(rec.service_level, 0.95);
}
