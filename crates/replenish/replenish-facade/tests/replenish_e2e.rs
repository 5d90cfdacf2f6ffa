//! End-to-end tests: sales history through the forecast engine into reorder
//! recommendations and batch reports.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use demand_facade::prelude::{EngineConfig, ForecastEngine, QuantileMethod, SalesObservation};
use replenish_facade::prelude::*;

fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .checked_add_days(Days::new(offset))
        .unwrap()
}

/// History with a weekly cycle scaled per product.
fn history(scale: f64, days: u64) -> Vec<SalesObservation> {
    (0..days)
        .map(|i| {
            let weekday = i % 7;
            let base = if weekday >= 5 { 18.0 } else { 9.0 };
            SalesObservation::new(day(i), base * scale)
        })
        .collect()
}

#[test]
fn e2e_forecast_to_recommendation() {
    let forecast_engine = ForecastEngine::with_defaults();
    let key = ModelKey::for_store("SKU-1", "store-1");
    forecast_engine.train(&history(1.0, 90), key.clone()).unwrap();

    let forecast = forecast_engine.forecast(&key, 14, false).unwrap();
    let reorder_engine = ReorderPointEngine::with_defaults();
    let snapshot = InventorySnapshot::new("SKU-1", Some("store-1".to_string()), 10, 3.0);

    let rec = reorder_engine
        .recommend(&snapshot, &forecast.p90_series(), None)
        .unwrap();

    // Roughly 11 units/day of P90 demand over 7 days plus buffers: the
    // reorder point far exceeds 10 on hand.
    assert!(rec.reorder_point > 10);
    assert!(rec.reorder_quantity > 0);
    assert!(rec.total_cost > 0.0);
    assert!(!rec.reasoning.is_empty());
}

#[test]
fn e2e_batch_mixed_outcomes_end_to_end() {
    let forecast_engine = ForecastEngine::with_defaults();

    // Train two of three products; the third is skipped downstream.
    for (product, scale) in [("SKU-busy", 2.0), ("SKU-slow", 0.5)] {
        forecast_engine
            .train(&history(scale, 90), ModelKey::for_product(product))
            .unwrap();
    }

    let mut forecasts_by_key = HashMap::new();
    for product in ["SKU-busy", "SKU-slow"] {
        let key = ModelKey::for_product(product);
        let forecast = forecast_engine.forecast(&key, 14, false).unwrap();
        forecasts_by_key.insert(key, forecast.p90_series());
    }
    // A short series that will fail the 7-day lead time.
    forecasts_by_key.insert(ModelKey::for_product("SKU-short"), vec![4.0; 3]);

    let snapshots = vec![
        InventorySnapshot::new("SKU-busy", None, 0, 5.0),
        InventorySnapshot::new("SKU-slow", None, 500, 5.0),
        InventorySnapshot::new("SKU-short", None, 3, 5.0),
        InventorySnapshot::new("SKU-unknown", None, 3, 5.0),
    ];

    let scheduler = BatchScheduler::with_defaults();
    let report = scheduler.generate(&snapshots, &forecasts_by_key, &HashMap::new());

    assert_eq!(report.total_items(), 4);
    assert_eq!(report.recommendations.len(), 2);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.failed.len(), 1);

    // Empty shelf first, overstocked item last.
    assert_eq!(report.recommendations[0].product_id, "SKU-busy");
    assert_eq!(report.recommendations[0].urgency, Urgency::Critical);
    assert_eq!(report.recommendations[1].product_id, "SKU-slow");
    assert_eq!(report.recommendations[1].urgency, Urgency::Low);

    assert_eq!(report.skipped[0].key, ModelKey::for_product("SKU-unknown"));
    assert!(matches!(
        report.failed[0].error,
        ReplenishError::InsufficientForecastHorizon { .. }
    ));

    // Only the empty shelf is actionable.
    let actionable: Vec<_> = report.actionable().collect();
    assert_eq!(actionable.len(), 1);
    assert_eq!(actionable[0].product_id, "SKU-busy");
}

#[test]
fn e2e_bootstrap_pipeline_is_deterministic() {
    let config = EngineConfig::default()
        .quantile_method(QuantileMethod::Bootstrap { iterations: 100 })
        .bootstrap_seed(2024);

    let run = || {
        let forecast_engine = ForecastEngine::new(config.clone());
        let key = ModelKey::for_product("SKU-1");
        forecast_engine.train(&history(1.0, 60), key.clone()).unwrap();
        let forecast = forecast_engine.forecast(&key, 10, false).unwrap();

        let reorder_engine = ReorderPointEngine::with_defaults();
        let snapshot = InventorySnapshot::new("SKU-1", None, 20, 1.5);
        reorder_engine
            .recommend(&snapshot, &forecast.p90_series(), None)
            .unwrap()
    };

    let first = run();
    let second = run();
    assert_eq!(first.reorder_point, second.reorder_point);
    assert_eq!(first.reorder_quantity, second.reorder_quantity);
    assert_eq!(first.safety_stock, second.safety_stock);
    assert_eq!(first.urgency, second.urgency);
}
