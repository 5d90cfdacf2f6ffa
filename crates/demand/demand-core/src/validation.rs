//! Rolling-origin cross-validation.
//!
//! Expanding-window evaluation of a demand series: fit on an initial
//! window, score the next horizon, grow the window, repeat. Histories too
//! short for the configured windows fall back to a single 70/30 temporal
//! split so that a minimum-length history still produces metrics.

use std::ops::Range;

use demand_api::CrossValidationConfig;
use demand_spi::{AccuracyMetrics, DemandError};

use crate::metrics;
use crate::quantile::normal_quantile;
use crate::smoothing::fit_demand_model;

/// Expanding-window fold boundaries over a series of `data_len` points.
fn expanding_window_split(
    data_len: usize,
    initial: usize,
    horizon: usize,
    step: usize,
) -> Vec<(Range<usize>, Range<usize>)> {
    let mut splits = Vec::new();
    let mut train_end = initial;

    while train_end + horizon <= data_len {
        splits.push((0..train_end, train_end..train_end + horizon));
        train_end += step;
    }

    splits
}

/// Cross-validate a daily series and pool fold errors into one metric set.
///
/// `coverage` is measured against the two-sided interval at
/// `confidence_level`, derived from each fold's fit residuals.
pub fn rolling_origin_metrics(
    series: &[f64],
    period: usize,
    cv: &CrossValidationConfig,
    confidence_level: f64,
) -> Result<AccuracyMetrics, DemandError> {
    let n = series.len();

    let mut splits = expanding_window_split(
        n,
        cv.initial_window_days,
        cv.horizon_days,
        cv.period_days.max(1),
    );
    if splits.is_empty() {
        // Short history: single temporal split, 70% train / 30% test.
        let train_end = ((n * 7) / 10).max(2).min(n.saturating_sub(1));
        if train_end < 2 || train_end >= n {
            return Err(DemandError::InsufficientData {
                required: 3,
                actual: n,
            });
        }
        splits.push((0..train_end, train_end..n));
    }

    let mut actuals: Vec<f64> = Vec::new();
    let mut predictions: Vec<f64> = Vec::new();
    let mut lower: Vec<f64> = Vec::new();
    let mut upper: Vec<f64> = Vec::new();
    let z = normal_quantile((1.0 + confidence_level) / 2.0);

    for (train_range, test_range) in splits {
        let train = &series[train_range];
        let test = &series[test_range];

        // A fold whose window is still too short for the model is skipped;
        // remaining folds carry the evaluation.
        let model = match fit_demand_model(train, period) {
            Ok(model) => model,
            Err(_) => continue,
        };
        let forecast = model.predict(test.len())?;

        let residuals = model.residuals();
        let std_dev = if residuals.is_empty() {
            0.0
        } else {
            let mean = residuals.iter().sum::<f64>() / residuals.len() as f64;
            (residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / residuals.len() as f64)
                .sqrt()
        };

        for (h, (&a, &p)) in test.iter().zip(forecast.iter()).enumerate() {
            let se = std_dev * ((h + 1) as f64).sqrt();
            actuals.push(a);
            predictions.push(p);
            lower.push(p - z * se);
            upper.push(p + z * se);
        }
    }

    if actuals.is_empty() {
        return Err(DemandError::NumericalError(
            "cross-validation produced no evaluable folds".to_string(),
        ));
    }

    Ok(AccuracyMetrics {
        mae: metrics::mae(&actuals, &predictions),
        mape: metrics::mape(&actuals, &predictions),
        rmse: metrics::rmse(&actuals, &predictions),
        mdape: metrics::mdape(&actuals, &predictions),
        smape: metrics::smape(&actuals, &predictions),
        coverage: metrics::coverage(&actuals, &lower, &upper),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_series() -> Vec<f64> {
        (0..180)
            .map(|i| {
                let weekday = i % 7;
                let base = if weekday >= 5 { 24.0 } else { 12.0 };
                base + i as f64 * 0.02
            })
            .collect()
    }

    #[test]
    fn test_expanding_window_split() {
        let splits = expanding_window_split(180, 90, 30, 30);
        assert_eq!(splits.len(), 3);
        assert_eq!(splits[0], (0..90, 90..120));
        assert_eq!(splits[2], (0..150, 150..180));
    }

    #[test]
    fn test_expanding_window_too_short() {
        assert!(expanding_window_split(100, 90, 30, 30).is_empty());
    }

    #[test]
    fn test_metrics_on_long_series() {
        let series = long_series();
        let result =
            rolling_origin_metrics(&series, 7, &CrossValidationConfig::default(), 0.95).unwrap();
        assert!(result.mae.is_finite());
        assert!(result.rmse >= result.mae);
        assert!((0.0..=1.0).contains(&result.coverage));
    }

    #[test]
    fn test_short_history_falls_back_to_single_split() {
        // 30 days: below the 90+30 day requirement of the default windows.
        let series: Vec<f64> = (0..30).map(|i| 10.0 + (i % 7) as f64).collect();
        let result =
            rolling_origin_metrics(&series, 7, &CrossValidationConfig::default(), 0.95).unwrap();
        assert!(result.mae.is_finite());
    }

    #[test]
    fn test_constant_series_perfect_scores() {
        let series = vec![10.0; 150];
        let result =
            rolling_origin_metrics(&series, 7, &CrossValidationConfig::default(), 0.95).unwrap();
        assert!(result.mae.abs() < 1e-9);
        assert!((result.coverage - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_tiny_series_errors() {
        let series = vec![1.0, 2.0];
        let result = rolling_origin_metrics(&series, 7, &CrossValidationConfig::default(), 0.95);
        assert!(result.is_err());
    }
}
