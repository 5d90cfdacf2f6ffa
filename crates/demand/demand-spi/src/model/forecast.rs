//! Quantile forecast types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ModelKey;

/// Confidence bands derived from a point forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantileBands {
    /// Lower bound of the confidence interval, per horizon day.
    pub lower: Vec<f64>,
    /// Upper bound of the confidence interval, per horizon day.
    pub upper: Vec<f64>,
    /// 90th-percentile demand, per horizon day.
    pub p90: Vec<f64>,
    /// Confidence level of the bounds (e.g. 0.95 for 95%).
    pub confidence_level: f64,
}

/// One forecast day with quantiles and optional decomposition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// Forecast date.
    pub date: NaiveDate,
    /// Median (point) forecast.
    pub p50: f64,
    /// Lower bound of the confidence interval.
    pub p05: f64,
    /// Upper bound of the confidence interval.
    pub p95: f64,
    /// 90th-percentile demand, used for conservative reorder decisions.
    pub p90: f64,
    /// Trend component, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend: Option<f64>,
    /// Seasonal component, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasonal: Option<f64>,
}

/// Trend and seasonal components over a forecast horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelComponents {
    /// Trend component per horizon day.
    pub trend: Vec<f64>,
    /// Seasonal component per horizon day.
    pub seasonal: Vec<f64>,
}

/// A fixed-horizon quantile forecast for one (product, store) key.
///
/// Immutable once produced. All quantities are clamped non-negative and
/// `p90 >= p50` holds for every point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuantileForecast {
    /// Identity the forecast was produced for.
    pub key: ModelKey,
    /// One entry per day of the horizon, in date order.
    pub points: Vec<ForecastPoint>,
    /// Horizon length in days.
    pub horizon_days: usize,
    /// Confidence level of the p05/p95 bounds.
    pub confidence_level: f64,
    /// Version string of the producing model (e.g. "0.1.0-holt-winters").
    pub model_version: String,
    /// Quantile estimation method tag (e.g. "normal-approximation").
    pub method: String,
    /// When the forecast was generated.
    pub generated_at: DateTime<Utc>,
}

impl QuantileForecast {
    /// The P50 series as a plain vector.
    pub fn p50_series(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.p50).collect()
    }

    /// The P90 series as a plain vector, the usual input to reorder logic.
    pub fn p90_series(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.p90).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_forecast() -> QuantileForecast {
        let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let points = (0..3)
            .map(|i| ForecastPoint {
                date: start + chrono::Days::new(i),
                p50: 10.0 + i as f64,
                p05: 8.0,
                p95: 14.0,
                p90: 12.0 + i as f64,
                trend: None,
                seasonal: None,
            })
            .collect();
        QuantileForecast {
            key: ModelKey::for_product("SKU-1"),
            points,
            horizon_days: 3,
            confidence_level: 0.95,
            model_version: "0.1.0-holt-winters".to_string(),
            method: "normal-approximation".to_string(),
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_series_accessors() {
        let forecast = sample_forecast();
        assert_eq!(forecast.p50_series(), vec![10.0, 11.0, 12.0]);
        assert_eq!(forecast.p90_series(), vec![12.0, 13.0, 14.0]);
    }

    #[test]
    fn test_p90_at_least_p50() {
        let forecast = sample_forecast();
        for point in &forecast.points {
            assert!(point.p90 >= point.p50);
        }
    }

    #[test]
    fn test_serde_round_trip() {
        let forecast = sample_forecast();
        let json = serde_json::to_string(&forecast).unwrap();
        let back: QuantileForecast = serde_json::from_str(&json).unwrap();
        assert_eq!(back.points, forecast.points);
        assert_eq!(back.model_version, forecast.model_version);
    }
}
