//! Per-key demand model registry and its operations.
//!
//! The engine owns one fitted model per (product, store) key. Writers
//! (train/update) serialize per key and publish a freshly built entry by
//! swapping an `Arc` into the registry; readers clone the `Arc` under a
//! short read lock and work against that immutable snapshot, so forecasts
//! never block each other and never observe a half-built model.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::{Days, NaiveDate, Utc};
use tracing::{debug, info};

use demand_api::{EngineConfig, QuantileMethod};
use demand_spi::{
    normalize_observations, AccuracyMetrics, DateRange, DemandError, DemandModel, ForecastPoint,
    ModelKey, QuantileEstimator, QuantileForecast, Result, SalesObservation, TrainingResult,
    UpdateResult,
};

use crate::quantile::{BootstrapEstimator, NormalApproximationEstimator};
use crate::smoothing::fit_demand_model;
use crate::validation::rolling_origin_metrics;

/// A published fitted model with its history and validation metrics.
struct ModelEntry {
    model: Box<dyn DemandModel>,
    history: Vec<SalesObservation>,
    metrics: AccuracyMetrics,
    version: String,
}

/// Demand forecast engine: trains, queries, updates, and removes per-key
/// demand models.
pub struct ForecastEngine {
    config: EngineConfig,
    registry: RwLock<HashMap<ModelKey, Arc<ModelEntry>>>,
    writer_locks: Mutex<HashMap<ModelKey, Arc<Mutex<()>>>>,
}

impl ForecastEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            registry: RwLock::new(HashMap::new()),
            writer_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Create an engine with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(EngineConfig::default())
    }

    /// Engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether a trained model exists for the key.
    pub fn is_trained(&self, key: &ModelKey) -> bool {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Train a model on a sales history and publish it under `key`.
    ///
    /// Fails with [`DemandError::InsufficientData`] when the history covers
    /// fewer distinct dates than the configured minimum. An existing model
    /// under the same key is replaced.
    pub fn train(&self, history: &[SalesObservation], key: ModelKey) -> Result<TrainingResult> {
        let observations = normalize_observations(history);
        if observations.len() < self.config.min_training_days {
            return Err(DemandError::InsufficientData {
                required: self.config.min_training_days,
                actual: observations.len(),
            });
        }

        // One writer per key; fitting happens outside the registry lock.
        let writer = self.writer_lock(&key);
        let _guard = writer.lock().unwrap_or_else(PoisonError::into_inner);

        let entry = self.fit_entry(observations)?;
        let result = TrainingResult {
            key: key.clone(),
            training_samples: entry.history.len(),
            date_range: date_range(&entry.history),
            metrics: entry.metrics,
            model_version: entry.version.clone(),
            trained_at: Utc::now(),
        };

        self.publish(key.clone(), entry);
        info!(
            key = %key,
            samples = result.training_samples,
            mae = result.metrics.mae,
            "trained demand model"
        );
        Ok(result)
    }

    /// Produce a quantile forecast over the next `horizon_days`.
    ///
    /// Fails with [`DemandError::ModelNotFound`] when no model exists for
    /// the key.
    pub fn forecast(
        &self,
        key: &ModelKey,
        horizon_days: usize,
        include_components: bool,
    ) -> Result<QuantileForecast> {
        if horizon_days == 0 {
            return Err(DemandError::InvalidParameter {
                name: "horizon_days".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }

        let entry = self.entry(key)?;
        let point = entry.model.predict(horizon_days)?;

        let confidence = self.config.confidence_level;
        let bands = match self.config.quantile_method {
            QuantileMethod::NormalApproximation => {
                NormalApproximationEstimator::new().bands(&point, entry.model.residuals(), confidence)
            }
            QuantileMethod::Bootstrap { iterations } => {
                BootstrapEstimator::new(iterations, self.config.bootstrap_seed).bands(
                    &point,
                    entry.model.residuals(),
                    confidence,
                )
            }
        };
        let method = match self.config.quantile_method {
            QuantileMethod::NormalApproximation => "normal-approximation",
            QuantileMethod::Bootstrap { .. } => "bootstrap",
        };

        let components = if include_components {
            entry.model.components(horizon_days)
        } else {
            None
        };

        // History is non-empty: training requires min_training_days dates.
        let last_date = entry.history[entry.history.len() - 1].date;
        let points = (0..horizon_days)
            .map(|h| {
                let p50 = point[h].max(0.0);
                ForecastPoint {
                    date: forecast_date(last_date, h),
                    p50,
                    p05: bands.lower[h].max(0.0),
                    p95: bands.upper[h].max(0.0),
                    p90: bands.p90[h].max(p50),
                    trend: components.as_ref().map(|c| c.trend[h]),
                    seasonal: components.as_ref().map(|c| c.seasonal[h]),
                }
            })
            .collect();

        debug!(key = %key, horizon_days, method, "generated quantile forecast");
        Ok(QuantileForecast {
            key: key.clone(),
            points,
            horizon_days,
            confidence_level: confidence,
            model_version: entry.version.clone(),
            method: method.to_string(),
            generated_at: Utc::now(),
        })
    }

    /// Merge new observations into the stored history and refit.
    ///
    /// Later observations win on duplicate dates. The refit model replaces
    /// the previous entry wholesale; nothing is merged in place. Fails with
    /// [`DemandError::ModelNotFound`] when no prior model exists.
    pub fn update(
        &self,
        key: &ModelKey,
        new_observations: &[SalesObservation],
    ) -> Result<UpdateResult> {
        let writer = self.writer_lock(key);
        let _guard = writer.lock().unwrap_or_else(PoisonError::into_inner);

        let previous = self.entry(key)?;
        let merged_samples = normalize_observations(new_observations).len();

        // New observations appended after the stored history, so the
        // last-write-wins dedup keeps them on date collisions.
        let mut combined = previous.history.clone();
        combined.extend_from_slice(new_observations);
        let observations = normalize_observations(&combined);

        let entry = self.fit_entry(observations)?;
        let result = UpdateResult {
            key: key.clone(),
            merged_samples,
            total_samples: entry.history.len(),
            date_range: date_range(&entry.history),
            metrics: entry.metrics,
            model_version: entry.version.clone(),
            updated_at: Utc::now(),
        };

        self.publish(key.clone(), entry);
        info!(
            key = %key,
            merged = merged_samples,
            total = result.total_samples,
            "updated demand model"
        );
        Ok(result)
    }

    /// Cross-validated accuracy metrics for a trained model.
    pub fn performance(&self, key: &ModelKey) -> Result<AccuracyMetrics> {
        Ok(self.entry(key)?.metrics)
    }

    /// Remove the model for `key`. Returns whether one existed; removing a
    /// missing key is a no-op.
    pub fn delete(&self, key: &ModelKey) -> bool {
        let removed = self
            .registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
            .is_some();
        self.writer_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        if removed {
            info!(key = %key, "deleted demand model");
        }
        removed
    }

    fn entry(&self, key: &ModelKey) -> Result<Arc<ModelEntry>> {
        self.registry
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
            .ok_or_else(|| DemandError::ModelNotFound { key: key.clone() })
    }

    fn writer_lock(&self, key: &ModelKey) -> Arc<Mutex<()>> {
        let mut locks = self
            .writer_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks.entry(key.clone()).or_default().clone()
    }

    fn publish(&self, key: ModelKey, entry: ModelEntry) {
        self.registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, Arc::new(entry));
    }

    /// Fit a model and validate it on a normalized observation history.
    fn fit_entry(&self, observations: Vec<SalesObservation>) -> Result<ModelEntry> {
        let series = daily_series(&observations);
        let period = self.config.seasonal_period_days;

        let model = fit_demand_model(&series, period)?;
        let metrics = rolling_origin_metrics(
            &series,
            period,
            &self.config.cross_validation,
            self.config.confidence_level,
        )?;
        let version = format!("{}-{}", env!("CARGO_PKG_VERSION"), model.name());

        Ok(ModelEntry {
            model,
            history: observations,
            metrics,
            version,
        })
    }
}

/// Expand sorted observations into a contiguous daily series from the first
/// to the last date, with zero demand on days without an observation.
fn daily_series(observations: &[SalesObservation]) -> Vec<f64> {
    let (first, last) = match (observations.first(), observations.last()) {
        (Some(first), Some(last)) => (first.date, last.date),
        _ => return Vec::new(),
    };

    let len = (last - first).num_days() as usize + 1;
    let mut series = vec![0.0; len];
    for obs in observations {
        let idx = (obs.date - first).num_days() as usize;
        series[idx] = obs.quantity;
    }
    series
}

/// Forecast date for horizon offset `h` (0-based): the day after the last
/// observation, plus `h`.
fn forecast_date(last_observed: NaiveDate, h: usize) -> NaiveDate {
    last_observed
        .checked_add_days(Days::new(h as u64 + 1))
        .unwrap_or(last_observed)
}

/// Inclusive date range of a non-empty sorted history.
fn date_range(observations: &[SalesObservation]) -> DateRange {
    DateRange {
        start: observations[0].date,
        end: observations[observations.len() - 1].date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(offset: u64) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    }

    fn weekly_history(days: u64) -> Vec<SalesObservation> {
        (0..days)
            .map(|i| {
                let weekday = i % 7;
                let base = if weekday >= 5 { 22.0 } else { 10.0 };
                SalesObservation::new(day(i), base + i as f64 * 0.03)
            })
            .collect()
    }

    #[test]
    fn test_train_requires_min_history() {
        let engine = ForecastEngine::with_defaults();
        let result = engine.train(&weekly_history(10), ModelKey::for_product("SKU-1"));
        assert!(matches!(
            result,
            Err(DemandError::InsufficientData {
                required: 30,
                actual: 10
            })
        ));
    }

    #[test]
    fn test_train_then_forecast() {
        let engine = ForecastEngine::with_defaults();
        let key = ModelKey::for_product("SKU-1");
        let result = engine.train(&weekly_history(60), key.clone()).unwrap();
        assert_eq!(result.training_samples, 60);
        assert_eq!(result.model_version, format!("{}-holt-winters", env!("CARGO_PKG_VERSION")));

        let forecast = engine.forecast(&key, 14, false).unwrap();
        assert_eq!(forecast.points.len(), 14);
        assert_eq!(forecast.points[0].date, day(60));
        for point in &forecast.points {
            assert!(point.p50 >= 0.0);
            assert!(point.p90 >= point.p50);
            assert!(point.trend.is_none());
        }
    }

    #[test]
    fn test_forecast_with_components() {
        let engine = ForecastEngine::with_defaults();
        let key = ModelKey::for_product("SKU-1");
        engine.train(&weekly_history(60), key.clone()).unwrap();

        let forecast = engine.forecast(&key, 7, true).unwrap();
        for point in &forecast.points {
            assert!(point.trend.is_some());
            assert!(point.seasonal.is_some());
        }
    }

    #[test]
    fn test_forecast_unknown_key() {
        let engine = ForecastEngine::with_defaults();
        let result = engine.forecast(&ModelKey::for_product("nope"), 7, false);
        assert!(matches!(result, Err(DemandError::ModelNotFound { .. })));
    }

    #[test]
    fn test_forecast_zero_horizon() {
        let engine = ForecastEngine::with_defaults();
        let key = ModelKey::for_product("SKU-1");
        engine.train(&weekly_history(40), key.clone()).unwrap();
        assert!(matches!(
            engine.forecast(&key, 0, false),
            Err(DemandError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_update_merges_and_replaces() {
        let engine = ForecastEngine::with_defaults();
        let key = ModelKey::for_product("SKU-1");
        engine.train(&weekly_history(40), key.clone()).unwrap();

        // Overwrite the last day and extend by a week.
        let mut new_obs = vec![SalesObservation::new(day(39), 99.0)];
        new_obs.extend((40..47).map(|i| SalesObservation::new(day(i), 12.0)));

        let result = engine.update(&key, &new_obs).unwrap();
        assert_eq!(result.merged_samples, 8);
        assert_eq!(result.total_samples, 47);
        assert_eq!(result.date_range.end, day(46));

        // The overwritten day shifts the forecast start, not the count.
        let forecast = engine.forecast(&key, 7, false).unwrap();
        assert_eq!(forecast.points[0].date, day(47));
    }

    #[test]
    fn test_update_unknown_key() {
        let engine = ForecastEngine::with_defaults();
        let result = engine.update(&ModelKey::for_product("nope"), &weekly_history(5));
        assert!(matches!(result, Err(DemandError::ModelNotFound { .. })));
    }

    #[test]
    fn test_performance_and_delete() {
        let engine = ForecastEngine::with_defaults();
        let key = ModelKey::for_product("SKU-1");
        let trained = engine.train(&weekly_history(60), key.clone()).unwrap();

        let metrics = engine.performance(&key).unwrap();
        assert_eq!(metrics, trained.metrics);

        assert!(engine.delete(&key));
        assert!(!engine.delete(&key));
        assert!(matches!(
            engine.performance(&key),
            Err(DemandError::ModelNotFound { .. })
        ));
    }

    #[test]
    fn test_per_store_keys_are_independent() {
        let engine = ForecastEngine::with_defaults();
        let combined = ModelKey::for_product("SKU-1");
        let scoped = ModelKey::for_store("SKU-1", "north");

        engine.train(&weekly_history(40), combined.clone()).unwrap();
        assert!(engine.is_trained(&combined));
        assert!(!engine.is_trained(&scoped));
    }

    #[test]
    fn test_daily_series_fills_gaps_with_zero() {
        let observations = vec![
            SalesObservation::new(day(0), 5.0),
            SalesObservation::new(day(3), 7.0),
        ];
        assert_eq!(daily_series(&observations), vec![5.0, 0.0, 0.0, 7.0]);
    }

    #[test]
    fn test_bootstrap_forecasts_reproducible() {
        let config = EngineConfig::default()
            .quantile_method(QuantileMethod::Bootstrap { iterations: 50 })
            .bootstrap_seed(7);
        let engine_a = ForecastEngine::new(config.clone());
        let engine_b = ForecastEngine::new(config);
        let key = ModelKey::for_product("SKU-1");

        engine_a.train(&weekly_history(60), key.clone()).unwrap();
        engine_b.train(&weekly_history(60), key.clone()).unwrap();

        let fa = engine_a.forecast(&key, 7, false).unwrap();
        let fb = engine_b.forecast(&key, 7, false).unwrap();
        for (a, b) in fa.points.iter().zip(fb.points.iter()) {
            assert_eq!(a.p05, b.p05);
            assert_eq!(a.p95, b.p95);
            assert_eq!(a.p90, b.p90);
        }
        assert_eq!(fa.method, "bootstrap");
    }

    #[test]
    fn test_concurrent_reads_and_writes() {
        use std::thread;

        let engine = Arc::new(ForecastEngine::with_defaults());
        let key = ModelKey::for_product("SKU-1");
        engine.train(&weekly_history(60), key.clone()).unwrap();

        let mut handles = Vec::new();
        for worker in 0..4 {
            let engine = Arc::clone(&engine);
            let key = key.clone();
            handles.push(thread::spawn(move || {
                for i in 0..10u64 {
                    if worker == 0 && i % 3 == 0 {
                        let obs =
                            vec![SalesObservation::new(day(60 + i), 11.0)];
                        engine.update(&key, &obs).unwrap();
                    } else {
                        let forecast = engine.forecast(&key, 7, false).unwrap();
                        assert_eq!(forecast.points.len(), 7);
                    }
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
    }
}
