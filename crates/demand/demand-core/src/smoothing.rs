//! Exponential-smoothing demand models.
//!
//! Daily retail demand carries a weekly cycle, so the default model is a
//! triple (Holt-Winters) smoother with additive seasonality. Histories too
//! short for two full seasonal cycles fall back to a double (Holt) smoother.
//! Both track one-step-ahead in-sample residuals so quantile estimators can
//! derive confidence bands, and both clamp forecasts at zero: negative
//! demand is not a thing.

use serde::{Deserialize, Serialize};

use demand_spi::{DemandError, DemandModel, ModelComponents};

// ============================================================================
// Seasonal smoothing (Holt-Winters, additive)
// ============================================================================

/// Triple exponential smoothing with additive seasonality.
///
/// Formulae:
/// `L_t = α(Y_t − S_{t−p}) + (1 − α)(L_{t−1} + T_{t−1})`,
/// `T_t = β(L_t − L_{t−1}) + (1 − β)T_{t−1}`,
/// `S_t = γ(Y_t − L_t) + (1 − γ)S_{t−p}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonalSmoothing {
    /// Level smoothing parameter.
    alpha: f64,
    /// Trend smoothing parameter.
    beta: f64,
    /// Seasonal smoothing parameter.
    gamma: f64,
    /// Seasonal cycle length.
    period: usize,
    /// Current level.
    level: f64,
    /// Current trend.
    trend: f64,
    /// Seasonal components.
    seasonal: Vec<f64>,
    /// One-step-ahead in-sample residuals from the last fit.
    residuals: Vec<f64>,
    /// Whether the model has been fitted.
    fitted: bool,
}

impl SeasonalSmoothing {
    /// Create a new seasonal smoother.
    ///
    /// # Arguments
    ///
    /// * `alpha` - Level smoothing (0 < alpha < 1)
    /// * `beta` - Trend smoothing (0 < beta < 1)
    /// * `gamma` - Seasonal smoothing (0 < gamma < 1)
    /// * `period` - Observations per seasonal cycle (7 for weekly)
    pub fn new(alpha: f64, beta: f64, gamma: f64, period: usize) -> Result<Self, DemandError> {
        for (name, value) in [("alpha", alpha), ("beta", beta), ("gamma", gamma)] {
            if !(0.0 < value && value < 1.0) {
                return Err(DemandError::InvalidParameter {
                    name: name.to_string(),
                    reason: "must be between 0 and 1 (exclusive)".to_string(),
                });
            }
        }
        if period < 2 {
            return Err(DemandError::InvalidParameter {
                name: "period".to_string(),
                reason: "must be at least 2".to_string(),
            });
        }

        Ok(Self {
            alpha,
            beta,
            gamma,
            period,
            level: 0.0,
            trend: 0.0,
            seasonal: vec![0.0; period],
            residuals: Vec::new(),
            fitted: false,
        })
    }

    /// Weekly smoother with the default parameter set.
    pub fn weekly() -> Self {
        Self {
            alpha: 0.3,
            beta: 0.1,
            gamma: 0.2,
            period: 7,
            level: 0.0,
            trend: 0.0,
            seasonal: vec![0.0; 7],
            residuals: Vec::new(),
            fitted: false,
        }
    }

    /// Seasonal cycle length.
    pub fn period(&self) -> usize {
        self.period
    }

    fn initialize(&mut self, data: &[f64]) {
        self.level = data[..self.period].iter().sum::<f64>() / self.period as f64;

        if data.len() >= 2 * self.period {
            let first: f64 = data[..self.period].iter().sum::<f64>() / self.period as f64;
            let second: f64 =
                data[self.period..2 * self.period].iter().sum::<f64>() / self.period as f64;
            self.trend = (second - first) / self.period as f64;
        } else {
            self.trend = 0.0;
        }

        for i in 0..self.period {
            self.seasonal[i] = data[i] - self.level;
        }
    }
}

impl DemandModel for SeasonalSmoothing {
    fn fit(&mut self, series: &[f64]) -> Result<(), DemandError> {
        let min_required = self.period * 2;
        if series.len() < min_required {
            return Err(DemandError::InsufficientData {
                required: min_required,
                actual: series.len(),
            });
        }

        self.initialize(series);
        self.residuals = Vec::with_capacity(series.len() - self.period);

        for (i, &value) in series.iter().enumerate().skip(self.period) {
            let season_idx = i % self.period;
            let prev_seasonal = self.seasonal[season_idx];

            // One-step-ahead prediction from the state before this update.
            let predicted = self.level + self.trend + prev_seasonal;
            self.residuals.push(value - predicted);

            let prev_level = self.level;
            self.level =
                self.alpha * (value - prev_seasonal) + (1.0 - self.alpha) * (self.level + self.trend);
            self.trend = self.beta * (self.level - prev_level) + (1.0 - self.beta) * self.trend;
            self.seasonal[season_idx] =
                self.gamma * (value - self.level) + (1.0 - self.gamma) * prev_seasonal;
        }

        self.fitted = true;
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>, DemandError> {
        if !self.fitted {
            return Err(DemandError::NotFitted);
        }

        let mut forecasts = Vec::with_capacity(steps);
        for h in 1..=steps {
            let season_idx = (h - 1) % self.period;
            let forecast = self.level + h as f64 * self.trend + self.seasonal[season_idx];
            forecasts.push(forecast.max(0.0));
        }
        Ok(forecasts)
    }

    fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    fn components(&self, steps: usize) -> Option<ModelComponents> {
        if !self.fitted {
            return None;
        }
        let trend = (1..=steps).map(|h| self.level + h as f64 * self.trend).collect();
        let seasonal = (1..=steps).map(|h| self.seasonal[(h - 1) % self.period]).collect();
        Some(ModelComponents { trend, seasonal })
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }

    fn name(&self) -> &'static str {
        "holt-winters"
    }
}

// ============================================================================
// Trend smoothing (Holt)
// ============================================================================

/// Double exponential smoothing for histories too short to resolve a
/// seasonal cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendSmoothing {
    /// Level smoothing parameter.
    alpha: f64,
    /// Trend smoothing parameter.
    beta: f64,
    /// Current level.
    level: f64,
    /// Current trend.
    trend: f64,
    /// One-step-ahead in-sample residuals from the last fit.
    residuals: Vec<f64>,
    /// Whether the model has been fitted.
    fitted: bool,
}

impl TrendSmoothing {
    /// Create a new trend smoother.
    pub fn new(alpha: f64, beta: f64) -> Result<Self, DemandError> {
        for (name, value) in [("alpha", alpha), ("beta", beta)] {
            if !(0.0 < value && value < 1.0) {
                return Err(DemandError::InvalidParameter {
                    name: name.to_string(),
                    reason: "must be between 0 and 1 (exclusive)".to_string(),
                });
            }
        }
        Ok(Self {
            alpha,
            beta,
            level: 0.0,
            trend: 0.0,
            residuals: Vec::new(),
            fitted: false,
        })
    }
}

impl DemandModel for TrendSmoothing {
    fn fit(&mut self, series: &[f64]) -> Result<(), DemandError> {
        if series.len() < 3 {
            return Err(DemandError::InsufficientData {
                required: 3,
                actual: series.len(),
            });
        }

        self.level = series[0];
        self.trend = series[1] - series[0];
        self.residuals = Vec::with_capacity(series.len() - 1);

        for &value in &series[1..] {
            let predicted = self.level + self.trend;
            self.residuals.push(value - predicted);

            let prev_level = self.level;
            self.level = self.alpha * value + (1.0 - self.alpha) * (self.level + self.trend);
            self.trend = self.beta * (self.level - prev_level) + (1.0 - self.beta) * self.trend;
        }

        self.fitted = true;
        Ok(())
    }

    fn predict(&self, steps: usize) -> Result<Vec<f64>, DemandError> {
        if !self.fitted {
            return Err(DemandError::NotFitted);
        }
        Ok((1..=steps)
            .map(|h| (self.level + h as f64 * self.trend).max(0.0))
            .collect())
    }

    fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    fn components(&self, steps: usize) -> Option<ModelComponents> {
        if !self.fitted {
            return None;
        }
        let trend = (1..=steps).map(|h| self.level + h as f64 * self.trend).collect();
        Some(ModelComponents {
            trend,
            seasonal: vec![0.0; steps],
        })
    }

    fn is_fitted(&self) -> bool {
        self.fitted
    }

    fn name(&self) -> &'static str {
        "holt"
    }
}

// ============================================================================
// Model selection
// ============================================================================

/// Fit the best-suited smoother for a daily series: seasonal when at least
/// two full cycles are available, trend-only otherwise.
pub fn fit_demand_model(
    series: &[f64],
    period: usize,
) -> Result<Box<dyn DemandModel>, DemandError> {
    if series.len() >= 2 * period {
        let mut model = SeasonalSmoothing::new(0.3, 0.1, 0.2, period)?;
        model.fit(series)?;
        Ok(Box::new(model))
    } else {
        let mut model = TrendSmoothing::new(0.3, 0.1)?;
        model.fit(series)?;
        Ok(Box::new(model))
    }
}
