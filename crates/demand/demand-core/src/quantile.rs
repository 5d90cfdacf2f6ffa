//! Confidence band estimators.
//!
//! Two strategies for deriving p05/p95 bounds and the P90 series from a
//! point forecast:
//!
//! - [`NormalApproximationEstimator`]: assumes normally distributed
//!   residuals. The residual standard error grows with the horizon as
//!   sqrt(h); P90 sits 1.28 standard deviations above the point forecast,
//!   with the standard deviation recovered from the interval width as
//!   `(upper - lower) / (2 * z)`. An approximation, not an empirical
//!   quantile — forecasts carry the method tag so consumers know.
//! - [`BootstrapEstimator`]: resamples fit residuals onto the point
//!   forecast to build an ensemble, then takes empirical percentiles per
//!   horizon day. Driven by a seeded RNG so intervals are reproducible.
//!
//! All bounds are clamped at zero; zero-variance residual sets degenerate
//! to zero-width intervals rather than erroring.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use demand_spi::{QuantileBands, QuantileEstimator};

/// Z-score for the 90th percentile of the standard normal distribution.
const Z_P90: f64 = 1.28;

// ============================================================================
// Normal approximation
// ============================================================================

/// Interval-derived band estimator under a normality assumption.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalApproximationEstimator;

impl NormalApproximationEstimator {
    pub fn new() -> Self {
        Self
    }
}

impl QuantileEstimator for NormalApproximationEstimator {
    fn bands(&self, forecast: &[f64], residuals: &[f64], confidence_level: f64) -> QuantileBands {
        let std_dev = residual_std(residuals);
        let z = two_sided_z(confidence_level);

        let mut lower = Vec::with_capacity(forecast.len());
        let mut upper = Vec::with_capacity(forecast.len());
        let mut p90 = Vec::with_capacity(forecast.len());

        for (h, &point) in forecast.iter().enumerate() {
            // Standard error widens for longer horizons.
            let se = std_dev * ((h + 1) as f64).sqrt();
            let lo = point - z * se;
            let hi = point + z * se;
            // Recover sigma from the interval width, then step 1.28 sigma up.
            let sigma = if z > 0.0 { (hi - lo) / (2.0 * z) } else { 0.0 };
            lower.push(lo.max(0.0));
            upper.push(hi.max(0.0));
            p90.push((point + Z_P90 * sigma).max(0.0));
        }

        QuantileBands {
            lower,
            upper,
            p90,
            confidence_level,
        }
    }

    fn method(&self) -> &'static str {
        "normal-approximation"
    }
}

// ============================================================================
// Bootstrap resampling
// ============================================================================

/// Bootstrap band estimator for models without native interval output.
#[derive(Debug, Clone, Copy)]
pub struct BootstrapEstimator {
    iterations: usize,
    seed: u64,
}

impl BootstrapEstimator {
    /// Create an estimator with the given iteration count and RNG seed.
    pub fn new(iterations: usize, seed: u64) -> Self {
        Self {
            iterations: iterations.max(1),
            seed,
        }
    }
}

impl QuantileEstimator for BootstrapEstimator {
    fn bands(&self, forecast: &[f64], residuals: &[f64], confidence_level: f64) -> QuantileBands {
        let n_steps = forecast.len();
        if n_steps == 0 || residuals.is_empty() {
            // Nothing to resample: zero-width bands around the forecast.
            let clamped: Vec<f64> = forecast.iter().map(|v| v.max(0.0)).collect();
            return QuantileBands {
                lower: clamped.clone(),
                upper: clamped.clone(),
                p90: clamped,
                confidence_level,
            };
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut ensemble: Vec<Vec<f64>> = Vec::with_capacity(self.iterations);
        for _ in 0..self.iterations {
            let sample: Vec<f64> = forecast
                .iter()
                .map(|&point| point + residuals[rng.gen_range(0..residuals.len())])
                .collect();
            ensemble.push(sample);
        }

        let alpha = 1.0 - confidence_level;
        let mut lower = Vec::with_capacity(n_steps);
        let mut upper = Vec::with_capacity(n_steps);
        let mut p90 = Vec::with_capacity(n_steps);

        for step in 0..n_steps {
            let mut values: Vec<f64> = ensemble.iter().map(|sample| sample[step]).collect();
            values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

            lower.push(empirical_percentile(&values, alpha / 2.0).max(0.0));
            upper.push(empirical_percentile(&values, 1.0 - alpha / 2.0).max(0.0));
            // Floor at the point forecast so p90 >= p50 survives skewed
            // residual sets.
            p90.push(empirical_percentile(&values, 0.90).max(forecast[step]).max(0.0));
        }

        QuantileBands {
            lower,
            upper,
            p90,
            confidence_level,
        }
    }

    fn method(&self) -> &'static str {
        "bootstrap"
    }
}

/// Empirical percentile of an already-sorted sample, with linear
/// interpolation between order statistics.
fn empirical_percentile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    if sorted.len() == 1 {
        return sorted[0];
    }
    let rank = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let low = rank.floor() as usize;
    let high = rank.ceil() as usize;
    if low == high {
        sorted[low]
    } else {
        let weight = rank - low as f64;
        sorted[low] * (1.0 - weight) + sorted[high] * weight
    }
}

/// Standard deviation of residuals around their mean.
fn residual_std(residuals: &[f64]) -> f64 {
    if residuals.is_empty() {
        return 0.0;
    }
    let n = residuals.len() as f64;
    let mean = residuals.iter().sum::<f64>() / n;
    let variance = residuals.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

/// Two-sided z-score for a confidence level: the standard normal quantile
/// at `(1 + level) / 2`, computed with Acklam's rational approximation.
fn two_sided_z(confidence_level: f64) -> f64 {
    let p = (1.0 + confidence_level.clamp(0.0, 1.0)) / 2.0;
    normal_quantile(p)
}

/// Inverse standard normal CDF (Acklam's rational approximation, absolute
/// error below 1.15e-9 over the open unit interval).
pub(crate) fn normal_quantile(p: f64) -> f64 {
    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    if !(0.0..=1.0).contains(&p) || p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    if p < P_LOW {
        let q = (-2.0 * p.ln()).sqrt();
        (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = (-2.0 * (1.0 - p).ln()).sqrt();
        -(((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
            / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
    }
}
