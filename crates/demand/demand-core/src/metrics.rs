//! Forecast accuracy metrics.

/// Mean Absolute Error.
pub fn mae(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).abs())
        .sum();
    sum / actual.len() as f64
}

/// Mean Squared Error.
pub fn mse(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = actual
        .iter()
        .zip(predicted.iter())
        .map(|(a, p)| (a - p).powi(2))
        .sum();
    sum / actual.len() as f64
}

/// Root Mean Squared Error.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    mse(actual, predicted).sqrt()
}

/// Mean Absolute Percentage Error. Zero actuals are skipped.
pub fn mape(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    let valid: Vec<_> = actual
        .iter()
        .zip(predicted.iter())
        .filter(|(&a, _)| a.abs() > 1e-10)
        .collect();
    if valid.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = valid.iter().map(|(&a, &p)| ((a - p) / a).abs()).sum();
    sum / valid.len() as f64
}

/// Median Absolute Percentage Error. Zero actuals are skipped.
pub fn mdape(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    let mut apes: Vec<f64> = actual
        .iter()
        .zip(predicted.iter())
        .filter(|(&a, _)| a.abs() > 1e-10)
        .map(|(&a, &p)| ((a - p) / a).abs())
        .collect();
    if apes.is_empty() {
        return f64::NAN;
    }
    apes.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = apes.len() / 2;
    if apes.len() % 2 == 0 {
        (apes[mid - 1] + apes[mid]) / 2.0
    } else {
        apes[mid]
    }
}

/// Symmetric Mean Absolute Percentage Error. Pairs where both values are
/// zero are skipped (a perfect forecast of nothing).
pub fn smape(actual: &[f64], predicted: &[f64]) -> f64 {
    if actual.len() != predicted.len() || actual.is_empty() {
        return f64::NAN;
    }
    let valid: Vec<_> = actual
        .iter()
        .zip(predicted.iter())
        .filter(|(&a, &p)| a.abs() + p.abs() > 1e-10)
        .collect();
    if valid.is_empty() {
        return f64::NAN;
    }
    let sum: f64 = valid
        .iter()
        .map(|(&a, &p)| 2.0 * (a - p).abs() / (a.abs() + p.abs()))
        .sum();
    sum / valid.len() as f64
}

/// Fraction of actuals inside their interval bounds.
pub fn coverage(actual: &[f64], lower: &[f64], upper: &[f64]) -> f64 {
    if actual.len() != lower.len() || actual.len() != upper.len() || actual.is_empty() {
        return f64::NAN;
    }
    let hits = actual
        .iter()
        .zip(lower.iter().zip(upper.iter()))
        .filter(|(a, (lo, hi))| **a >= **lo && **a <= **hi)
        .count();
    hits as f64 / actual.len() as f64
}
