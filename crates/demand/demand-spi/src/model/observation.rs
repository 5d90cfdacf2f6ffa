//! Sales observation types and history normalization.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single dated demand observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesObservation {
    /// Calendar date of the observation.
    pub date: NaiveDate,
    /// Units sold on that date. Never negative after normalization.
    pub quantity: f64,
}

impl SalesObservation {
    /// Create a new observation.
    pub fn new(date: NaiveDate, quantity: f64) -> Self {
        Self { date, quantity }
    }
}

/// Normalize a raw history for fitting: drop non-finite quantities, clamp
/// negatives to zero, sort by date, and deduplicate dates keeping the
/// observation that appeared last in the input (last write wins).
pub fn normalize_observations(history: &[SalesObservation]) -> Vec<SalesObservation> {
    let mut cleaned: Vec<SalesObservation> = history
        .iter()
        .filter(|obs| obs.quantity.is_finite())
        .map(|obs| SalesObservation::new(obs.date, obs.quantity.max(0.0)))
        .collect();

    // Stable sort keeps input order within a date, so the last entry for a
    // date is the most recent write.
    cleaned.sort_by_key(|obs| obs.date);

    let mut deduped: Vec<SalesObservation> = Vec::with_capacity(cleaned.len());
    for obs in cleaned {
        match deduped.last_mut() {
            Some(last) if last.date == obs.date => *last = obs,
            _ => deduped.push(obs),
        }
    }
    deduped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_sorts_by_date() {
        let history = vec![
            SalesObservation::new(day(3), 3.0),
            SalesObservation::new(day(1), 1.0),
            SalesObservation::new(day(2), 2.0),
        ];
        let normalized = normalize_observations(&history);
        let dates: Vec<NaiveDate> = normalized.iter().map(|o| o.date).collect();
        assert_eq!(dates, vec![day(1), day(2), day(3)]);
    }

    #[test]
    fn test_duplicate_dates_last_write_wins() {
        let history = vec![
            SalesObservation::new(day(1), 5.0),
            SalesObservation::new(day(2), 7.0),
            SalesObservation::new(day(1), 9.0),
        ];
        let normalized = normalize_observations(&history);
        assert_eq!(normalized.len(), 2);
        assert_eq!(normalized[0].quantity, 9.0);
        assert_eq!(normalized[1].quantity, 7.0);
    }

    #[test]
    fn test_negative_quantities_clamped() {
        let history = vec![SalesObservation::new(day(1), -4.0)];
        let normalized = normalize_observations(&history);
        assert_eq!(normalized[0].quantity, 0.0);
    }

    #[test]
    fn test_non_finite_quantities_dropped() {
        let history = vec![
            SalesObservation::new(day(1), f64::NAN),
            SalesObservation::new(day(2), 3.0),
        ];
        let normalized = normalize_observations(&history);
        assert_eq!(normalized.len(), 1);
        assert_eq!(normalized[0].date, day(2));
    }

    #[test]
    fn test_empty_history() {
        assert!(normalize_observations(&[]).is_empty());
    }
}
