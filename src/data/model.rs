use std::fmt;

use chrono::{Datelike, NaiveDate};

// ---------------------------------------------------------------------------
// SegmentKey – one (province, vehicle type) forecasting stratum
// ---------------------------------------------------------------------------

/// Identifies a forecasting stratum. Each segment has its own model,
/// metrics and observation series.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentKey {
    pub province: String,
    pub vehicle_type: String,
}

impl SegmentKey {
    pub fn new(province: impl Into<String>, vehicle_type: impl Into<String>) -> Self {
        Self {
            province: province.into(),
            vehicle_type: vehicle_type.into(),
        }
    }
}

impl fmt::Display for SegmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.province, self.vehicle_type)
    }
}

// ---------------------------------------------------------------------------
// MetricRecord – accuracy of one segment's model
// ---------------------------------------------------------------------------

/// Accuracy metrics and tuned hyperparameters for a single segment model.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub segment: SegmentKey,
    /// Mean absolute error, non-negative.
    pub mae: f64,
    /// Root mean squared error, non-negative.
    pub rmse: f64,
    /// Strictly positive.
    pub changepoint_prior_scale: f64,
    /// Strictly positive.
    pub fourier_order: u32,
}

// ---------------------------------------------------------------------------
// Observation – one month of one segment
// ---------------------------------------------------------------------------

/// Real vs. predicted registrations for a segment in a given month.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Always the first day of the month.
    pub date: NaiveDate,
    pub segment: SegmentKey,
    pub actual_count: u64,
    pub predicted_count: f64,
}

/// Truncate a date to the first day of its month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

// ---------------------------------------------------------------------------
// Dataset – what a single upload produces
// ---------------------------------------------------------------------------

/// Observations and metrics as handed over by the loader.
///
/// The two collections are independent: metrics may exist for segments with
/// no observations and vice versa.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub observations: Vec<Observation>,
    pub metrics: Vec<MetricRecord>,
}

impl Dataset {
    /// Whether nothing at all is loaded.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty() && self.metrics.is_empty()
    }

    /// The built-in demo data shown before any upload.
    pub fn demo() -> Self {
        let obs = |y: i32, m: u32, p: &str, t: &str, actual: u64, predicted: f64| Observation {
            date: NaiveDate::from_ymd_opt(y, m, 1).unwrap_or_default(),
            segment: SegmentKey::new(p, t),
            actual_count: actual,
            predicted_count: predicted,
        };
        let metric = |p: &str, t: &str, mae: f64, rmse: f64, cps: f64, fo: u32| MetricRecord {
            segment: SegmentKey::new(p, t),
            mae,
            rmse,
            changepoint_prior_scale: cps,
            fourier_order: fo,
        };

        Dataset {
            observations: vec![
                obs(2025, 1, "CABA", "Auto", 1500, 1480.0),
                obs(2025, 2, "CABA", "Auto", 1600, 1620.0),
                obs(2025, 3, "CABA", "Auto", 1700, 1680.0),
                obs(2025, 1, "Buenos Aires", "Auto", 3500, 3450.0),
                obs(2025, 2, "Buenos Aires", "Auto", 3600, 3620.0),
                obs(2025, 1, "CABA", "Moto", 800, 820.0),
                obs(2025, 2, "CABA", "Moto", 850, 830.0),
            ],
            metrics: vec![
                metric("CABA", "Auto", 25.5, 32.8, 0.1, 15),
                metric("CABA", "Moto", 18.3, 24.1, 0.05, 10),
                metric("Buenos Aires", "Auto", 45.2, 58.6, 0.2, 20),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_start_truncates_day() {
        let d = NaiveDate::from_ymd_opt(2025, 3, 17).unwrap();
        assert_eq!(month_start(d), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
    }

    #[test]
    fn demo_dataset_has_both_collections() {
        let ds = Dataset::demo();
        assert_eq!(ds.observations.len(), 7);
        assert_eq!(ds.metrics.len(), 3);
        assert!(!ds.is_empty());
        assert!(Dataset::default().is_empty());
    }

    #[test]
    fn segment_key_display() {
        assert_eq!(SegmentKey::new("CABA", "Moto").to_string(), "CABA / Moto");
    }
}
