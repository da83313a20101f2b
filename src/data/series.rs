use chrono::{Datelike, NaiveDate};

use super::filter::SegmentFilter;
use super::model::Observation;

/// es-AR short month names, January first.
const MONTHS_ES: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

// ---------------------------------------------------------------------------
// Chart projection of the observation series
// ---------------------------------------------------------------------------

/// One point of the real-vs-predicted chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub label: String,
    pub actual: u64,
    pub predicted: i64,
}

/// Observations passing `filter`, in input order.
pub fn filter_series<'a>(
    observations: &'a [Observation],
    filter: &SegmentFilter,
) -> Vec<&'a Observation> {
    observations
        .iter()
        .filter(|o| filter.matches(&o.segment))
        .collect()
}

/// Human month/year label, e.g. `ene 2025`.
pub fn month_label(date: NaiveDate) -> String {
    let month = MONTHS_ES[date.month0() as usize];
    format!("{month} {}", date.year())
}

/// Project observations onto chart points.
///
/// Does not sort: callers pass observations already in chronological order.
pub fn to_chart_points(observations: &[&Observation]) -> Vec<ChartPoint> {
    observations
        .iter()
        .map(|o| ChartPoint {
            label: month_label(o.date),
            actual: o.actual_count,
            predicted: o.predicted_count.round() as i64,
        })
        .collect()
}
