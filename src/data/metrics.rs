use super::filter::SegmentFilter;
use super::model::MetricRecord;

// ---------------------------------------------------------------------------
// Metric summary over the filtered segments
// ---------------------------------------------------------------------------

/// Derived view of the metric records that pass a filter.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSummary<'a> {
    /// Matching records in input order.
    pub filtered: Vec<&'a MetricRecord>,
    /// 0.0 when `filtered` is empty.
    pub mean_mae: f64,
    /// 0.0 when `filtered` is empty.
    pub mean_rmse: f64,
    /// Lowest MAE; the first one wins on ties.
    pub best: Option<&'a MetricRecord>,
}

impl MetricSummary<'_> {
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }
}

fn mean<'a>(records: &[&'a MetricRecord], value: impl Fn(&'a MetricRecord) -> f64) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    records.iter().map(|&r| value(r)).sum::<f64>() / records.len() as f64
}

/// Filter `records` and summarise the result. Never fails: an empty
/// selection gives zero means and no best model.
pub fn aggregate<'a>(records: &'a [MetricRecord], filter: &SegmentFilter) -> MetricSummary<'a> {
    let filtered: Vec<&MetricRecord> = records
        .iter()
        .filter(|r| filter.matches(&r.segment))
        .collect();

    let mean_mae = mean(&filtered, |r| r.mae);
    let mean_rmse = mean(&filtered, |r| r.rmse);

    // Strict `<` keeps the earliest record among equal MAEs.
    let best = filtered
        .iter()
        .copied()
        .fold(None::<&MetricRecord>, |best, r| match best {
            Some(b) if r.mae < b.mae => Some(r),
            Some(b) => Some(b),
            None => Some(r),
        });

    MetricSummary {
        filtered,
        mean_mae,
        mean_rmse,
        best,
    }
}
