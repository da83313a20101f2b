/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Observation>, Vec<MetricRecord>
///   └──────────┘
///        │  SegmentFilter (province?, vehicle type?)
///        ├──────────────────┐
///        ▼                  ▼
///   ┌──────────┐      ┌──────────┐
///   │  series   │      │ metrics   │  aggregate → MetricSummary
///   └──────────┘      └──────────┘
///   filter_series → to_chart_points
/// ```

pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod series;
