use std::path::PathBuf;

use crate::color::SegmentColors;
use crate::config::ViewerConfig;
use crate::data::filter::{distinct_provinces, distinct_vehicle_types, SegmentFilter};
use crate::data::metrics::{aggregate, MetricSummary};
use crate::data::model::{Dataset, MetricRecord, Observation};
use crate::data::series::{filter_series, to_chart_points, ChartPoint};
use crate::upload::{UploadKind, UploadOutcome, UploadPayload, UploadRequest, UploadTracker};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: ViewerConfig,

    /// Last successfully loaded dataset (empty until something is loaded).
    pub dataset: Dataset,

    /// Province / vehicle-type selection.
    pub filter: SegmentFilter,

    /// Filter options, first-seen order.
    pub province_options: Vec<String>,
    pub vehicle_type_options: Vec<String>,

    /// Chart projection of the filtered observations (cached).
    pub chart_points: Vec<ChartPoint>,

    /// Swatch colour per metric segment.
    pub segment_colors: SegmentColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Background file load, at most one at a time.
    pub uploads: UploadTracker,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl AppState {
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            dataset: Dataset::default(),
            filter: SegmentFilter::default(),
            province_options: Vec::new(),
            vehicle_type_options: Vec::new(),
            chart_points: Vec::new(),
            segment_colors: SegmentColors::default(),
            status_message: None,
            uploads: UploadTracker::default(),
        }
    }

    /// Whether a file load is in progress.
    pub fn loading(&self) -> bool {
        self.uploads.is_pending()
    }

    /// Replace the whole dataset. The filter is kept as is.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        self.dataset = dataset;
        self.on_observations_changed();
        self.on_metrics_changed();
    }

    pub fn set_observations(&mut self, observations: Vec<Observation>) {
        self.dataset.observations = observations;
        self.on_observations_changed();
    }

    pub fn set_metrics(&mut self, metrics: Vec<MetricRecord>) {
        self.dataset.metrics = metrics;
        self.on_metrics_changed();
    }

    fn on_observations_changed(&mut self) {
        self.province_options = distinct_provinces(&self.dataset.observations);
        self.vehicle_type_options = distinct_vehicle_types(&self.dataset.observations);
        self.refilter();
    }

    fn on_metrics_changed(&mut self) {
        self.segment_colors = SegmentColors::new(self.dataset.metrics.iter().map(|m| &m.segment));
    }

    /// Recompute the chart points after a filter or data change.
    pub fn refilter(&mut self) {
        let series = filter_series(&self.dataset.observations, &self.filter);
        self.chart_points = to_chart_points(&series);
    }

    /// Metric summary for the current filter.
    pub fn summary(&self) -> MetricSummary<'_> {
        aggregate(&self.dataset.metrics, &self.filter)
    }

    // -- UI events --

    pub fn select_province(&mut self, value: &str) {
        self.filter.set_province(value);
        self.refilter();
    }

    pub fn select_vehicle_type(&mut self, value: &str) {
        self.filter.set_vehicle_type(value);
        self.refilter();
    }

    pub fn reset_filters(&mut self) {
        self.filter.reset();
        self.refilter();
    }

    /// Append an error to the status line, keeping earlier ones.
    pub fn report_error(&mut self, message: String) {
        self.status_message = Some(match self.status_message.take() {
            Some(previous) => format!("{previous}; {message}"),
            None => message,
        });
    }

    /// Dataset swaps are refused while a background load is pending, since
    /// its result would land on top of the new dataset.
    fn refuse_while_loading(&mut self, action: &str) -> bool {
        let Some(path) = self.uploads.pending_path() else {
            return false;
        };
        let message = format!("Error: cannot {action} while {} is loading", path.display());
        log::warn!("{message}");
        self.status_message = Some(message);
        true
    }

    pub fn load_demo(&mut self) {
        if self.refuse_while_loading("load demo data") {
            return;
        }
        self.set_dataset(Dataset::demo());
        self.status_message = None;
        log::info!("Loaded demo dataset");
    }

    pub fn clear_dataset(&mut self) {
        if self.refuse_while_loading("clear the dataset") {
            return;
        }
        self.set_dataset(Dataset::default());
        self.status_message = None;
    }

    /// Start loading `path` in the background. While it runs the current
    /// dataset stays in place; a second request is refused.
    pub fn request_upload(&mut self, kind: UploadKind, path: PathBuf) {
        let request = UploadRequest {
            kind,
            path,
            max_bytes: self.config.max_file_bytes,
        };
        match self.uploads.start(request) {
            Ok(()) => self.status_message = None,
            Err(e) => {
                log::warn!("Upload refused: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Apply a finished background load, if any. Returns whether the state
    /// changed.
    pub fn poll_uploads(&mut self) -> bool {
        match self.uploads.poll() {
            Some(outcome) => {
                self.apply_outcome(outcome);
                true
            }
            None => false,
        }
    }

    fn apply_outcome(&mut self, outcome: UploadOutcome) {
        let path = outcome.request.path.display().to_string();
        match outcome.result {
            Ok(UploadPayload::Observations(observations)) => {
                log::info!("Loaded {} observations from {path}", observations.len());
                self.set_observations(observations);
                self.status_message = None;
            }
            Ok(UploadPayload::Metrics(metrics)) => {
                log::info!("Loaded {} metric records from {path}", metrics.len());
                self.set_metrics(metrics);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load {path}: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
