use std::path::PathBuf;

use clap::Parser;

use crate::data::loader::DEFAULT_MAX_FILE_BYTES;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Vehicle-registration forecast viewer.
#[derive(Debug, Parser)]
#[command(name = "forecast-viewer", version, about)]
pub struct Cli {
    /// Observations file (real vs. predicted counts): .csv, .json or .parquet
    #[arg(short, long)]
    pub predictions: Option<PathBuf>,

    /// Per-segment metrics file: .csv or .json
    #[arg(short, long)]
    pub metrics: Option<PathBuf>,

    /// Start with the built-in demo data
    #[arg(long)]
    pub demo: bool,

    /// Maximum accepted file size in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_FILE_BYTES)]
    pub max_file_bytes: u64,
}

// ---------------------------------------------------------------------------
// Viewer configuration
// ---------------------------------------------------------------------------

/// Runtime settings of the viewer window and loader.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub inner_size: [f32; 2],
    pub min_inner_size: [f32; 2],
    pub max_file_bytes: u64,
    pub prediction_extensions: &'static [&'static str],
    pub metric_extensions: &'static [&'static str],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            inner_size: [1280.0, 860.0],
            min_inner_size: [720.0, 480.0],
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            prediction_extensions: &["csv", "json", "parquet", "pq"],
            metric_extensions: &["csv", "json"],
        }
    }
}

impl From<&Cli> for ViewerConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            max_file_bytes: cli.max_file_bytes,
            ..Default::default()
        }
    }
}
