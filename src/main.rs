mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;
mod upload;

use app::ForecastViewerApp;
use clap::Parser;
use config::{Cli, ViewerConfig};
use data::loader;
use eframe::egui;
use state::AppState;

/// Build the initial state from the command line. Load failures are shown in
/// the status line instead of aborting startup.
fn initial_state(cli: &Cli) -> AppState {
    let mut state = AppState::new(ViewerConfig::from(cli));

    if cli.demo {
        state.load_demo();
    }

    if let Some(path) = &cli.predictions {
        match loader::load_observations(path, state.config.max_file_bytes) {
            Ok(observations) => {
                log::info!("Loaded {} observations from {}", observations.len(), path.display());
                state.set_observations(observations);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                state.report_error(format!("Error: {e:#}"));
            }
        }
    }

    if let Some(path) = &cli.metrics {
        match loader::load_metrics(path, state.config.max_file_bytes) {
            Ok(metrics) => {
                log::info!("Loaded {} metric records from {}", metrics.len(), path.display());
                state.set_metrics(metrics);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", path.display());
                state.report_error(format!("Error: {e:#}"));
            }
        }
    }

    state
}

fn main() -> eframe::Result {
    env_logger::init();

    let cli = Cli::parse();
    let state = initial_state(&cli);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(state.config.inner_size)
            .with_min_inner_size(state.config.min_inner_size),
        ..Default::default()
    };

    eframe::run_native(
        "Forecast Viewer – Vehicle Registrations",
        options,
        Box::new(|_cc| Ok(Box::new(ForecastViewerApp::new(state)))),
    )
}
