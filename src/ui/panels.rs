use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::filter::ALL_SENTINEL;
use crate::state::AppState;
use crate::upload::UploadKind;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("Filters");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if ui.small_button("⟲ Clear").clicked() {
                state.reset_filters();
            }
        });
    });
    ui.separator();

    if state.dataset.observations.is_empty() {
        ui.label("No predictions loaded.");
    }

    // Clone what we need so we can mutate state inside the combo boxes.
    let provinces = state.province_options.clone();
    let vehicle_types = state.vehicle_type_options.clone();

    ui.strong("Province");
    let current = state.filter.province().map(str::to_owned);
    if let Some(choice) = filter_combo(
        ui,
        "province",
        "All provinces",
        current.as_deref(),
        &provinces,
    ) {
        state.select_province(&choice);
    }
    ui.add_space(8.0);

    ui.strong("Vehicle type");
    let current = state.filter.vehicle_type().map(str::to_owned);
    if let Some(choice) = filter_combo(
        ui,
        "vehicle_type",
        "All types",
        current.as_deref(),
        &vehicle_types,
    ) {
        state.select_vehicle_type(&choice);
    }

    if state.filter.is_active() {
        ui.separator();
        ui.label(format!(
            "Active filters: {}",
            state.filter.active_labels().join(", ")
        ));
    }
}

/// A combo box with an "all" entry followed by `options`.
/// Returns the raw selection (possibly the sentinel) when it changed.
fn filter_combo(
    ui: &mut Ui,
    id: &str,
    all_label: &str,
    current: Option<&str>,
    options: &[String],
) -> Option<String> {
    let mut choice = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.unwrap_or(all_label))
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), all_label).clicked() {
                choice = Some(ALL_SENTINEL.to_string());
            }
            for option in options {
                if ui
                    .selectable_label(current == Some(option.as_str()), option)
                    .clicked()
                {
                    choice = Some(option.clone());
                }
            }
        });
    choice
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        let idle = !state.loading();
        ui.menu_button("File", |ui: &mut Ui| {
            if ui
                .add_enabled(idle, egui::Button::new("Open predictions…"))
                .clicked()
            {
                open_file_dialog(state, UploadKind::Predictions);
                ui.close_menu();
            }
            if ui
                .add_enabled(idle, egui::Button::new("Open metrics…"))
                .clicked()
            {
                open_file_dialog(state, UploadKind::Metrics);
                ui.close_menu();
            }
            ui.separator();
            if ui
                .add_enabled(idle, egui::Button::new("Load demo data"))
                .clicked()
            {
                state.load_demo();
                ui.close_menu();
            }
            if ui
                .add_enabled(idle, egui::Button::new("Clear dataset"))
                .clicked()
            {
                state.clear_dataset();
                ui.close_menu();
            }
        });

        ui.separator();

        if state.dataset.is_empty() {
            ui.label("No dataset loaded (File → Load demo data)");
        } else {
            ui.label(format!(
                "{} observations ({} visible), {} models",
                state.dataset.observations.len(),
                state.chart_points.len(),
                state.dataset.metrics.len()
            ));
        }

        if let Some(path) = state.uploads.pending_path() {
            ui.separator();
            ui.spinner();
            ui.label(format!("Processing {}…", path.display()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState, kind: UploadKind) {
    let (title, extensions) = match kind {
        UploadKind::Predictions => ("Open predictions", state.config.prediction_extensions),
        UploadKind::Metrics => ("Open model metrics", state.config.metric_extensions),
    };

    let file = rfd::FileDialog::new()
        .set_title(title)
        .add_filter("Supported files", extensions)
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        state.request_upload(kind, path);
    }
}
