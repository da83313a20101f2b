use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::MetricRecord;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Bottom panel – accuracy metrics
// ---------------------------------------------------------------------------

fn stat_card(ui: &mut Ui, title: &str, value: f64, caption: &str) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.set_min_width(180.0);
        ui.label(RichText::new(title).weak());
        ui.label(RichText::new(format!("{value:.2}")).size(26.0).strong());
        ui.small(caption);
    });
}

fn best_model_card(ui: &mut Ui, best: &MetricRecord) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.strong(format!("✔ Best model: {}", best.segment));
        egui::Grid::new("best_model_grid")
            .num_columns(4)
            .spacing([24.0, 4.0])
            .show(ui, |ui: &mut Ui| {
                ui.label("Province");
                ui.strong(&best.segment.province);
                ui.label("Type");
                ui.strong(&best.segment.vehicle_type);
                ui.end_row();

                ui.label("MAE");
                ui.strong(format!("{:.2}", best.mae));
                ui.label("RMSE");
                ui.strong(format!("{:.2}", best.rmse));
                ui.end_row();

                ui.label("Changepoint prior scale");
                ui.monospace(best.changepoint_prior_scale.to_string());
                ui.label("Fourier order");
                ui.monospace(best.fourier_order.to_string());
                ui.end_row();
            });
    });
}

/// Render mean MAE / RMSE, the best model and the list of filtered models.
pub fn metrics_panel(ui: &mut Ui, state: &AppState) {
    let summary = state.summary();

    ui.heading("Accuracy metrics");
    ui.horizontal(|ui: &mut Ui| {
        stat_card(ui, "Mean MAE", summary.mean_mae, "Mean absolute error");
        stat_card(ui, "Mean RMSE", summary.mean_rmse, "Root mean squared error");
        if let Some(best) = summary.best {
            best_model_card(ui, best);
        }
    });

    if summary.is_empty() {
        ui.label("No models match the selected filters.");
        return;
    }

    ui.add_space(6.0);
    ui.strong("All models");
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::exact(16.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(90.0))
        .columns(Column::auto().at_least(70.0), 4)
        .header(20.0, |mut header| {
            for title in ["", "Province", "Type", "MAE", "RMSE", "CPS", "FO"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for metric in &summary.filtered {
                body.row(18.0, |mut row| {
                    row.col(|ui: &mut Ui| {
                        ui.colored_label(state.segment_colors.color_for(&metric.segment), "■");
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&metric.segment.province);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(&metric.segment.vehicle_type);
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.2}", metric.mae));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(format!("{:.2}", metric.rmse));
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(metric.changepoint_prior_scale.to_string());
                    });
                    row.col(|ui: &mut Ui| {
                        ui.label(metric.fourier_order.to_string());
                    });
                });
            }
        });
}
