use eframe::egui::{RichText, Ui};
use egui_plot::{GridMark, Legend, Line, LineStyle, Plot, PlotPoints, Points};

use crate::color::series_colors;
use crate::data::series::ChartPoint;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Prediction chart (central panel)
// ---------------------------------------------------------------------------

/// Label of the chart point nearest to `x`, if `x` sits on a point.
fn label_at(points: &[ChartPoint], x: f64) -> Option<&str> {
    let rounded = x.round();
    if (x - rounded).abs() > 1e-6 || rounded < 0.0 {
        return None;
    }
    points.get(rounded as usize).map(|p| p.label.as_str())
}

/// Render the real vs. predicted chart for the filtered observations.
pub fn prediction_plot(ui: &mut Ui, state: &AppState) {
    ui.heading("Predictions vs. actual values");
    if let Some(province) = state.filter.province() {
        let subtitle = match state.filter.vehicle_type() {
            Some(t) => format!("{province} - {t}"),
            None => province.to_string(),
        };
        ui.label(RichText::new(subtitle).weak());
    }

    if state.chart_points.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(
                "No data for the selected filters.\n\
                 Adjust the filters or open a predictions file (File → Open predictions…)",
            );
        });
        return;
    }

    let (actual_color, predicted_color) = series_colors();
    let points = &state.chart_points;

    let actual: Vec<[f64; 2]> = points
        .iter()
        .enumerate()
        .map(|(i, p)| [i as f64, p.actual as f64])
        .collect();
    let predicted: Vec<[f64; 2]> = points
        .iter()
        .enumerate()
        .map(|(i, p)| [i as f64, p.predicted as f64])
        .collect();

    let axis_labels = points.clone();
    let hover_labels = points.clone();

    Plot::new("prediction_plot")
        .legend(Legend::default())
        .x_axis_label("Month")
        .y_axis_label("Registrations")
        .x_axis_formatter(move |mark: GridMark, _range| {
            label_at(&axis_labels, mark.value)
                .map(str::to_owned)
                .unwrap_or_default()
        })
        .label_formatter(move |name, value| {
            let month = label_at(&hover_labels, value.x).unwrap_or("");
            if name.is_empty() {
                month.to_string()
            } else {
                format!("{name}\n{month}: {:.0}", value.y)
            }
        })
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::from(actual.clone()))
                    .name("Real")
                    .color(actual_color)
                    .width(3.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(actual))
                    .name("Real")
                    .color(actual_color)
                    .radius(4.0),
            );
            plot_ui.line(
                Line::new(PlotPoints::from(predicted.clone()))
                    .name("Predicted")
                    .color(predicted_color)
                    .style(LineStyle::dashed_loose())
                    .width(3.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::from(predicted))
                    .name("Predicted")
                    .color(predicted_color)
                    .radius(4.0),
            );
        });
}
