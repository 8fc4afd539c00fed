use eframe::egui::{RichText, Ui};
use egui_plot::{Line, Plot, PlotBounds, PlotPoints};

use crate::data::transform::{legend_entries, y_extent};
use crate::export::{X_AXIS_LABEL, Y_AXIS_LABEL};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Trace plot (central panel)
// ---------------------------------------------------------------------------

/// Render the legend strip and, below it, the overlaid traces.
pub fn trace_plot(ui: &mut Ui, state: &mut AppState) {
    if state.dataset.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open or drop log files to plot traces  (File → Open…)");
        });
        return;
    }

    legend_strip(ui, state);
    ui.separator();

    let reset = std::mem::take(&mut state.reset_view);
    let bounds = reset.then(|| {
        let (x_min, x_max) = state.range.drawable();
        let (y_min, y_max) = y_extent(&state.series, state.range);
        PlotBounds::from_min_max([x_min, y_min], [x_max, y_max])
    });

    Plot::new("trace_plot")
        .x_axis_label(X_AXIS_LABEL)
        .y_axis_label(Y_AXIS_LABEL)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if let Some(bounds) = bounds {
                plot_ui.set_plot_bounds(bounds);
            }

            let entries = legend_entries(&state.series);
            for (series, entry) in state.series.iter().zip(entries) {
                if !series.visible {
                    continue;
                }
                let points: PlotPoints = series
                    .x
                    .iter()
                    .zip(series.y.iter())
                    .map(|(&x, &y)| [x, y])
                    .collect();

                let line = Line::new(points)
                    .name(entry.name)
                    .color(series.color)
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}

/// One checkbox per trace in dataset order. Ticking it toggles the entry's
/// `enabled` flag, the same as the "Show" column of the file list.
fn legend_strip(ui: &mut Ui, state: &mut AppState) {
    let mut toggled = None;
    ui.horizontal_wrapped(|ui: &mut Ui| {
        for entry in legend_entries(&state.series) {
            let mut shown = entry.visible;
            let label = RichText::new(entry.name).color(entry.color).strong();
            if ui.checkbox(&mut shown, label).changed() {
                toggled = Some(entry.index);
            }
        }
    });

    if let Some(index) = toggled {
        if let Err(e) = state.toggle_enabled(index) {
            state.report("Show", e);
        }
        ui.ctx().request_repaint();
    }
}
