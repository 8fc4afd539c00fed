use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::ListColumn;
use crate::state::AppState;

/// Something the user asked for while the table was borrowed.
enum RowAction {
    Select(usize),
    Toggle(usize),
    SetFlowRate(usize, f64),
}

// ---------------------------------------------------------------------------
// Left side panel – file list and controls
// ---------------------------------------------------------------------------

/// Render the left panel: file table, list buttons and x-range entry.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Log files");
    ui.separator();

    list_buttons(ui, state);
    ui.separator();

    range_entry(ui, state);
    ui.separator();

    if state.dataset.is_empty() {
        ui.label("No files loaded.");
        return;
    }
    file_table(ui, state);
}

fn file_table(ui: &mut Ui, state: &mut AppState) {
    let mut action = None;
    let selected = state.cursor.current();

    TableBuilder::new(ui)
        .striped(true)
        .sense(egui::Sense::click())
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::remainder().at_least(80.0).clip(true))
        .column(Column::auto())
        .column(Column::auto())
        .header(20.0, |mut header| {
            for column in ListColumn::ALL {
                header.col(|ui| {
                    ui.strong(column.title());
                });
            }
        })
        .body(|mut body| {
            for (index, entry) in state.dataset.entries().iter().enumerate() {
                body.row(20.0, |mut row| {
                    row.set_selected(selected == Some(index));
                    for column in ListColumn::ALL {
                        row.col(|ui| match column {
                            ListColumn::Enabled => {
                                let mut enabled = entry.enabled();
                                if ui.checkbox(&mut enabled, "").changed() {
                                    action = Some(RowAction::Toggle(index));
                                }
                            }
                            ListColumn::FlowRate => {
                                let mut rate = entry.flow_rate();
                                let drag = egui::DragValue::new(&mut rate)
                                    .speed(0.01)
                                    .range(0.001..=100.0)
                                    .max_decimals(3);
                                if ui.add(drag).changed() {
                                    action = Some(RowAction::SetFlowRate(index, rate));
                                }
                            }
                            _ => {
                                let text = state.dataset.cell(index, column).unwrap_or_default();
                                ui.label(text);
                            }
                        });
                    }
                    if row.response().clicked() {
                        action = Some(RowAction::Select(index));
                    }
                });
            }
        });

    match action {
        Some(RowAction::Select(index)) => {
            if let Err(e) = state.select(index) {
                state.report("Select", e);
            }
        }
        Some(RowAction::Toggle(index)) => {
            if let Err(e) = state.toggle_enabled(index) {
                state.report("Show/hide", e);
            }
        }
        Some(RowAction::SetFlowRate(index, rate)) => {
            if let Err(e) = state.set_flow_rate(index, rate) {
                state.report("Flow rate", e);
            }
        }
        None => {}
    }
}

fn list_buttons(ui: &mut Ui, state: &mut AppState) {
    egui::Grid::new("list_buttons")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            if ui.button("Open file").clicked() {
                open_file_dialog(state);
            }
            if ui.button("Remove file").clicked() {
                if let Err(e) = state.delete_selected() {
                    state.report("Remove file", e);
                }
            }
            ui.end_row();

            if ui.button("Move up").clicked() {
                if let Err(e) = state.move_selected(-1) {
                    state.report("Move up", e);
                }
            }
            if ui.button("Move down").clicked() {
                if let Err(e) = state.move_selected(1) {
                    state.report("Move down", e);
                }
            }
            ui.end_row();

            if ui.button("Remove all").clicked() {
                state.delete_all();
            }
            ui.end_row();
        });
}

fn range_entry(ui: &mut Ui, state: &mut AppState) {
    ui.strong("X range");
    let mut submitted = false;
    ui.horizontal(|ui: &mut Ui| {
        ui.label("min");
        let min = ui.add(egui::TextEdit::singleline(&mut state.x_min_input).desired_width(50.0));
        ui.label("max");
        let max = ui.add(egui::TextEdit::singleline(&mut state.x_max_input).desired_width(50.0));
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        submitted = (min.lost_focus() || max.lost_focus()) && enter;
        if ui.button("Apply").clicked() {
            submitted = true;
        }
    });

    if submitted {
        match state.apply_range() {
            Ok(_) => state.status_message = None,
            Err(e) => {
                log::warn!("Rejected x range: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export figure…").clicked() {
                save_figure_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        let visible = state.dataset.entries().iter().filter(|e| e.enabled()).count();
        ui.label(format!(
            "{} files loaded, {} visible",
            state.dataset.len(),
            visible
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Open FSEC log files")
        .add_filter("Log files", &["txt", "csv", "tsv", "log"])
        .add_filter("All files", &["*"]);
    if let Some(home) = std::env::var_os("HOME") {
        dialog = dialog.set_directory(home);
    }

    if let Some(paths) = dialog.pick_files() {
        let report = state.open_paths(&paths);
        log::info!(
            "Opened {} file(s), {} failed",
            report.loaded.len(),
            report.failed.len()
        );
    }
}

pub fn save_figure_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export figure")
        .set_file_name("fsec.png")
        .add_filter("PNG image", &["png"])
        .add_filter("SVG image", &["svg"])
        .save_file();

    if let Some(path) = file {
        match state.export_figure(&path) {
            Ok(()) => state.status_message = None,
            Err(e) => {
                log::error!("Failed to export figure: {e}");
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    }
}
