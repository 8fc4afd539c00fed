use std::path::PathBuf;

use eframe::egui;

use crate::config::PlotterConfig;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct FsecPlotterApp {
    pub state: AppState,
}

impl FsecPlotterApp {
    pub fn new(config: PlotterConfig) -> Self {
        Self {
            state: AppState::new(config),
        }
    }
}

impl Default for FsecPlotterApp {
    fn default() -> Self {
        Self::new(PlotterConfig::default())
    }
}

impl eframe::App for FsecPlotterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Files dropped onto the window ----
        let dropped: Vec<PathBuf> = ctx.input(|i| {
            i.raw
                .dropped_files
                .iter()
                .filter_map(|f| f.path.clone())
                .collect()
        });
        if !dropped.is_empty() {
            self.state.open_paths(&dropped);
        }

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: file list ----
        egui::SidePanel::left("file_panel")
            .default_width(320.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // Mutations above are reflected in the same frame.
        self.state.refresh();

        // ---- Central panel: plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::trace_plot(ui, &mut self.state);
        });
    }
}
