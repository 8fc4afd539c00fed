use eframe::egui;
use fsec_plotter::app::FsecPlotterApp;
use fsec_plotter::config::PlotterConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = PlotterConfig::discover();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([600.0, 400.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "FSEC Plotter",
        options,
        Box::new(|_cc| Ok(Box::new(FsecPlotterApp::new(config)))),
    )
}
