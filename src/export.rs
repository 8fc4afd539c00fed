use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::config::ExportSettings;
use crate::data::range::PlotRange;
use crate::data::transform::{legend_entries, y_extent, LegendEntry, Series};
use crate::error::ExportError;

pub const X_AXIS_LABEL: &str = "Volume(ml)";
pub const Y_AXIS_LABEL: &str = "FL intensity(AU)";

/// Outer margin in pixels; kept small so the figure is cropped to its content.
const TIGHT_MARGIN: u32 = 8;

const LEGEND_ROW_HEIGHT: u32 = 22;
/// Width a legend column is given before another column is added.
const LEGEND_COLUMN_WIDTH: u32 = 240;
const LEGEND_SWATCH: i32 = 24;
const LEGEND_FONT_SIZE: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "png" => Ok(ImageFormat::Png),
            "svg" => Ok(ImageFormat::Svg),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Static figure export
// ---------------------------------------------------------------------------

/// Draw the visible series over `range` into a PNG or SVG file, with the
/// legend in a band above the chart.
pub fn save_figure(
    series: &[Series],
    range: PlotRange,
    path: &Path,
    settings: &ExportSettings,
) -> Result<(), ExportError> {
    let size = (settings.width, settings.height);
    match ImageFormat::from_path(path)? {
        ImageFormat::Png => {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            draw_figure(&root, series, range)?;
        }
        ImageFormat::Svg => {
            let root = SVGBackend::new(path, size).into_drawing_area();
            draw_figure(&root, series, range)?;
        }
    }
    log::info!("Exported figure to {}", path.display());
    Ok(())
}

/// Grid the legend band is laid out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegendLayout {
    pub columns: usize,
    pub rows: usize,
    /// Band height in pixels, margins included. Zero without entries.
    pub height: u32,
}

/// Fill rows left to right, as many columns as `width` allows.
pub fn legend_layout(entries: usize, width: u32) -> LegendLayout {
    if entries == 0 {
        return LegendLayout {
            columns: 0,
            rows: 0,
            height: 0,
        };
    }
    let fit = (width.saturating_sub(2 * TIGHT_MARGIN) / LEGEND_COLUMN_WIDTH) as usize;
    let columns = fit.clamp(1, entries);
    let rows = entries.div_ceil(columns);
    LegendLayout {
        columns,
        rows,
        height: rows as u32 * LEGEND_ROW_HEIGHT + 2 * TIGHT_MARGIN,
    }
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    series: &[Series],
    range: PlotRange,
) -> Result<(), ExportError> {
    root.fill(&WHITE).map_err(draw_err)?;

    let entries = legend_entries(series);
    let (width, _) = root.dim_in_pixel();
    let layout = legend_layout(entries.len(), width);
    let (band, chart_area) = root.split_vertically(layout.height);
    draw_legend(&band, &entries, layout)?;

    let (x_min, x_max) = range.drawable();
    let (y_min, y_max) = y_extent(series, range);

    let mut chart = ChartBuilder::on(&chart_area)
        .margin(TIGHT_MARGIN)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc(X_AXIS_LABEL)
        .y_desc(Y_AXIS_LABEL)
        .draw()
        .map_err(draw_err)?;

    for s in series.iter().filter(|s| s.visible) {
        let color = rgb(s.color);
        for run in s.runs_within(range) {
            chart
                .draw_series(LineSeries::new(run, &color))
                .map_err(draw_err)?;
        }
    }

    root.present().map_err(draw_err)?;
    Ok(())
}

fn draw_legend<DB: DrawingBackend>(
    band: &DrawingArea<DB, Shift>,
    entries: &[LegendEntry],
    layout: LegendLayout,
) -> Result<(), ExportError> {
    if entries.is_empty() {
        return Ok(());
    }
    let (width, _) = band.dim_in_pixel();
    let column_width = (width.saturating_sub(2 * TIGHT_MARGIN) / layout.columns as u32) as i32;
    let margin = TIGHT_MARGIN as i32;
    let row_height = LEGEND_ROW_HEIGHT as i32;
    let font = TextStyle::from(("sans-serif", LEGEND_FONT_SIZE).into_font())
        .pos(Pos::new(HPos::Left, VPos::Center));

    for (k, entry) in entries.iter().enumerate() {
        let x = margin + (k % layout.columns) as i32 * column_width;
        let y = margin + (k / layout.columns) as i32 * row_height + row_height / 2;
        band.draw(&PathElement::new(
            vec![(x, y), (x + LEGEND_SWATCH, y)],
            rgb(entry.color).stroke_width(2),
        ))
        .map_err(draw_err)?;
        band.draw(&Text::new(
            entry.name.clone(),
            (x + LEGEND_SWATCH + 6, y),
            font.clone(),
        ))
        .map_err(draw_err)?;
    }
    Ok(())
}

fn rgb(color: eframe::egui::Color32) -> RGBColor {
    RGBColor(color.r(), color.g(), color.b())
}

fn draw_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Draw(e.to_string())
}
