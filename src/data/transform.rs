use eframe::egui::Color32;

use super::model::Dataset;
use super::range::PlotRange;
use crate::color::generate_palette;

// ---------------------------------------------------------------------------
// Series – what the renderers draw for one entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    /// Elution time, `volume * flow_rate`.
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub visible: bool,
    pub color: Color32,
}

impl Series {
    /// The polyline cut to `range` along x. Segments crossing an edge are
    /// interpolated to end exactly on it. Each run is a connected piece;
    /// a trace that leaves and re-enters the window yields several runs.
    pub fn runs_within(&self, range: PlotRange) -> Vec<Vec<(f64, f64)>> {
        let (x_min, x_max) = range.drawable();
        let points: Vec<(f64, f64)> = self
            .x
            .iter()
            .zip(self.y.iter())
            .map(|(&x, &y)| (x, y))
            .collect();

        if let [only] = points.as_slice() {
            return if (x_min..=x_max).contains(&only.0) {
                vec![vec![*only]]
            } else {
                Vec::new()
            };
        }

        let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
        let mut open = false;
        for pair in points.windows(2) {
            let ((x0, y0), (x1, y1)) = (pair[0], pair[1]);
            let dx = x1 - x0;
            let (t_in, t_out) = if dx == 0.0 {
                if !(x_min..=x_max).contains(&x0) {
                    open = false;
                    continue;
                }
                (0.0, 1.0)
            } else {
                let ta = (x_min - x0) / dx;
                let tb = (x_max - x0) / dx;
                (ta.min(tb).max(0.0), ta.max(tb).min(1.0))
            };
            if t_in > t_out {
                open = false;
                continue;
            }
            let at = |t: f64| {
                if t == 0.0 {
                    (x0, y0)
                } else if t == 1.0 {
                    (x1, y1)
                } else {
                    (x0 + t * dx, y0 + t * (y1 - y0))
                }
            };
            match runs.last_mut() {
                Some(run) if open && t_in == 0.0 => run.push(at(t_out)),
                _ => runs.push(vec![at(t_in), at(t_out)]),
            }
            open = t_out == 1.0;
        }
        runs
    }
}

/// One row of the plot legend.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    /// Dataset row the entry stands for.
    pub index: usize,
    /// Row number and file name, so repeated file names stay apart.
    pub name: String,
    pub color: Color32,
    pub visible: bool,
}

/// Legend rows in dataset order. Hidden traces are listed too.
pub fn legend_entries(series: &[Series]) -> Vec<LegendEntry> {
    series
        .iter()
        .enumerate()
        .map(|(index, s)| LegendEntry {
            index,
            name: format!("{}: {}", index + 1, s.label),
            color: s.color,
            visible: s.visible,
        })
        .collect()
}

/// One series per entry, in dataset order. Hidden entries are kept (with
/// `visible == false`) so colours and legend order do not depend on them.
pub fn render_series(dataset: &Dataset) -> Vec<Series> {
    let palette = generate_palette(dataset.len());
    dataset
        .entries()
        .iter()
        .zip(palette)
        .map(|(entry, color)| {
            let flow_rate = entry.flow_rate();
            Series {
                label: entry.filename().to_string(),
                x: entry.volume().iter().map(|v| v * flow_rate).collect(),
                y: entry.intensity().to_vec(),
                visible: entry.enabled(),
                color,
            }
        })
        .collect()
}

/// Vertical extent of the visible data inside `range`, padded by 5%.
/// `(0, 1)` when nothing is visible there.
pub fn y_extent(series: &[Series], range: PlotRange) -> (f64, f64) {
    let (lo, hi) = series
        .iter()
        .filter(|s| s.visible)
        .flat_map(|s| s.runs_within(range))
        .flatten()
        .map(|(_, y)| y)
        .filter(|y| y.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
            (lo.min(y), hi.max(y))
        });
    if lo > hi {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        return (lo - 0.5, hi + 0.5);
    }
    let pad = span * 0.05;
    (lo - pad, hi + pad)
}
