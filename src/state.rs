use std::path::{Path, PathBuf};
use std::sync::mpsc::Receiver;

use crate::config::PlotterConfig;
use crate::data::loader::load_log;
use crate::data::model::{Change, Dataset};
use crate::data::range::PlotRange;
use crate::data::selection::SelectionCursor;
use crate::data::transform::{render_series, Series};
use crate::error::{DatasetError, ExportError, LoadError, RangeError};
use crate::export::save_figure;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: PlotterConfig,

    /// Loaded traces in list order.
    pub dataset: Dataset,

    /// Currently selected list row.
    pub cursor: SelectionCursor,

    /// Applied x window.
    pub range: PlotRange,

    /// Text of the range entry fields.
    pub x_min_input: String,
    pub x_max_input: String,

    /// Series derived from the dataset (cached until the next change).
    pub series: Vec<Series>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// The plot view should jump back to `range` on the next frame.
    pub reset_view: bool,

    changes: Receiver<Change>,
}

/// Outcome of loading several files in one go.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub loaded: Vec<usize>,
    pub failed: Vec<LoadError>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(PlotterConfig::default())
    }
}

impl AppState {
    pub fn new(config: PlotterConfig) -> Self {
        let mut dataset = Dataset::new();
        let changes = dataset.subscribe();
        let range = PlotRange::default();
        Self {
            config,
            dataset,
            cursor: SelectionCursor::new(),
            range,
            x_min_input: format_bound(range.x_min),
            x_max_input: format_bound(range.x_max),
            series: Vec::new(),
            status_message: None,
            reset_view: true,
            changes,
        }
    }

    /// Load files one after another. A failing file is reported and skipped.
    pub fn open_paths(&mut self, paths: &[PathBuf]) -> LoadReport {
        let options = self.config.load_options();
        let mut report = LoadReport::default();
        for path in paths {
            match load_log(path, &options) {
                Ok(entry) => report.loaded.push(self.dataset.add(entry)),
                Err(e) => {
                    log::error!("Failed to load file: {e}");
                    report.failed.push(e);
                }
            }
        }
        self.status_message = match report.failed.as_slice() {
            [] => None,
            [only] => Some(format!("Error: {only}")),
            [first, rest @ ..] => Some(format!("Error: {first} (and {} more)", rest.len())),
        };
        report
    }

    pub fn select(&mut self, index: usize) -> Result<(), DatasetError> {
        self.cursor.select(index, self.dataset.len())
    }

    /// Remove the selected row. The selection stays on the same position.
    pub fn delete_selected(&mut self) -> Result<usize, DatasetError> {
        let index = self.cursor.require()?;
        self.dataset.delete(index)?;
        self.cursor
            .relocate(Change::Removed { index }, self.dataset.len());
        Ok(index)
    }

    /// Move the selected row by `shift` and keep it selected.
    pub fn move_selected(&mut self, shift: isize) -> Result<usize, DatasetError> {
        let index = self.cursor.require()?;
        let target = self.dataset.move_entry(index, shift)?;
        self.cursor.relocate(
            Change::Moved {
                from: index,
                to: target,
            },
            self.dataset.len(),
        );
        Ok(target)
    }

    pub fn delete_all(&mut self) {
        self.dataset.delete_all();
        self.cursor.clear();
    }

    pub fn toggle_enabled(&mut self, index: usize) -> Result<bool, DatasetError> {
        self.dataset.toggle_enabled(index)
    }

    pub fn set_flow_rate(&mut self, index: usize, value: f64) -> Result<(), DatasetError> {
        self.dataset.set_flow_rate(index, value)
    }

    /// Validate the range fields and apply them. The fields are rewritten to
    /// the normalised values.
    pub fn apply_range(&mut self) -> Result<PlotRange, RangeError> {
        let range = PlotRange::normalize(&self.x_min_input, &self.x_max_input)?;
        self.range = range;
        self.x_min_input = format_bound(range.x_min);
        self.x_max_input = format_bound(range.x_max);
        self.reset_view = true;
        log::debug!("x range set to {}..{}", range.x_min, range.x_max);
        Ok(range)
    }

    /// Recompute the series if the dataset changed since the last call.
    pub fn refresh(&mut self) -> bool {
        let pending = self.changes.try_iter().count();
        if pending == 0 {
            return false;
        }
        self.series = render_series(&self.dataset);
        self.reset_view = true;
        log::debug!(
            "recomputed {} series after {pending} change(s)",
            self.series.len()
        );
        true
    }

    pub fn export_figure(&mut self, path: &Path) -> Result<(), ExportError> {
        self.refresh();
        save_figure(&self.series, self.range, path, &self.config.export)
    }

    /// Non-blocking alert for actions that had nothing to act on.
    pub fn alert(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::warn!("{message}");
        self.status_message = Some(message);
    }

    /// Route an error from a list action into the status line.
    pub fn report(&mut self, action: &str, error: DatasetError) {
        match error {
            DatasetError::NothingSelected => self.alert(format!("{action}: select a file first")),
            other => {
                log::error!("{action} failed: {other}");
                self.status_message = Some(format!("Error: {other}"));
            }
        }
    }
}

fn format_bound(v: f64) -> String {
    format!("{v}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_log(dir: &Path, name: &str, body: &str) -> PathBuf {
        let path = dir.join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(body.as_bytes()).unwrap();
        path
    }

    fn state_with(names: &[&str]) -> (AppState, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let paths: Vec<PathBuf> = names
            .iter()
            .map(|n| write_log(dir.path(), n, "1\t10\n2\t20\n"))
            .collect();
        let mut state = AppState::default();
        let report = state.open_paths(&paths);
        assert!(report.failed.is_empty());
        (state, dir)
    }

    fn labels(state: &AppState) -> Vec<&str> {
        state.dataset.entries().iter().map(|e| e.filename()).collect()
    }

    #[test]
    fn batch_load_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_log(dir.path(), "good.txt", "1\t2\n");
        let empty = write_log(dir.path(), "empty.txt", "");
        let also_good = write_log(dir.path(), "also.txt", "3\t4\n");
        let mut state = AppState::default();

        let report = state.open_paths(&[good, empty, also_good]);
        assert_eq!(report.loaded, vec![0, 1]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(labels(&state), ["good.txt", "also.txt"]);
        assert!(state.status_message.as_deref().unwrap().contains("empty.txt"));
    }

    #[test]
    fn actions_without_selection_are_rejected() {
        let (mut state, _dir) = state_with(&["a", "b"]);
        assert_eq!(state.delete_selected(), Err(DatasetError::NothingSelected));
        assert_eq!(state.move_selected(1), Err(DatasetError::NothingSelected));
        assert_eq!(state.dataset.len(), 2);
        assert_eq!(labels(&state), ["a", "b"]);
    }

    #[test]
    fn report_turns_nothing_selected_into_alert() {
        let mut state = AppState::default();
        state.report("Remove file", DatasetError::NothingSelected);
        assert_eq!(
            state.status_message.as_deref(),
            Some("Remove file: select a file first")
        );
    }

    #[test]
    fn moved_row_stays_selected() {
        let (mut state, _dir) = state_with(&["a", "b", "c"]);
        state.select(0).unwrap();
        assert_eq!(state.move_selected(1), Ok(1));
        assert_eq!(state.cursor.current(), Some(1));
        assert_eq!(state.move_selected(5), Ok(2));
        assert_eq!(labels(&state), ["b", "c", "a"]);
        assert_eq!(state.cursor.current(), Some(2));
    }

    #[test]
    fn delete_keeps_cursor_in_bounds() {
        let (mut state, _dir) = state_with(&["a", "b", "c"]);
        state.select(2).unwrap();
        state.delete_selected().unwrap();
        assert_eq!(state.cursor.current(), Some(1));
        state.delete_selected().unwrap();
        state.delete_selected().unwrap();
        assert_eq!(state.cursor.current(), None);
        assert!(state.dataset.is_empty());
    }

    #[test]
    fn refresh_tracks_dataset_changes() {
        let (mut state, _dir) = state_with(&["a", "b"]);
        assert!(state.refresh());
        assert_eq!(state.series.len(), 2);
        assert!(!state.refresh());

        state.toggle_enabled(0).unwrap();
        assert!(state.refresh());
        assert!(!state.series[0].visible);

        state.set_flow_rate(1, 2.0).unwrap();
        state.refresh();
        assert_eq!(state.series[1].x, vec![2.0, 4.0]);
    }

    #[test]
    fn legend_mirrors_enabled_flags_and_order() {
        let (mut state, _dir) = state_with(&["a", "b", "b"]);
        state.refresh();
        state.toggle_enabled(1).unwrap();
        state.select(0).unwrap();
        state.move_selected(2).unwrap();
        state.refresh();

        let legend = crate::data::transform::legend_entries(&state.series);
        let names: Vec<&str> = legend.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["1: b", "2: b", "3: a"]);
        let shown: Vec<bool> = legend.iter().map(|e| e.visible).collect();
        let enabled: Vec<bool> = state.dataset.entries().iter().map(|e| e.enabled()).collect();
        assert_eq!(shown, enabled);
        assert_eq!(shown, [false, true, true]);
    }

    #[test]
    fn apply_range_normalises_inputs() {
        let mut state = AppState::default();
        state.x_min_input = "10".into();
        state.x_max_input = "5".into();
        state.reset_view = false;
        let range = state.apply_range().unwrap();
        assert_eq!((range.x_min, range.x_max), (10.0, 11.0));
        assert_eq!(state.x_max_input, "11");
        assert!(state.reset_view);

        state.x_min_input = "abc".into();
        assert!(state.apply_range().is_err());
        assert_eq!(state.range, range);
    }
}
