use std::sync::mpsc::{self, Receiver, Sender};

use crate::error::DatasetError;

// ---------------------------------------------------------------------------
// LogEntry – one loaded trace
// ---------------------------------------------------------------------------

/// A single chromatography trace together with its list/plot state.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    filename: String,
    /// Elution volume axis.
    volume: Vec<f64>,
    /// Fluorescence intensity, same length as `volume`.
    intensity: Vec<f64>,
    flow_rate: f64,
    enabled: bool,
}

impl LogEntry {
    /// Build an entry from `(volume, intensity)` rows.
    pub fn new(
        filename: impl Into<String>,
        rows: Vec<(f64, f64)>,
        flow_rate: f64,
    ) -> Result<Self, DatasetError> {
        if rows.is_empty() {
            return Err(DatasetError::EmptyTrace);
        }
        validate_flow_rate(flow_rate)?;
        let (volume, intensity) = rows.into_iter().unzip();
        Ok(LogEntry {
            filename: filename.into(),
            volume,
            intensity,
            flow_rate,
            enabled: true,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn volume(&self) -> &[f64] {
        &self.volume
    }

    pub fn intensity(&self) -> &[f64] {
        &self.intensity
    }

    pub fn flow_rate(&self) -> f64 {
        self.flow_rate
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.volume.len()
    }

    /// Never true for an entry built through `new`.
    pub fn is_empty(&self) -> bool {
        self.volume.is_empty()
    }
}

fn validate_flow_rate(value: f64) -> Result<(), DatasetError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DatasetError::InvalidFlowRate(value))
    }
}

// ---------------------------------------------------------------------------
// Change notifications
// ---------------------------------------------------------------------------

/// What happened to the dataset. Published to every subscriber after the
/// mutation has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Added { index: usize },
    Removed { index: usize },
    Moved { from: usize, to: usize },
    Cleared,
    /// Flow rate or enabled flag of one row changed; row order is intact.
    EntryUpdated { index: usize },
}

// ---------------------------------------------------------------------------
// List columns exposed to the table view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListColumn {
    Enabled,
    Number,
    Filename,
    FlowRate,
    Points,
}

impl ListColumn {
    pub const ALL: [ListColumn; 5] = [
        ListColumn::Enabled,
        ListColumn::Number,
        ListColumn::Filename,
        ListColumn::FlowRate,
        ListColumn::Points,
    ];

    pub fn title(self) -> &'static str {
        match self {
            ListColumn::Enabled => "Show",
            ListColumn::Number => "#",
            ListColumn::Filename => "File",
            ListColumn::FlowRate => "Flow rate",
            ListColumn::Points => "Points",
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the ordered collection behind list and plot
// ---------------------------------------------------------------------------

/// Ordered traces. Row order is table order, legend order and draw order.
#[derive(Debug, Default)]
pub struct Dataset {
    entries: Vec<LogEntry>,
    subscribers: Vec<Sender<Change>>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an observer. Disconnected receivers are dropped lazily.
    pub fn subscribe(&mut self) -> Receiver<Change> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LogEntry> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Append an entry and return its index.
    pub fn add(&mut self, entry: LogEntry) -> usize {
        self.entries.push(entry);
        let index = self.entries.len() - 1;
        log::debug!("added row {index} ({})", self.entries[index].filename);
        self.publish(Change::Added { index });
        index
    }

    pub fn delete(&mut self, index: usize) -> Result<LogEntry, DatasetError> {
        self.check_index(index)?;
        let removed = self.entries.remove(index);
        log::debug!("removed row {index} ({})", removed.filename);
        self.publish(Change::Removed { index });
        Ok(removed)
    }

    /// Shift the entry at `index` by `shift` positions, clamped to the ends.
    /// Returns the row it ended up on.
    pub fn move_entry(&mut self, index: usize, shift: isize) -> Result<usize, DatasetError> {
        self.check_index(index)?;
        let last = self.entries.len() - 1;
        // Vec lengths never exceed isize::MAX
        let target = (index as isize).saturating_add(shift).clamp(0, last as isize) as usize;
        if target == index {
            return Ok(index);
        }
        let entry = self.entries.remove(index);
        self.entries.insert(target, entry);
        log::debug!("moved row {index} -> {target}");
        self.publish(Change::Moved {
            from: index,
            to: target,
        });
        Ok(target)
    }

    /// Remove everything at once; observers see a single `Cleared`.
    pub fn delete_all(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let n = self.entries.len();
        self.entries.clear();
        log::debug!("cleared {n} rows");
        self.publish(Change::Cleared);
    }

    /// Flip the enabled flag and return its new value.
    pub fn toggle_enabled(&mut self, index: usize) -> Result<bool, DatasetError> {
        self.check_index(index)?;
        let entry = &mut self.entries[index];
        entry.enabled = !entry.enabled;
        let enabled = entry.enabled;
        self.publish(Change::EntryUpdated { index });
        Ok(enabled)
    }

    pub fn set_flow_rate(&mut self, index: usize, value: f64) -> Result<(), DatasetError> {
        self.check_index(index)?;
        validate_flow_rate(value)?;
        self.entries[index].flow_rate = value;
        self.publish(Change::EntryUpdated { index });
        Ok(())
    }

    // -- table accessors --

    pub fn row_count(&self) -> usize {
        self.entries.len()
    }

    pub fn column_count(&self) -> usize {
        ListColumn::ALL.len()
    }

    /// Display text of one table cell.
    pub fn cell(&self, row: usize, column: ListColumn) -> Option<String> {
        let entry = self.entries.get(row)?;
        Some(match column {
            ListColumn::Enabled => String::from(if entry.enabled { "yes" } else { "no" }),
            ListColumn::Number => (row + 1).to_string(),
            ListColumn::Filename => entry.filename.clone(),
            ListColumn::FlowRate => format!("{}", entry.flow_rate),
            ListColumn::Points => entry.len().to_string(),
        })
    }

    fn check_index(&self, index: usize) -> Result<(), DatasetError> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(DatasetError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            })
        }
    }

    fn publish(&mut self, change: Change) {
        self.subscribers.retain(|tx| tx.send(change).is_ok());
    }
}
