use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Load boundary
// ---------------------------------------------------------------------------

/// A log file could not be turned into a trace.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: no (volume, intensity) rows found", path.display())]
    Empty { path: PathBuf },

    #[error("{}, line {line}: expected at least two numeric columns", path.display())]
    MissingColumn { path: PathBuf, line: u64 },

    #[error("{}, line {line}: '{field}' is not a number", path.display())]
    NotANumber {
        path: PathBuf,
        line: u64,
        field: String,
    },

    #[error("{}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{}: {source}", path.display())]
    Rejected {
        path: PathBuf,
        #[source]
        source: DatasetError,
    },
}

impl LoadError {
    /// Path of the file that failed to load.
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::Io { path, .. }
            | LoadError::Empty { path }
            | LoadError::MissingColumn { path, .. }
            | LoadError::NotANumber { path, .. }
            | LoadError::Csv { path, .. }
            | LoadError::Rejected { path, .. } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset / selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasetError {
    #[error("row {index} is out of range (dataset has {len} rows)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("flow rate must be a positive number, got {0}")]
    InvalidFlowRate(f64),

    #[error("a trace needs at least one (volume, intensity) row")]
    EmptyTrace,

    #[error("nothing selected")]
    NothingSelected,
}

// ---------------------------------------------------------------------------
// Range entry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    #[error("invalid {field}: '{input}' is not a number")]
    InvalidRange { field: &'static str, input: String },
}

// ---------------------------------------------------------------------------
// Export boundary
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported image format '{0}' (use .png or .svg)")]
    UnsupportedFormat(String),

    #[error("drawing figure failed: {0}")]
    Draw(String),
}
