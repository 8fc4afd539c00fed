/// Data layer: traces, loading, selection and the plot transform.
///
/// Architecture:
/// ```text
///   log file (.txt / .csv)
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → LogEntry
///   └──────────┘
///        │ add / delete / move
///        ▼
///   ┌─────────┐  Change   ┌────────────────┐
///   │ Dataset │ ────────► │ SelectionCursor│
///   └─────────┘           └────────────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ transform │  scale by flow rate, assign colours → Vec<Series>
///   └───────────┘
/// ```

pub mod loader;
pub mod model;
pub mod range;
pub mod selection;
pub mod transform;
