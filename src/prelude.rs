//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the funnelgraph crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use funnelgraph::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let store = FileSnapshotStore::new(".funnel", DEFAULT_STORAGE_KEY);
//! let mut editor = FunnelEditor::builder(store).build();
//!
//! let json = std::fs::read_to_string("path/to/funnel.json")?;
//! editor.import_json(&json)?;
//!
//! println!("Status: {:?}", editor.status());
//! # Ok(())
//! # }
//! ```

// Editing
pub use crate::config::{DEFAULT_STORAGE_KEY, DuplicatePolicy, FunnelConfig};
pub use crate::editor::{DropOutcome, FunnelEditor, FunnelEditorBuilder, example_funnel};

// Graph model
pub use crate::graph::{
    ApplyReport, EdgeChange, FunnelEdge, FunnelNode, GraphStore, NodeChange, NodeSize, Position,
    Reconnection, Snapshot, StepData,
};
pub use crate::step::{StepConfig, StepType};

// Diagnostics
pub use crate::validation::{Severity, ValidationIssue, ValidationStatus, annotate, validate};

// Persistence
pub use crate::persistence::{
    EXPORT_FILE_NAME, FileSnapshotStore, MemorySnapshotStore, SnapshotStore,
};

// Error types
pub use crate::error::{ConnectionError, InterchangeError, PersistenceError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
