//! # funnelgraph - Funnel Graph Model and Validation Engine
//!
//! **funnelgraph** is the core behind a visual sales-funnel builder. A funnel is a
//! small directed graph of typed steps (sales page, checkout, upsell, downsell,
//! thank-you) placed on a canvas and joined by connections. This crate owns that
//! graph: which mutations are legal, which diagnostics the user should see, and
//! how the whole thing is saved, exported and imported. Rendering, gestures and
//! toolbars are left to the host, which talks to the crate through
//! [`editor::FunnelEditor`].
//!
//! ## Core Workflow
//!
//! 1.  **Build an editor** around a [`persistence::SnapshotStore`]. The last saved
//!     snapshot is restored on startup; a missing or malformed one leaves the
//!     funnel empty.
//! 2.  **Mutate** through the editor: add steps, connect them (directly, or by
//!     dropping one step onto another), re-point connections, apply canvas
//!     change batches, clear, or load the example funnel.
//! 3.  **Read back** the annotated nodes, connections and validation issues. They
//!     are recomputed and the snapshot is saved after every committed change.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use funnelgraph::prelude::*;
//!
//! let mut editor = FunnelEditor::builder(MemorySnapshotStore::new()).build();
//!
//! let sales = editor.add_node(StepType::Sales, Position::new(0.0, 0.0));
//! let checkout = editor.add_node(StepType::Order, Position::new(0.0, 150.0));
//! let thanks = editor.add_node(StepType::ThankYou, Position::new(0.0, 300.0));
//!
//! editor.connect(&sales, &checkout).expect("sales pages may lead to checkout");
//! editor.connect(&checkout, &thanks).expect("checkout may lead to thank-you");
//!
//! // Thank-you steps end a funnel.
//! assert!(editor.connect(&thanks, &sales).is_err());
//!
//! for issue in editor.issues() {
//!     println!("{:?}: {}", issue.severity, issue.message);
//! }
//! println!("{}", editor.export_json().expect("funnel serializes"));
//! ```

pub mod config;
pub mod editor;
pub mod error;
pub mod graph;
pub mod persistence;
pub mod prelude;
pub mod step;
pub mod validation;
