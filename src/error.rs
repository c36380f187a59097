use thiserror::Error;

/// A mutation that was refused. The graph is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    #[error("{message}")]
    ThankYouSource { node_id: String, message: String },

    #[error("Step '{node_id}' cannot be connected to itself")]
    SelfConnection { node_id: String },

    #[error("Step '{source_id}' is already connected to '{target_id}'")]
    DuplicateConnection {
        source_id: String,
        target_id: String,
    },

    #[error("Step '{node_id}' does not exist in this funnel")]
    NodeNotFound { node_id: String },

    #[error("Connection '{edge_id}' does not exist in this funnel")]
    EdgeNotFound { edge_id: String },
}

impl ConnectionError {
    pub(crate) fn thank_you_source(node_id: &str, message: &str) -> Self {
        ConnectionError::ThankYouSource {
            node_id: node_id.to_string(),
            message: message.to_string(),
        }
    }
}

/// Errors raised while reading a funnel document (import or snapshot load).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InterchangeError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid format: field '{field}' is missing or is not a list")]
    MissingSequence { field: &'static str },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Connection '{edge_id}' references step '{node_id}', which is not in the document")]
    DanglingEdge { edge_id: String, node_id: String },

    #[error("Step id '{0}' appears more than once in the document")]
    DuplicateNodeId(String),

    #[error("Connection id '{0}' appears more than once in the document")]
    DuplicateEdgeId(String),

    #[error("Connection '{edge_id}' leaves thank-you step '{node_id}'")]
    ThankYouSource { edge_id: String, node_id: String },
}

/// Errors raised by a snapshot store or by writing an export file.
#[derive(Error, Debug, Clone)]
pub enum PersistenceError {
    #[error("Could not access '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Interchange(#[from] InterchangeError),
}

impl PersistenceError {
    pub(crate) fn io(path: &std::path::Path, err: std::io::Error) -> Self {
        PersistenceError::Io {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
