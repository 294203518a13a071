//! Error types.

use thiserror::Error;

use crate::ObjectId;

/// Errors raised by topology and document edits.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EditError {
    #[error("Polygon not found: {0}")]
    PolygonNotFound(ObjectId),
    #[error("Edge index {index} out of range for {len} edges")]
    EdgeOutOfRange { index: usize, len: usize },
    #[error("Vertex index {index} out of range for {len} vertices")]
    VertexOutOfRange { index: usize, len: usize },
    #[error("Polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),
    #[error("Polygon is degenerate: {0}")]
    DegeneratePolygon(String),
}

/// Result type for edit operations.
pub type EditResult<T> = Result<T, EditError>;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
