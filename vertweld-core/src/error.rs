//! Error types for vertweld

use thiserror::Error;

/// Main error type for vertweld operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Inconsistent mesh buffers: {attribute} holds {actual} tuples, expected {expected}")]
    InconsistentBuffers {
        attribute: String,
        expected: usize,
        actual: usize,
    },

    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: usize, vertex_count: usize },

    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

/// Result type alias for vertweld operations
pub type Result<T> = std::result::Result<T, Error>;
