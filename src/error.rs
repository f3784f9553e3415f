//! Error types for aql-builder.
//!
//! Every failure surfaces while a node is being constructed. Rendering a node
//! that was built successfully cannot fail.

use thiserror::Error;

/// Query-build error
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AqlError {
    #[error("Cast error: {0}")]
    Cast(String),

    #[error("Invalid collection name: {0}")]
    InvalidCollectionName(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Invalid predecessor: {0}")]
    InvalidPredecessor(String),
}

/// Result type for node construction
pub type AqlResult<T> = Result<T, AqlError>;

impl serde::Serialize for AqlError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
