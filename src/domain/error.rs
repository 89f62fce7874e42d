//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::record::RecordId;

/// Domain errors represent caller-input violations.
///
/// All of them are raised before a tree is handed out or mutated, so a failed
/// call never leaves partial state behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("{0} is mandatory")]
    MissingArgument(&'static str),

    #[error("config property {0} is not set")]
    InvalidConfig(&'static str),

    #[error("record at position {position} has no usable value in field '{field}'")]
    InvalidRecord { position: usize, field: String },

    #[error("duplicate id: {0}")]
    DuplicateId(RecordId),

    #[error("cycle detected in hierarchy at id: {0}")]
    CycleDetected(RecordId),
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, TreeError>;
