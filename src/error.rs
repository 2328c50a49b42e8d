//! Error types for the vector store

use thiserror::Error;

/// Result type alias for vdb operations
pub type Result<T> = std::result::Result<T, VdbError>;

/// Error types that can occur in vdb operations
#[derive(Error, Debug)]
pub enum VdbError {
    /// A required argument was absent. References cannot be null, so no
    /// library operation produces this; it exists so `code()` covers the
    /// whole numeric taxonomy.
    #[error("Required argument is missing")]
    NullPointer,

    #[error("Invalid dimensions: a store needs at least one dimension")]
    InvalidDimensions,

    #[error("Out of memory: could not reserve space for {requested} vectors")]
    OutOfMemory { requested: usize },

    #[error("Vector not found: {id}")]
    NotFound { id: String },

    #[error("Invalid index {index}: store holds {count} vectors")]
    InvalidIndex { index: usize, count: usize },

    #[error("Store lock failure: {0}")]
    ThreadFailure(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Invalid vector: {reason}")]
    InvalidVector { reason: String },

    #[error("Corrupt store file: {reason}")]
    CorruptFile { reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl VdbError {
    /// Stable numeric code for this error.
    ///
    /// The six base variants keep the classic codes `-1..=-6`; the remaining
    /// variants report the closest base class.
    pub fn code(&self) -> i32 {
        match self {
            VdbError::NullPointer => -1,
            VdbError::InvalidDimensions => -2,
            VdbError::OutOfMemory { .. } => -3,
            VdbError::NotFound { .. } => -4,
            VdbError::InvalidIndex { .. } => -5,
            VdbError::ThreadFailure(_) => -6,
            VdbError::DimensionMismatch { .. } | VdbError::InvalidVector { .. } => -1,
            VdbError::CorruptFile { .. } | VdbError::IoError(_) => -3,
        }
    }

    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        VdbError::CorruptFile {
            reason: reason.into(),
        }
    }
}
