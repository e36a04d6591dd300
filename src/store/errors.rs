//! Dataset store errors

use std::io;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised while loading or mutating the dataset
#[derive(Debug, Error)]
pub enum StoreError {
    /// Dataset file could not be read
    #[error("Failed to read dataset: {0}")]
    Io(#[from] io::Error),

    /// Dataset file is not valid JSON
    #[error("Failed to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    /// Top-level JSON value is not an array
    #[error("Dataset must be a JSON array of records")]
    NotAnArray,

    /// A record failed validation during load
    #[error("Invalid record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// A record with the same id already exists
    #[error("Duplicate record id: {0}")]
    DuplicateId(String),

    /// No record carries the given id
    #[error("No record with id: {0}")]
    NotFound(String),

    /// The shared dataset lock was poisoned by a panicking writer
    #[error("Dataset lock poisoned")]
    LockPoisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            StoreError::DuplicateId("25".to_string()).to_string(),
            "Duplicate record id: 25"
        );
        let err = StoreError::InvalidRecord {
            index: 3,
            reason: "missing id".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid record at index 3: missing id");
    }
}
