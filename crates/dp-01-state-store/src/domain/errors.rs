use super::{StateKey, StateRoot};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("State root mismatch: expected {expected}, got {actual}")]
    StateRootMismatch {
        expected: StateRoot,
        actual: StateRoot,
    },

    #[error("Malformed witness: expected {expected} levels, got {actual}")]
    MalformedWitness { expected: usize, actual: usize },

    #[error("Store capacity exceeded: max {max} entries")]
    CapacityExceeded { max: usize },

    #[error("Cannot decode value at {key} as {expected}")]
    ValueDecode {
        key: StateKey,
        expected: &'static str,
    },

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Unsupported snapshot version {0}")]
    UnsupportedSnapshotVersion(u8),
}
