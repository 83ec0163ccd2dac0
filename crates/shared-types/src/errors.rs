//! # Error Types
//!
//! Errors raised while constructing shared value types.

use thiserror::Error;

/// Errors from parsing or narrowing shared types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// Hex string could not be decoded.
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Input is wider than a field element.
    #[error("Value of {len} bytes does not fit in a field element")]
    FieldOverflow { len: usize },
}
