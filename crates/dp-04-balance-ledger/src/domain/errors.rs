use dp_01_state_store::StateError;
use shared_types::{Balance, TokenId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Balance overflow for token {token_id}")]
    Overflow { token_id: TokenId },

    #[error("Insufficient balance: have {available}, need {required}")]
    InsufficientBalance {
        available: Balance,
        required: Balance,
    },

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Submission failed: {0}")]
    Submission(String),
}
