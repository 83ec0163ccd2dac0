use dp_01_state_store::StateError;
use shared_types::{TokenId, TokenIdId};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Token {token_id} already registered as {existing}")]
    AlreadyRegistered {
        token_id: TokenId,
        existing: TokenIdId,
    },

    #[error("Registry full: max {max} tokens")]
    RegistryFull { max: u64 },

    #[error("State error: {0}")]
    State(#[from] StateError),
}
