use dp_01_state_store::StateError;
use dp_03_token_registry::RegistryError;
use dp_04_balance_ledger::LedgerError;
use shared_crypto::PublicKey;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequencerError {
    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Invalid nonce: expected {expected}, got {actual}")]
    InvalidNonce { expected: u64, actual: u64 },

    #[error("Sender {0} is not authorized for this call")]
    Unauthorized(PublicKey),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Sequencer is not running")]
    ChannelClosed,
}
