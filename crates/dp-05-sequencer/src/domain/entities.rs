use dp_01_state_store::StateRoot;
use dp_03_token_registry::RegistryConfig;
use serde::{Deserialize, Serialize};
use shared_crypto::PublicKey;

/// Settlement outcome of a submitted request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Applied; `root` is the state root right after this request.
    Included { root: StateRoot, block: u64 },
    /// Refused; no state changed.
    Rejected { reason: String },
}

impl TransactionStatus {
    pub fn is_included(&self) -> bool {
        matches!(self, TransactionStatus::Included { .. })
    }
}

/// Sequencer configuration.
#[derive(Clone, Debug)]
pub struct SequencerConfig {
    /// Bound of the submission queue.
    pub channel_capacity: usize,
    /// Requests applied per block.
    pub max_batch_size: usize,
    /// Key allowed to change eligibility. `None` lets any signer do it.
    pub admin: Option<PublicKey>,
    pub registry: RegistryConfig,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1024,
            max_batch_size: 64,
            admin: None,
            registry: RegistryConfig::default(),
        }
    }
}
