use dp_01_state_store::{StateError, StateKey, StateRoot};
use thiserror::Error;

/// Reasons an order is refused admission.
///
/// Circuit failures (`InvalidStateProof`, `IdentityMismatch`) never yield a
/// proof artifact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdmissionError {
    /// The witness does not recompute to the claimed root.
    #[error("Invalid state proof: {0}")]
    InvalidStateProof(StateError),

    /// The witness proves a key other than the user's eligibility key.
    #[error("Identity mismatch: witness key {witness_key}, user key {user_key}")]
    IdentityMismatch {
        witness_key: StateKey,
        user_key: StateKey,
    },

    /// The proof was built against a root that is no longer current.
    #[error("Stale state root: proof for {proven}, current {current}")]
    StaleStateRoot { proven: StateRoot, current: StateRoot },

    /// The backend refused the proof artifact.
    #[error("Proof verification failed")]
    ProofRejected,

    /// The artifact's public output does not admit the order.
    #[error("Order not admitted by public output")]
    NotAdmitted,

    #[error("Proof backend error: {0}")]
    Backend(String),

    #[error("State read failed: {0}")]
    State(StateError),

    #[error("Handoff to matching failed: {0}")]
    SubmissionFailed(String),
}
