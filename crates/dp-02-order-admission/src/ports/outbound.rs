use crate::domain::{
    AdmissionError, AdmissionProof, AdmittedOrder, CanSubmitOrderPublicInput,
    CanSubmitOrderPublicOutput, ProofBlob,
};
use thiserror::Error;

/// Proof system behind the admission statement.
///
/// `prove` is only called after the circuit succeeded, so a backend never
/// sees a failing statement.
pub trait ProofBackend: Send + Sync {
    fn prove(
        &self,
        input: &CanSubmitOrderPublicInput,
        output: &CanSubmitOrderPublicOutput,
    ) -> Result<ProofBlob, AdmissionError>;

    fn verify(&self, proof: &AdmissionProof) -> bool;
}

/// Error from the matching side of the handoff.
#[derive(Debug, Error)]
pub enum MatchingError {
    #[error("Matching queue closed")]
    Closed,

    #[error("Order rejected by matching: {reason}")]
    Rejected { reason: String },
}

/// Gateway to the external matching process.
#[async_trait::async_trait]
pub trait MatchingGateway: Send + Sync {
    /// Hand over an admitted order commitment.
    async fn submit_admitted(&self, order: AdmittedOrder) -> Result<(), MatchingError>;
}
