use crate::domain::{AdmissionError, AdmissionProof, CanSubmitOrderPublicInput, Order};
use dp_01_state_store::MerkleMapWitness;

/// Primary Order Admission API.
///
/// Implementations must be thread-safe (`Send + Sync`).
pub trait OrderAdmissionApi: Send + Sync {
    /// Run the admission circuit and produce the wire artifact.
    ///
    /// # Errors
    /// * `InvalidStateProof` - witness does not match `input.state_root`
    /// * `IdentityMismatch` - witness is for a different user
    fn prove(
        &self,
        input: &CanSubmitOrderPublicInput,
        witness: &MerkleMapWitness,
        order: &Order,
    ) -> Result<AdmissionProof, AdmissionError>;

    /// Prove many independent submissions. Results keep input order.
    fn prove_batch(
        &self,
        requests: &[(CanSubmitOrderPublicInput, MerkleMapWitness, Order)],
    ) -> Vec<Result<AdmissionProof, AdmissionError>>;

    /// Check an artifact received from elsewhere.
    fn verify_proof(&self, proof: &AdmissionProof) -> Result<(), AdmissionError>;
}
