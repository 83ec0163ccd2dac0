//! # Order Admission Service
//!
//! Application service implementing `OrderAdmissionApi`.
//!
//! ## Architecture
//!
//! - Runs the pure admission circuit (domain layer)
//! - Asks the `ProofBackend` port for a proof only when the circuit succeeds
//! - On submission, checks the artifact and the root it was proven against,
//!   then hands `(PoolKey, orderCommitment)` to the `MatchingGateway` port

use crate::domain::{
    can_submit_order, eligibility_key, AdmissionError, AdmissionProof, AdmittedOrder,
    CanSubmitOrderPublicInput, Order,
};
use crate::ports::{MatchingGateway, OrderAdmissionApi, ProofBackend};
use dp_01_state_store::{AuthenticatedStateApi, MerkleMapWitness};
use rayon::prelude::*;
use shared_types::PoolKey;

/// Order Admission Service.
///
/// `S` supplies the committed root; every submission is checked against it.
pub struct OrderAdmissionService<B: ProofBackend, M: MatchingGateway, S: AuthenticatedStateApi> {
    backend: B,
    matching: M,
    state: S,
}

impl<B: ProofBackend, M: MatchingGateway, S: AuthenticatedStateApi> OrderAdmissionService<B, M, S> {
    pub fn new(backend: B, matching: M, state: S) -> Self {
        Self {
            backend,
            matching,
            state,
        }
    }

    /// Fetch the user's witness from committed state and prove the order.
    pub fn prove_with_current_state(
        &self,
        pool_key: PoolKey,
        order: &Order,
    ) -> Result<AdmissionProof, AdmissionError> {
        let (state_root, _, witness) = self
            .state
            .get_with_witness(&eligibility_key(&order.user))
            .map_err(AdmissionError::State)?;

        let input = CanSubmitOrderPublicInput {
            pool_key,
            state_root,
        };
        self.prove(&input, &witness, order)
    }

    /// Verify an artifact against the current root and forward it to matching.
    pub async fn submit(&self, proof: &AdmissionProof) -> Result<AdmittedOrder, AdmissionError> {
        self.verify_proof(proof)?;

        let current = self.state.state_root().map_err(AdmissionError::State)?;
        if proof.public_input.state_root != current {
            tracing::warn!(
                "[dp-02] Rejected admission proven against stale root {}",
                proof.public_input.state_root
            );
            return Err(AdmissionError::StaleStateRoot {
                proven: proof.public_input.state_root,
                current,
            });
        }

        let admitted = AdmittedOrder {
            pool_key: proof.public_output.pool_key,
            order_commitment: proof.public_output.order_commitment,
            state_root: current,
        };

        self.matching
            .submit_admitted(admitted)
            .await
            .map_err(|e| AdmissionError::SubmissionFailed(e.to_string()))?;

        tracing::info!(
            "[dp-02] Order {} admitted to pool ({}, {})",
            admitted.order_commitment,
            admitted.pool_key.token_a,
            admitted.pool_key.token_b
        );
        Ok(admitted)
    }
}

impl<B: ProofBackend, M: MatchingGateway, S: AuthenticatedStateApi> OrderAdmissionApi
    for OrderAdmissionService<B, M, S>
{
    fn prove(
        &self,
        input: &CanSubmitOrderPublicInput,
        witness: &MerkleMapWitness,
        order: &Order,
    ) -> Result<AdmissionProof, AdmissionError> {
        let public_output = can_submit_order(input, witness, order).map_err(|e| {
            tracing::debug!("[dp-02] Admission circuit failed: {}", e);
            e
        })?;
        let proof = self.backend.prove(input, &public_output)?;

        Ok(AdmissionProof {
            public_input: *input,
            public_output,
            proof,
        })
    }

    fn prove_batch(
        &self,
        requests: &[(CanSubmitOrderPublicInput, MerkleMapWitness, Order)],
    ) -> Vec<Result<AdmissionProof, AdmissionError>> {
        requests
            .par_iter()
            .map(|(input, witness, order)| self.prove(input, witness, order))
            .collect()
    }

    fn verify_proof(&self, proof: &AdmissionProof) -> Result<(), AdmissionError> {
        if !self.backend.verify(proof) {
            return Err(AdmissionError::ProofRejected);
        }
        if !proof.public_output.can_submit
            || proof.public_output.pool_key != proof.public_input.pool_key
        {
            return Err(AdmissionError::NotAdmitted);
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
