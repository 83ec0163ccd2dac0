//! # Attestation Backend
//!
//! A transparent stand-in for a zero-knowledge prover. The proof is a keyed
//! SHA3-256 digest over the public input and public output, so anyone
//! holding the key can check that the circuit ran for exactly these public
//! values.
//!
//! ## Security Properties
//!
//! - Binding: changing any public field invalidates the proof
//! - Not zero-knowledge and not publicly verifiable: verifiers share the key
//! - Key material is zeroized on drop

use crate::domain::{
    AdmissionError, AdmissionProof, CanSubmitOrderPublicInput, CanSubmitOrderPublicOutput,
    ProofBlob,
};
use crate::ports::ProofBackend;
use rand::RngCore;
use sha3::{Digest, Sha3_256};
use shared_types::ToFields;
use zeroize::{Zeroize, ZeroizeOnDrop};

const ATTESTATION_DOMAIN: &[u8] = b"dark-pool/can-submit-order/v1";

/// Keyed-digest proof backend.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct AttestationBackend {
    key: [u8; 32],
}

impl AttestationBackend {
    pub fn new(key: [u8; 32]) -> Self {
        Self { key }
    }

    /// Backend with a fresh random key.
    pub fn generate() -> Self {
        let mut key = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut key);
        Self { key }
    }

    fn attest(
        &self,
        input: &CanSubmitOrderPublicInput,
        output: &CanSubmitOrderPublicOutput,
    ) -> [u8; 32] {
        let mut hasher = Sha3_256::new();
        hasher.update(ATTESTATION_DOMAIN);
        hasher.update(self.key);
        for field in input.to_fields().iter().chain(output.to_fields().iter()) {
            hasher.update(field.as_bytes());
        }
        hasher.finalize().into()
    }
}

impl ProofBackend for AttestationBackend {
    fn prove(
        &self,
        input: &CanSubmitOrderPublicInput,
        output: &CanSubmitOrderPublicOutput,
    ) -> Result<ProofBlob, AdmissionError> {
        Ok(ProofBlob(self.attest(input, output).to_vec()))
    }

    fn verify(&self, proof: &AdmissionProof) -> bool {
        let expected = self.attest(&proof.public_input, &proof.public_output);
        proof.proof.0.as_slice() == expected.as_slice()
    }
}

impl std::fmt::Debug for AttestationBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttestationBackend").finish_non_exhaustive()
    }
}
