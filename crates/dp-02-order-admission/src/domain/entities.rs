//! # Admission Wire Types
//!
//! Public input, public output and proof make up the artifact exchanged with
//! verifiers. The witness and the order are private inputs and never appear
//! here.

use dp_01_state_store::StateRoot;
use serde::{Deserialize, Serialize};
use shared_types::{Field, PoolKey, ToFields};

/// Public input: the pool targeted and the root the witness is checked against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanSubmitOrderPublicInput {
    pub pool_key: PoolKey,
    pub state_root: StateRoot,
}

impl ToFields for CanSubmitOrderPublicInput {
    fn to_fields(&self) -> Vec<Field> {
        let mut fields = self.pool_key.to_fields();
        fields.push(self.state_root);
        fields
    }
}

/// Public output of a successful admission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanSubmitOrderPublicOutput {
    pub pool_key: PoolKey,
    pub can_submit: bool,
    /// `Order::hash()` of the private order.
    pub order_commitment: Field,
}

impl ToFields for CanSubmitOrderPublicOutput {
    fn to_fields(&self) -> Vec<Field> {
        let mut fields = self.pool_key.to_fields();
        fields.push(Field::from(self.can_submit));
        fields.push(self.order_commitment);
        fields
    }
}

/// Opaque proof bytes produced by a [`crate::ports::ProofBackend`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofBlob(pub Vec<u8>);

/// The admission artifact: (public input, public output, proof).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmissionProof {
    pub public_input: CanSubmitOrderPublicInput,
    pub public_output: CanSubmitOrderPublicOutput,
    pub proof: ProofBlob,
}

impl AdmissionProof {
    /// JSON encoding for transport.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

/// What matching receives after a proof is accepted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdmittedOrder {
    pub pool_key: PoolKey,
    pub order_commitment: Field,
    /// Root the eligibility was proven against.
    pub state_root: StateRoot,
}
