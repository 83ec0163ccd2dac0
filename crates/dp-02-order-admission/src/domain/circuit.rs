//! # Admission Circuit
//!
//! `can_submit_order` is the provable statement:
//!
//! ```text
//! (root, key) = witness.compute_root_and_key(true)
//! root == public_input.state_root          else InvalidStateProof
//! key  == hash_fields(order.user.to_fields())  else IdentityMismatch
//! output = { pool_key, can_submit: true, order_commitment: order.hash() }
//! ```
//!
//! It is pure and deterministic: the same inputs always give the same
//! output, and it never reads the store.

use super::{
    AdmissionError, CanSubmitOrderPublicInput, CanSubmitOrderPublicOutput, Order,
};
use dp_01_state_store::{verify_witness, MerkleMapWitness, StateKey};
use shared_crypto::PublicKey;
use shared_types::{hash_fields, Field, ToFields};

/// Leaf value marking a user as eligible.
pub const ELIGIBLE: Field = Field::ONE;

/// Store key of a user's eligibility flag.
pub fn eligibility_key(user: &PublicKey) -> StateKey {
    hash_fields(&user.to_fields())
}

/// Check that `order.user` holds the eligibility flag under
/// `input.state_root`, and commit to the order.
pub fn can_submit_order(
    input: &CanSubmitOrderPublicInput,
    witness: &MerkleMapWitness,
    order: &Order,
) -> Result<CanSubmitOrderPublicOutput, AdmissionError> {
    let (_, witness_key) = verify_witness(&input.state_root, witness, Some(ELIGIBLE))
        .map_err(AdmissionError::InvalidStateProof)?;

    let user_key = eligibility_key(&order.user);
    if user_key != witness_key {
        return Err(AdmissionError::IdentityMismatch {
            witness_key,
            user_key,
        });
    }

    Ok(CanSubmitOrderPublicOutput {
        pool_key: input.pool_key,
        can_submit: true,
        order_commitment: order.hash(),
    })
}
