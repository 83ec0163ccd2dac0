//! # Signed Requests
//!
//! Every state mutation reaches the sequencer as a [`SignedTransaction`].
//! The signature covers `Keccak256(bincode(sender, nonce, call))`, which is
//! also the transaction hash handed back to the submitter.

use super::SequencerError;
use serde::{Deserialize, Serialize};
use shared_crypto::{keccak256, Address, KeyPair, PublicKey, Signature};
use shared_types::{Balance, Hash, TokenId};

/// State-mutating entry points of the runtime.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuntimeCall {
    /// `TokenRegistry.addTokenId(tokenId)`
    AddTokenId { token_id: TokenId },
    /// `Balances.addBalance(tokenId, address, amount)`
    AddBalance {
        token_id: TokenId,
        address: Address,
        amount: Balance,
    },
    /// Move `amount` of `token_id` from the sender to `to`.
    Transfer {
        token_id: TokenId,
        to: Address,
        amount: Balance,
    },
    /// Grant or revoke a user's order-admission flag.
    SetEligibility { user: PublicKey, eligible: bool },
}

impl RuntimeCall {
    pub fn name(&self) -> &'static str {
        match self {
            RuntimeCall::AddTokenId { .. } => "addTokenId",
            RuntimeCall::AddBalance { .. } => "addBalance",
            RuntimeCall::Transfer { .. } => "transfer",
            RuntimeCall::SetEligibility { .. } => "setEligibility",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedTransaction {
    pub sender: PublicKey,
    pub nonce: u64,
    pub call: RuntimeCall,
    pub signature: Signature,
}

impl SignedTransaction {
    /// Build and sign a request from `signer`.
    pub fn sign(signer: &KeyPair, nonce: u64, call: RuntimeCall) -> Result<Self, SequencerError> {
        let sender = signer.public_key();
        let hash = signing_hash(&sender, nonce, &call)?;
        Ok(Self {
            sender,
            nonce,
            call,
            signature: signer.sign(&hash),
        })
    }

    /// Transaction hash (the signed message).
    pub fn hash(&self) -> Result<Hash, SequencerError> {
        signing_hash(&self.sender, self.nonce, &self.call)
    }

    /// Check the signature against `sender`.
    pub fn verify(&self) -> Result<Hash, SequencerError> {
        let hash = self.hash()?;
        self.sender
            .verify(&hash, &self.signature)
            .map_err(|_| SequencerError::InvalidSignature)?;
        Ok(hash)
    }
}

fn signing_hash(sender: &PublicKey, nonce: u64, call: &RuntimeCall) -> Result<Hash, SequencerError> {
    let encoded = bincode::serialize(&(sender, nonce, call))
        .map_err(|e| SequencerError::Serialization(e.to_string()))?;
    Ok(keccak256(&encoded))
}
