//! # ECDSA Identities (secp256k1)
//!
//! User identities and request signatures.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Public keys are validated as curve points on construction
//! - Secret key copies are zeroized
//!
//! ## Use Cases
//!
//! - Order ownership (the `user` of an order)
//! - Ledger owners (balances are keyed by public key)
//! - Signing state-mutating requests submitted to the sequencer

use crate::CryptoError;
use k256::ecdsa::{
    signature::{Signer, Verifier},
    Signature as K256Signature, SigningKey, VerifyingKey,
};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};
use sha3::{Digest, Keccak256};
use shared_types::{Field, ToFields};
use std::fmt;
use zeroize::Zeroize;

/// Compressed secp256k1 public key (33 bytes).
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PublicKey(#[serde_as(as = "Bytes")] [u8; 33]);

/// Ledger owners are identified by their public key.
pub type Address = PublicKey;

impl PublicKey {
    /// Create from compressed bytes (33 bytes, starting with 0x02 or 0x03).
    pub fn from_bytes(bytes: [u8; 33]) -> Result<Self, CryptoError> {
        VerifyingKey::from_sec1_bytes(&bytes).map_err(|_| CryptoError::InvalidPublicKey)?;
        Ok(Self(bytes))
    }

    /// Parse from hex (with or without `0x`).
    pub fn from_hex(s: &str) -> Result<Self, CryptoError> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let decoded = hex::decode(s).map_err(|e| CryptoError::InvalidInput(e.to_string()))?;
        let bytes: [u8; 33] = decoded
            .try_into()
            .map_err(|_| CryptoError::InvalidPublicKey)?;
        Self::from_bytes(bytes)
    }

    /// Get raw compressed bytes.
    pub fn as_bytes(&self) -> &[u8; 33] {
        &self.0
    }

    /// Hex encoding with `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// x-coordinate of the point.
    pub fn x(&self) -> Field {
        let mut x = [0u8; 32];
        x.copy_from_slice(&self.0[1..]);
        Field::from_bytes(x)
    }

    /// Parity of the y-coordinate.
    pub fn is_odd(&self) -> bool {
        self.0[0] == 0x03
    }

    /// Verify a signature over `message`.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), CryptoError> {
        let verifying_key =
            VerifyingKey::from_sec1_bytes(&self.0).map_err(|_| CryptoError::InvalidPublicKey)?;

        let sig =
            K256Signature::from_slice(&signature.0).map_err(|_| CryptoError::InvalidSignature)?;

        verifying_key
            .verify(message, &sig)
            .map_err(|_| CryptoError::SignatureVerificationFailed)
    }
}

impl ToFields for PublicKey {
    /// `[x, is_odd]`, the same shape a circuit sees.
    fn to_fields(&self) -> Vec<Field> {
        vec![self.x(), Field::from(self.is_odd())]
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// ECDSA signature (64 bytes, r||s format).
#[serde_as]
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(#[serde_as(as = "Bytes")] [u8; 64]);

impl Signature {
    /// Create from bytes (64 bytes).
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature(0x{}..)", hex::encode(&self.0[..8]))
    }
}

/// secp256k1 ECDSA keypair.
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate random keypair.
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes). The input copy is zeroized.
    pub fn from_bytes(mut bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let result = SigningKey::from_bytes((&bytes).into());
        bytes.zeroize();
        let signing_key = result.map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Get public key (compressed, 33 bytes).
    pub fn public_key(&self) -> PublicKey {
        let sec1_bytes = self.signing_key.verifying_key().to_sec1_bytes();
        // SEC1 compressed encoding is always 33 bytes: parity prefix + x
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(&sec1_bytes[..33]);
        PublicKey(bytes)
    }

    /// Sign a message (deterministic RFC 6979).
    pub fn sign(&self, message: &[u8]) -> Signature {
        let sig: K256Signature = self.signing_key.sign(message);
        Signature(sig.to_bytes().into())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key())
            .finish_non_exhaustive()
    }
}

/// Keccak-256 of `data`.
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}
