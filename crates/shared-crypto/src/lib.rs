//! # Shared Crypto
//!
//! secp256k1 identities for users, ledger owners and request signers.
//!
//! | Item | Algorithm | Use Case |
//! |------|-----------|----------|
//! | [`PublicKey`] | secp256k1 (compressed) | user identity, ledger owner |
//! | [`KeyPair`] | ECDSA, RFC 6979 | signing sequencer requests |
//! | [`keccak256`] | Keccak-256 | request hashing |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;

pub use ecdsa::{keccak256, Address, KeyPair, PublicKey, Signature};
pub use errors::CryptoError;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
