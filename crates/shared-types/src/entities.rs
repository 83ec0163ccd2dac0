//! # Core Domain Entities
//!
//! Identifiers shared by the registry, the ledger and order admission.
//!
//! ## Type Decisions
//!
//! - `TokenId` wraps `U256`: external token identifiers are arbitrary-width
//!   integers and `U256` matches the field width exactly.
//! - `TokenIdId` is a `u64`: it is a dense counter, never a hash.
//! - `Balance` is `u128`, sufficient for any practical supply.

use crate::field::Field;
use crate::hashing::ToFields;
use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export U256 from primitive-types for use across all subsystems
pub use primitive_types::U256;

/// A 32-byte digest (SHA3 or Keccak output).
pub type Hash = [u8; 32];

/// Unsigned token amount.
pub type Balance = u128;

/// Externally-facing token identifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenId(pub U256);

impl TokenId {
    /// Token id from a small integer.
    pub fn from_u64(value: u64) -> Self {
        Self(U256::from(value))
    }

    /// Field encoding of this id.
    pub fn to_field(&self) -> Field {
        Field::from(self.0)
    }

    /// Decode from a field element. Every field is a valid token id.
    pub fn from_field(field: Field) -> Self {
        Self(field.to_u256())
    }
}

impl From<u64> for TokenId {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToFields for TokenId {
    fn to_fields(&self) -> Vec<Field> {
        vec![self.to_field()]
    }
}

/// Compact registry-assigned alias of a [`TokenId`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TokenIdId(pub u64);

impl TokenIdId {
    /// Raw counter value.
    pub fn value(&self) -> u64 {
        self.0
    }

    /// The id after this one, `None` on counter overflow.
    pub fn next(&self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }
}

impl From<u64> for TokenIdId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for TokenIdId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl ToFields for TokenIdId {
    fn to_fields(&self) -> Vec<Field> {
        vec![Field::from(self.0)]
    }
}

/// Venue an order targets: an unordered token pair.
///
/// Built with [`PoolKey::from_token_pair`], which sorts the pair so both
/// orderings name the same pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolKey {
    /// Lower token id of the pair.
    pub token_a: TokenId,
    /// Higher token id of the pair.
    pub token_b: TokenId,
}

impl PoolKey {
    /// Pool key for a token pair, in canonical order.
    pub fn from_token_pair(first: TokenId, second: TokenId) -> Self {
        if first <= second {
            Self {
                token_a: first,
                token_b: second,
            }
        } else {
            Self {
                token_a: second,
                token_b: first,
            }
        }
    }
}

impl ToFields for PoolKey {
    fn to_fields(&self) -> Vec<Field> {
        vec![self.token_a.to_field(), self.token_b.to_field()]
    }
}
