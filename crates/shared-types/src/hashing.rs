//! # Record Hashing
//!
//! Deterministic SHA3-256 hashing of structured records into a single
//! `Field`. Every place a record must be bound to a state key or to a
//! compact commitment goes through here.
//!
//! ## Domain Separation
//!
//! Each use gets its own one-byte tag so a leaf digest can never collide with
//! an internal node or a record commitment:
//!
//! | Tag | Use |
//! |-----|-----|
//! | `0x00` | `hash_fields` (records, keys) |
//! | `0x01` | Merkle leaf |
//! | `0x02` | Merkle internal node |
//! | `0x03` | state path names |

use crate::field::Field;
use sha3::{Digest, Sha3_256};

const FIELDS_DOMAIN: u8 = 0x00;
const LEAF_DOMAIN: u8 = 0x01;
const NODE_DOMAIN: u8 = 0x02;
const NAME_DOMAIN: u8 = 0x03;

/// Records that flatten into field elements before hashing.
pub trait ToFields {
    /// Flatten into an ordered list of field elements.
    fn to_fields(&self) -> Vec<Field>;

    /// Commitment to this record: `hash_fields(self.to_fields())`.
    fn digest(&self) -> Field {
        hash_fields(&self.to_fields())
    }
}

impl ToFields for Field {
    fn to_fields(&self) -> Vec<Field> {
        vec![*self]
    }
}

impl ToFields for u64 {
    fn to_fields(&self) -> Vec<Field> {
        vec![Field::from(*self)]
    }
}

/// Hash an ordered list of fields. The length is bound into the digest.
pub fn hash_fields(fields: &[Field]) -> Field {
    let mut hasher = Sha3_256::new();
    hasher.update([FIELDS_DOMAIN]);
    hasher.update((fields.len() as u32).to_be_bytes());
    for field in fields {
        hasher.update(field.as_bytes());
    }
    Field::from_bytes(hasher.finalize().into())
}

/// Digest of a present leaf holding `value`.
pub fn hash_leaf(value: &Field) -> Field {
    let mut hasher = Sha3_256::new();
    hasher.update([LEAF_DOMAIN]);
    hasher.update(value.as_bytes());
    Field::from_bytes(hasher.finalize().into())
}

/// Parent digest: H(left || right).
pub fn hash_node(left: &Field, right: &Field) -> Field {
    let mut hasher = Sha3_256::new();
    hasher.update([NODE_DOMAIN]);
    hasher.update(left.as_bytes());
    hasher.update(right.as_bytes());
    Field::from_bytes(hasher.finalize().into())
}

/// Hash a state path name such as `"Balances.balances"`.
pub fn hash_name(name: &str) -> Field {
    let mut hasher = Sha3_256::new();
    hasher.update([NAME_DOMAIN]);
    hasher.update(name.as_bytes());
    Field::from_bytes(hasher.finalize().into())
}
