//! # Merkle Map Witnesses
//!
//! A witness is the authentication path for one key: the sibling digest at
//! every level plus the direction taken. Given a claimed leaf value it
//! recomputes both the root and the key it speaks for.
//!
//! ## Proof Validity
//!
//! A witness is valid for `(key, value)` under `root` iff
//! `compute_root_and_key(value) == (root, key)`. Absence is proven by
//! claiming `None`, which starts the walk from the empty-leaf digest.
//!
//! Verification is a pure function: no store access, no allocation beyond
//! the fixed-depth walk. It is safe to call from a proof circuit.

use super::{StateError, StateKey, StateRoot, EMPTY_LEAF, MAP_DEPTH};
use serde::{Deserialize, Serialize};
use shared_types::{hash_leaf, hash_node, Field};

/// Authentication path for one key, leaf level first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleMapWitness {
    /// `true` when the path node at this level is the left child.
    pub is_lefts: Vec<bool>,
    /// Sibling digest at each level.
    pub siblings: Vec<Field>,
}

impl MerkleMapWitness {
    /// Recompute `(root, key)` assuming the leaf holds `claimed`.
    pub fn compute_root_and_key(
        &self,
        claimed: Option<Field>,
    ) -> Result<(StateRoot, StateKey), StateError> {
        self.check_shape()?;

        let mut current = match claimed {
            Some(value) => hash_leaf(&value),
            None => EMPTY_LEAF,
        };
        let mut key = Field::ZERO;

        for (level, (is_left, sibling)) in self.is_lefts.iter().zip(&self.siblings).enumerate() {
            if *is_left {
                current = hash_node(&current, sibling);
            } else {
                current = hash_node(sibling, &current);
                key = key.with_bit_set(level);
            }
        }

        Ok((current, key))
    }

    /// Key this witness speaks for, read from the path directions alone.
    pub fn key(&self) -> Result<StateKey, StateError> {
        self.check_shape()?;
        Ok(self
            .is_lefts
            .iter()
            .enumerate()
            .filter(|(_, is_left)| !**is_left)
            .fold(Field::ZERO, |key, (level, _)| key.with_bit_set(level)))
    }

    fn check_shape(&self) -> Result<(), StateError> {
        if self.is_lefts.len() != MAP_DEPTH {
            return Err(StateError::MalformedWitness {
                expected: MAP_DEPTH,
                actual: self.is_lefts.len(),
            });
        }
        if self.siblings.len() != MAP_DEPTH {
            return Err(StateError::MalformedWitness {
                expected: MAP_DEPTH,
                actual: self.siblings.len(),
            });
        }
        Ok(())
    }
}

/// Verify `witness` against `root` for a claimed value.
///
/// Returns the recomputed `(root, key)` pair on success, so the caller can
/// bind the key to the identity it expects.
pub fn verify_witness(
    root: &StateRoot,
    witness: &MerkleMapWitness,
    claimed: Option<Field>,
) -> Result<(StateRoot, StateKey), StateError> {
    let (computed_root, key) = witness.compute_root_and_key(claimed)?;
    if computed_root != *root {
        return Err(StateError::StateRootMismatch {
            expected: *root,
            actual: computed_root,
        });
    }
    Ok((computed_root, key))
}
