//! # Domain Entities for the Authenticated State Store
//!
//! ## Type Decisions
//!
//! - `StateRoot` and `StateKey` are plain [`Field`] aliases. A key is always
//!   the output of the record hash, so it is uniformly distributed over the
//!   256-bit key space and the sparse map needs no rebalancing.
//! - Values are single `Field`s. Anything wider must be committed first.

use serde::{Deserialize, Serialize};
use shared_types::{hash_node, Field, FIELD_BITS};
use std::sync::OnceLock;

/// Commitment to the whole key space.
pub type StateRoot = Field;

/// Hash-derived location of a value.
pub type StateKey = Field;

/// Depth of the sparse Merkle map: one level per key bit.
pub const MAP_DEPTH: usize = FIELD_BITS;

/// Digest of an empty leaf.
pub const EMPTY_LEAF: Field = Field::ZERO;

/// Digests of fully empty subtrees, indexed by height (0 = leaf).
///
/// `empty_subtree_digests()[MAP_DEPTH]` is the root of an empty store.
pub fn empty_subtree_digests() -> &'static [Field; MAP_DEPTH + 1] {
    static DIGESTS: OnceLock<[Field; MAP_DEPTH + 1]> = OnceLock::new();
    DIGESTS.get_or_init(|| {
        let mut digests = [EMPTY_LEAF; MAP_DEPTH + 1];
        for height in 1..=MAP_DEPTH {
            digests[height] = hash_node(&digests[height - 1], &digests[height - 1]);
        }
        digests
    })
}

/// Root of a store with no entries.
pub fn empty_root() -> StateRoot {
    empty_subtree_digests()[MAP_DEPTH]
}

/// Summary of one committed write set.
///
/// Returned by every commit so callers can log and publish the transition
/// from the previous root to the next.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootTransition {
    /// Root before the writes.
    pub previous_root: StateRoot,
    /// Root after the writes.
    pub new_root: StateRoot,
    /// Number of keys written (including removals).
    pub keys_written: usize,
}

/// Configuration for the authenticated store.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Maximum number of present entries (DoS protection).
    pub max_entries: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_entries: 10_000_000,
        }
    }
}
