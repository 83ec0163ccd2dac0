use super::{
    empty_root, empty_subtree_digests, verify_witness, MerkleMapWitness, RootTransition,
    StateError, StateKey, StateRoot, StoreConfig, EMPTY_LEAF, MAP_DEPTH,
};
use serde::{Deserialize, Serialize};
use shared_types::{hash_leaf, hash_node, Field};
use std::collections::{BTreeMap, HashMap};

/// Reserved database key holding the full-store snapshot.
pub const SNAPSHOT_KEY: [u8; 32] = [0xFF; 32];

/// Current snapshot format.
const SNAPSHOT_VERSION: u8 = 1;

/// Key/value access shared by the committed store and staged transactions.
///
/// Runtime modules are written against this trait so the same code runs
/// directly on the store or inside a transaction that may be discarded.
pub trait StateAccess {
    /// Current value at `key`, `None` when absent.
    fn read(&self, key: &StateKey) -> Option<Field>;

    /// Write `value` at `key`; `None` clears the leaf.
    fn write(&mut self, key: StateKey, value: Option<Field>) -> Result<(), StateError>;
}

/// Node position: height above the leaves plus the key bits above that height.
type NodeId = (u16, Field);

/// Sparse Merkle map committing every key/value pair to one root.
///
/// Only non-empty internal nodes are stored. Any node missing from `nodes`
/// is the empty-subtree digest for its height.
pub struct AuthenticatedStore {
    root: StateRoot,
    leaves: HashMap<StateKey, Field>,
    nodes: HashMap<NodeId, Field>,
    config: StoreConfig,
}

impl AuthenticatedStore {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            root: empty_root(),
            leaves: HashMap::new(),
            nodes: HashMap::new(),
            config,
        }
    }

    pub fn root(&self) -> StateRoot {
        self.root
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn get(&self, key: &StateKey) -> Option<Field> {
        self.leaves.get(key).copied()
    }

    /// Value at `key` together with its authentication path.
    pub fn get_with_witness(&self, key: &StateKey) -> (Option<Field>, MerkleMapWitness) {
        (self.get(key), self.witness(key))
    }

    /// Authentication path for `key` under the current root.
    pub fn witness(&self, key: &StateKey) -> MerkleMapWitness {
        let mut is_lefts = Vec::with_capacity(MAP_DEPTH);
        let mut siblings = Vec::with_capacity(MAP_DEPTH);

        for height in 0..MAP_DEPTH {
            is_lefts.push(!key.bit(height));
            siblings.push(self.node(height, key.clear_low_bits(height).with_bit_flipped(height)));
        }

        MerkleMapWitness { is_lefts, siblings }
    }

    /// Check `witness` for `claimed` against the current root.
    pub fn verify(
        &self,
        witness: &MerkleMapWitness,
        claimed: Option<Field>,
    ) -> Result<(StateRoot, StateKey), StateError> {
        verify_witness(&self.root, witness, claimed)
    }

    /// Write `value` at `key` and return the new root.
    pub fn set(&mut self, key: StateKey, value: Field) -> Result<StateRoot, StateError> {
        if !self.leaves.contains_key(&key) && self.leaves.len() >= self.config.max_entries {
            return Err(StateError::CapacityExceeded {
                max: self.config.max_entries,
            });
        }
        self.apply(key, Some(value));
        Ok(self.root)
    }

    /// Write only if the store is still at `expected_root`.
    pub fn set_checked(
        &mut self,
        expected_root: StateRoot,
        key: StateKey,
        value: Field,
    ) -> Result<StateRoot, StateError> {
        if self.root != expected_root {
            return Err(StateError::StateRootMismatch {
                expected: expected_root,
                actual: self.root,
            });
        }
        self.set(key, value)
    }

    /// Clear `key` back to the empty leaf and return the new root.
    pub fn remove(&mut self, key: &StateKey) -> StateRoot {
        if self.leaves.contains_key(key) {
            self.apply(*key, None);
        }
        self.root
    }

    /// Stage writes against this store. Nothing is visible until commit.
    pub fn begin(&mut self) -> StateTransaction<'_> {
        StateTransaction {
            store: self,
            overlay: BTreeMap::new(),
        }
    }

    /// Present entries, sorted by key.
    pub fn entries(&self) -> Vec<(StateKey, Field)> {
        let mut entries: Vec<_> = self.leaves.iter().map(|(k, v)| (*k, *v)).collect();
        entries.sort_by_key(|(key, _)| *key);
        entries
    }

    fn node(&self, height: usize, prefix: Field) -> Field {
        if height == 0 {
            return self
                .leaves
                .get(&prefix)
                .map(hash_leaf)
                .unwrap_or(EMPTY_LEAF);
        }
        self.nodes
            .get(&(height as u16, prefix))
            .copied()
            .unwrap_or(empty_subtree_digests()[height])
    }

    /// Update one leaf and rehash its path. Capacity is checked by callers.
    fn apply(&mut self, key: StateKey, value: Option<Field>) {
        let mut current = match value {
            Some(value) => {
                self.leaves.insert(key, value);
                hash_leaf(&value)
            }
            None => {
                self.leaves.remove(&key);
                EMPTY_LEAF
            }
        };

        let empty = empty_subtree_digests();
        for height in 0..MAP_DEPTH {
            let sibling = self.node(height, key.clear_low_bits(height).with_bit_flipped(height));
            current = if key.bit(height) {
                hash_node(&sibling, &current)
            } else {
                hash_node(&current, &sibling)
            };

            let parent: NodeId = ((height + 1) as u16, key.clear_low_bits(height + 1));
            if current == empty[height + 1] {
                self.nodes.remove(&parent);
            } else {
                self.nodes.insert(parent, current);
            }
        }

        self.root = current;
    }

    // =========================================================================
    // PERSISTENCE METHODS
    // =========================================================================

    /// Serialize the store to a versioned snapshot.
    pub fn serialize(&self) -> Result<Vec<u8>, StateError> {
        let snapshot = Snapshot {
            version: SNAPSHOT_VERSION,
            root: self.root,
            entries: self.entries(),
        };
        bincode::serialize(&snapshot).map_err(|e| StateError::SerializationError(e.to_string()))
    }

    /// Rebuild a store from a snapshot, checking the recorded root.
    pub fn deserialize(data: &[u8], config: StoreConfig) -> Result<Self, StateError> {
        let snapshot: Snapshot =
            bincode::deserialize(data).map_err(|e| StateError::SerializationError(e.to_string()))?;
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(StateError::UnsupportedSnapshotVersion(snapshot.version));
        }
        if snapshot.entries.len() > config.max_entries {
            return Err(StateError::CapacityExceeded {
                max: config.max_entries,
            });
        }

        let mut store = Self::with_config(config);
        for (key, value) in snapshot.entries {
            store.apply(key, Some(value));
        }

        if store.root != snapshot.root {
            return Err(StateError::StateRootMismatch {
                expected: snapshot.root,
                actual: store.root,
            });
        }
        Ok(store)
    }

    /// Save the store to a StateDatabase.
    pub fn save_to_db<D: crate::ports::StateDatabase>(&self, db: &D) -> Result<(), StateError> {
        let data = self.serialize()?;
        db.put(SNAPSHOT_KEY, data)?;
        tracing::debug!(
            "[dp-01] Saved snapshot: {} entries, root {}",
            self.len(),
            self.root
        );
        Ok(())
    }

    /// Load the store from a StateDatabase; an empty database yields an empty store.
    pub fn load_from_db<D: crate::ports::StateDatabase>(
        db: &D,
        config: StoreConfig,
    ) -> Result<Self, StateError> {
        match db.get(&SNAPSHOT_KEY)? {
            Some(data) => {
                let store = Self::deserialize(&data, config)?;
                tracing::info!(
                    "[dp-01] Restored {} entries, root {}",
                    store.len(),
                    store.root
                );
                Ok(store)
            }
            None => Ok(Self::with_config(config)),
        }
    }
}

impl Default for AuthenticatedStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateAccess for AuthenticatedStore {
    fn read(&self, key: &StateKey) -> Option<Field> {
        self.get(key)
    }

    fn write(&mut self, key: StateKey, value: Option<Field>) -> Result<(), StateError> {
        match value {
            Some(value) => self.set(key, value).map(|_| ()),
            None => {
                self.remove(&key);
                Ok(())
            }
        }
    }
}

#[derive(Serialize, Deserialize)]
struct Snapshot {
    version: u8,
    root: StateRoot,
    entries: Vec<(StateKey, Field)>,
}

/// Buffered write set over an [`AuthenticatedStore`].
///
/// Reads see staged writes first. `commit` applies every write or none;
/// dropping the transaction discards it.
pub struct StateTransaction<'a> {
    store: &'a mut AuthenticatedStore,
    overlay: BTreeMap<StateKey, Option<Field>>,
}

impl<'a> StateTransaction<'a> {
    /// Root the transaction was opened against.
    pub fn base_root(&self) -> StateRoot {
        self.store.root
    }

    /// Number of distinct keys staged.
    pub fn pending_writes(&self) -> usize {
        self.overlay.len()
    }

    /// Apply all staged writes atomically.
    pub fn commit(self) -> Result<RootTransition, StateError> {
        let previous_root = self.store.root;

        let mut projected = self.store.len();
        for (key, value) in &self.overlay {
            match (self.store.leaves.contains_key(key), value.is_some()) {
                (false, true) => projected += 1,
                (true, false) => projected -= 1,
                _ => {}
            }
        }
        if projected > self.store.config.max_entries {
            return Err(StateError::CapacityExceeded {
                max: self.store.config.max_entries,
            });
        }

        let keys_written = self.overlay.len();
        for (key, value) in self.overlay {
            if self.store.leaves.get(&key).copied() != value {
                self.store.apply(key, value);
            }
        }

        let new_root = self.store.root;
        tracing::debug!(
            "[dp-01] Committed {} writes: {} -> {}",
            keys_written,
            previous_root,
            new_root
        );
        Ok(RootTransition {
            previous_root,
            new_root,
            keys_written,
        })
    }

    /// Drop every staged write.
    pub fn discard(self) {}
}

impl StateAccess for StateTransaction<'_> {
    fn read(&self, key: &StateKey) -> Option<Field> {
        match self.overlay.get(key) {
            Some(staged) => *staged,
            None => self.store.get(key),
        }
    }

    fn write(&mut self, key: StateKey, value: Option<Field>) -> Result<(), StateError> {
        self.overlay.insert(key, value);
        Ok(())
    }
}
