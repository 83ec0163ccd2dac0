use crate::domain::{AuthenticatedStore, MerkleMapWitness, StateError, StateKey, StateRoot};
use crate::ports::AuthenticatedStateApi;
use parking_lot::RwLock;
use shared_types::Field;

/// A store behind a read/write lock serves reads under one read guard, so the
/// root and witness always come from the same committed state.
impl AuthenticatedStateApi for RwLock<AuthenticatedStore> {
    fn state_root(&self) -> Result<StateRoot, StateError> {
        Ok(self.read().root())
    }

    fn get_with_witness(
        &self,
        key: &StateKey,
    ) -> Result<(StateRoot, Option<Field>, MerkleMapWitness), StateError> {
        let store = self.read();
        let (value, witness) = store.get_with_witness(key);
        Ok((store.root(), value, witness))
    }

    fn entry_count(&self) -> Result<usize, StateError> {
        Ok(self.read().len())
    }
}
