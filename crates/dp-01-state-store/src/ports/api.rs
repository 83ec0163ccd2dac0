use crate::domain::{MerkleMapWitness, StateError, StateKey, StateRoot};
use shared_types::Field;

/// Read-only access to committed state.
///
/// Implementations must answer every call from a single committed root:
/// a witness returned here always verifies against `state_root()` read in
/// the same call.
pub trait AuthenticatedStateApi: Send + Sync {
    fn state_root(&self) -> Result<StateRoot, StateError>;

    /// Value and witness, plus the root the witness was built against.
    fn get_with_witness(
        &self,
        key: &StateKey,
    ) -> Result<(StateRoot, Option<Field>, MerkleMapWitness), StateError>;

    fn entry_count(&self) -> Result<usize, StateError>;
}

impl<T: AuthenticatedStateApi + ?Sized> AuthenticatedStateApi for std::sync::Arc<T> {
    fn state_root(&self) -> Result<StateRoot, StateError> {
        (**self).state_root()
    }

    fn get_with_witness(
        &self,
        key: &StateKey,
    ) -> Result<(StateRoot, Option<Field>, MerkleMapWitness), StateError> {
        (**self).get_with_witness(key)
    }

    fn entry_count(&self) -> Result<usize, StateError> {
        (**self).entry_count()
    }
}
