use crate::domain::StateError;
use shared_types::Hash;

/// Raw byte storage for store snapshots.
pub trait StateDatabase: Send + Sync {
    fn get(&self, key: &Hash) -> Result<Option<Vec<u8>>, StateError>;
    fn put(&self, key: Hash, data: Vec<u8>) -> Result<(), StateError>;
    fn delete(&self, key: &Hash) -> Result<(), StateError>;
}
