use crate::domain::StateError;
use crate::ports::StateDatabase;
use parking_lot::RwLock;
use shared_types::Hash;
use std::collections::HashMap;

/// In-memory implementation of StateDatabase for tests and ephemeral nodes.
pub struct InMemoryStateDb {
    entries: RwLock<HashMap<Hash, Vec<u8>>>,
}

impl InMemoryStateDb {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for InMemoryStateDb {
    fn default() -> Self {
        Self::new()
    }
}

impl StateDatabase for InMemoryStateDb {
    fn get(&self, key: &Hash) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&self, key: Hash, data: Vec<u8>) -> Result<(), StateError> {
        self.entries.write().insert(key, data);
        Ok(())
    }

    fn delete(&self, key: &Hash) -> Result<(), StateError> {
        self.entries.write().remove(key);
        Ok(())
    }
}
