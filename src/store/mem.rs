//! In-memory storage backed by DashMap.
//!
//! One sharded map per keyspace. All data is lost on process exit.

use dashmap::DashMap;

use crate::store::{Keyspace, StorageAdapter, StoreResult};

/// Concurrent in-memory store.
#[derive(Debug, Default)]
pub struct MemStore {
    terms: DashMap<String, Vec<u8>>,
    synonyms: DashMap<String, Vec<u8>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self, keyspace: Keyspace) -> &DashMap<String, Vec<u8>> {
        match keyspace {
            Keyspace::Terms => &self.terms,
            Keyspace::Synonyms => &self.synonyms,
        }
    }

    /// Number of entries in one keyspace.
    pub fn len(&self, keyspace: Keyspace) -> usize {
        self.table(keyspace).len()
    }

    /// Whether both keyspaces are empty.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.synonyms.is_empty()
    }
}

impl StorageAdapter for MemStore {
    fn get(&self, keyspace: Keyspace, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.table(keyspace).get(key).map(|v| v.value().clone()))
    }

    fn put(&self, keyspace: Keyspace, key: &str, value: &[u8]) -> StoreResult<()> {
        self.table(keyspace).insert(key.to_owned(), value.to_vec());
        Ok(())
    }
}
