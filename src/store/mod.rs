//! Storage adapter for vocab-graph.
//!
//! Two independent keyspaces live behind one [`StorageAdapter`]:
//!
//! - [`Keyspace::Terms`]: TermID → bincode-encoded [`Term`]
//! - [`Keyspace::Synonyms`]: normalized surface form → TermID (UTF-8)
//!
//! Backends:
//!
//! - [`MemStore`]: concurrent hashmaps (DashMap), nothing survives the process
//! - [`DurableStore`]: one redb table per keyspace
//!
//! There is no multi-key transaction: every `put` stands alone, and
//! re-ingestion replaces records by key.

pub mod durable;
pub mod mem;

pub use durable::DurableStore;
pub use mem::MemStore;

use crate::error::StoreError;
use crate::term::{Term, TermId};

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// The two lookup tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyspace {
    Terms,
    Synonyms,
}

impl Keyspace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Terms => "terms",
            Self::Synonyms => "synonyms",
        }
    }
}

impl std::fmt::Display for Keyspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value capability consumed by ingestion (writes) and queries (reads).
pub trait StorageAdapter: Send + Sync {
    /// Read a value. `Ok(None)` means the key is absent.
    fn get(&self, keyspace: Keyspace, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Insert or replace a value.
    fn put(&self, keyspace: Keyspace, key: &str, value: &[u8]) -> StoreResult<()>;
}

/// Encode a term record for the [`Keyspace::Terms`] table.
pub fn encode_term(term: &Term) -> StoreResult<Vec<u8>> {
    bincode::serialize(term).map_err(|e| StoreError::Serialization {
        message: format!("failed to serialize term {}: {e}", term.id),
    })
}

/// Decode a term record read from the [`Keyspace::Terms`] table.
pub fn decode_term(bytes: &[u8]) -> StoreResult<Term> {
    bincode::deserialize(bytes).map_err(|e| StoreError::Serialization {
        message: format!("failed to deserialize term: {e}"),
    })
}

/// Write one term record.
pub fn put_term(store: &dyn StorageAdapter, term: &Term) -> StoreResult<()> {
    let encoded = encode_term(term)?;
    store.put(Keyspace::Terms, term.id.as_str(), &encoded)
}

/// Read one term record.
pub fn get_term(store: &dyn StorageAdapter, id: &TermId) -> StoreResult<Option<Term>> {
    store
        .get(Keyspace::Terms, id.as_str())?
        .map(|bytes| decode_term(&bytes))
        .transpose()
}

/// Write one synonym binding. `surface` must already be normalized.
pub fn put_synonym(store: &dyn StorageAdapter, surface: &str, id: &TermId) -> StoreResult<()> {
    store.put(Keyspace::Synonyms, surface, id.as_str().as_bytes())
}

/// Read one synonym binding. `surface` must already be normalized.
pub fn get_synonym(store: &dyn StorageAdapter, surface: &str) -> StoreResult<Option<TermId>> {
    match store.get(Keyspace::Synonyms, surface)? {
        Some(bytes) => {
            let raw = String::from_utf8(bytes).map_err(|e| StoreError::Serialization {
                message: format!("synonym \"{surface}\" holds a non-UTF-8 term id: {e}"),
            })?;
            Ok(Some(TermId::new(raw)))
        }
        None => Ok(None),
    }
}
