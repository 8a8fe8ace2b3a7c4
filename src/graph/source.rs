//! Read-side lookups consumed by queries.
//!
//! [`TermSource`] is the seam between the query engine and wherever the
//! vocabulary lives: an in-memory [`crate::ingest::Vocabulary`] straight
//! out of an ingestion session, or [`StoredVocabulary`] over a
//! [`StorageAdapter`].

use std::sync::Arc;

use crate::store::{self, StorageAdapter, StoreResult};
use crate::term::{Term, TermId, normalize_surface};

/// Point lookups over the two keyspaces. Implementations must be safe to
/// share between concurrent queries; none of these calls mutate state.
pub trait TermSource: Send + Sync {
    /// Resolve a surface form (normalized by the implementation) to a term id.
    fn lookup_surface(&self, surface: &str) -> StoreResult<Option<TermId>>;

    /// Fetch a term record by id.
    fn lookup_term(&self, id: &TermId) -> StoreResult<Option<Term>>;
}

/// Storage-backed vocabulary: every lookup is one `get` on the adapter.
#[derive(Clone)]
pub struct StoredVocabulary {
    store: Arc<dyn StorageAdapter>,
}

impl StoredVocabulary {
    pub fn new(store: Arc<dyn StorageAdapter>) -> Self {
        Self { store }
    }
}

impl TermSource for StoredVocabulary {
    fn lookup_surface(&self, surface: &str) -> StoreResult<Option<TermId>> {
        store::get_synonym(self.store.as_ref(), &normalize_surface(surface))
    }

    fn lookup_term(&self, id: &TermId) -> StoreResult<Option<Term>> {
        store::get_term(self.store.as_ref(), id)
    }
}

impl std::fmt::Debug for StoredVocabulary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredVocabulary").finish()
    }
}
