//! Synonym registry: injective surface form → TermID mapping.
//!
//! The [`SynonymRegistry`] is owned by one ingestion session. Surface forms
//! are normalized with [`normalize_surface`] before every insert and lookup,
//! so "ANOVA" and " anova " are the same key.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::error::{IngestError, IngestResult};
use crate::store::{self, StorageAdapter, StoreResult};
use crate::term::{TermId, normalize_surface};

/// What a successful [`SynonymRegistry::register`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    /// A new binding was created.
    Bound,
    /// The surface form was already bound to the same term.
    AlreadyBound,
}

/// Injective mapping from normalized surface form to term.
pub struct SynonymRegistry {
    bindings: DashMap<String, TermId>,
}

impl SynonymRegistry {
    pub fn new() -> Self {
        Self {
            bindings: DashMap::new(),
        }
    }

    /// Bind `surface` to `id`.
    ///
    /// Rebinding to the same term is a no-op; rebinding to a different term
    /// is a [`IngestError::Conflict`] and leaves the existing binding intact.
    pub fn register(&self, surface: &str, id: &TermId) -> IngestResult<Registration> {
        let normalized = normalize_surface(surface);
        match self.bindings.entry(normalized) {
            Entry::Occupied(existing) if existing.get() == id => Ok(Registration::AlreadyBound),
            Entry::Occupied(existing) => Err(IngestError::Conflict {
                surface: existing.key().clone(),
                existing: existing.get().to_string(),
                rejected: id.to_string(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(id.clone());
                Ok(Registration::Bound)
            }
        }
    }

    /// Look up the term bound to a surface form (case-insensitive).
    pub fn resolve(&self, surface: &str) -> Option<TermId> {
        let normalized = normalize_surface(surface);
        self.bindings.get(&normalized).map(|r| r.value().clone())
    }

    /// Snapshot of all bindings, sorted by surface form.
    pub fn bindings(&self) -> Vec<(String, TermId)> {
        let mut all: Vec<_> = self
            .bindings
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        all.sort();
        all
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Write every binding to the synonym keyspace, one record at a time.
    pub fn persist(&self, store: &dyn StorageAdapter) -> StoreResult<usize> {
        let bindings = self.bindings();
        for (surface, id) in &bindings {
            tracing::debug!(surface = %surface, term = %id, "writing synonym");
            store::put_synonym(store, surface, id)?;
        }
        Ok(bindings.len())
    }
}

impl Default for SynonymRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SynonymRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SynonymRegistry")
            .field("count", &self.len())
            .finish()
    }
}
