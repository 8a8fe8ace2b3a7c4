//! Term graph: keyed term records plus their narrower/related edge sets.
//!
//! Edges are stored on the records themselves ([`Term::narrower_terms`],
//! [`Term::related_terms`]). Traversal is strictly single-hop: callers ask
//! for the direct neighbours of one term and never recurse, so accidental
//! cycles in the source document cannot cause unbounded work.
//!
//! - **In-memory layer** ([`TermGraph`]): built once per ingestion session
//! - **Read layer** ([`source::TermSource`]): what queries consume, backed
//!   either by an in-memory vocabulary or by a [`StorageAdapter`]

pub mod source;

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::store::{self, StorageAdapter, StoreResult};
use crate::term::{Term, TermId};

/// Declared parent reference, inverted: `narrower` said its parent is `broader`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HierarchyEdge {
    pub broader: TermId,
    pub narrower: TermId,
}

/// Declared related reference: `declared_by` named `target` as related.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationEdge {
    pub declared_by: TermId,
    pub target: TermId,
}

/// Outcome of applying one edge to the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOutcome {
    /// The edge was recorded (or was already present).
    Applied,
    /// The edge names a term that is not in the graph; nothing was recorded.
    UnknownEndpoint,
}

/// In-memory term graph.
#[derive(Debug, Default)]
pub struct TermGraph {
    terms: HashMap<TermId, Term>,
}

impl TermGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a term record. Returns the replaced record, if any.
    pub fn insert(&mut self, term: Term) -> Option<Term> {
        self.terms.insert(term.id.clone(), term)
    }

    pub fn get(&self, id: &TermId) -> Option<&Term> {
        self.terms.get(id)
    }

    pub fn contains(&self, id: &TermId) -> bool {
        self.terms.contains_key(id)
    }

    /// Direct narrower terms; empty if the attribute is absent.
    pub fn narrower_of(&self, id: &TermId) -> BTreeSet<TermId> {
        self.terms
            .get(id)
            .and_then(|t| t.narrower_terms.clone())
            .unwrap_or_default()
    }

    /// Direct related terms; empty if the attribute is absent.
    pub fn related_to(&self, id: &TermId) -> BTreeSet<TermId> {
        self.terms
            .get(id)
            .and_then(|t| t.related_terms.clone())
            .unwrap_or_default()
    }

    /// Record `edge.narrower` in the broader term's narrower set. Both
    /// endpoints must already be in the graph.
    pub fn apply_hierarchy(&mut self, edge: &HierarchyEdge) -> EdgeOutcome {
        if !self.terms.contains_key(&edge.narrower) {
            return EdgeOutcome::UnknownEndpoint;
        }
        match self.terms.get_mut(&edge.broader) {
            Some(parent) => {
                parent.add_narrower(edge.narrower.clone());
                EdgeOutcome::Applied
            }
            None => EdgeOutcome::UnknownEndpoint,
        }
    }

    /// Record `edge.declared_by` in the target's related set, and with
    /// `symmetric` also the target in the declaring term's set.
    pub fn apply_relation(&mut self, edge: &RelationEdge, symmetric: bool) -> EdgeOutcome {
        let Some(target) = self.terms.get_mut(&edge.target) else {
            return EdgeOutcome::UnknownEndpoint;
        };
        target.add_related(edge.declared_by.clone());
        if symmetric {
            if let Some(declaring) = self.terms.get_mut(&edge.declared_by) {
                declaring.add_related(edge.target.clone());
            }
        }
        EdgeOutcome::Applied
    }

    /// All terms, sorted by id.
    pub fn terms(&self) -> Vec<&Term> {
        let mut all: Vec<&Term> = self.terms.values().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Write every term record to the term keyspace, one record at a time.
    pub fn persist(&self, store: &dyn StorageAdapter) -> StoreResult<usize> {
        let terms = self.terms();
        for term in &terms {
            tracing::debug!(term = %term.id, label = %term.preferred_term, "writing term");
            store::put_term(store, term)?;
        }
        Ok(terms.len())
    }
}
