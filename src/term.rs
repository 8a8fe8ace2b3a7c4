//! Core term types for vocab-graph.
//!
//! Every concept in the controlled vocabulary is identified by a [`TermId`]
//! and described by a [`Term`] record. Surface forms are compared after
//! [`normalize_surface`].

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Opaque, globally unique identifier for a concept (typically an IRI).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermId(String);

impl TermId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TermId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TermId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

/// A stored concept record.
///
/// `narrower_terms` and `related_terms` distinguish "attribute absent" (`None`)
/// from "attribute present" (`Some`); the answer composer renders the two
/// cases differently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    pub id: TermId,
    /// Normalized (lowercase) canonical label.
    pub preferred_term: String,
    pub definition: String,
    pub narrower_terms: Option<BTreeSet<TermId>>,
    pub related_terms: Option<BTreeSet<TermId>>,
}

impl Term {
    /// Create a term with no narrower or related attributes.
    pub fn new(
        id: TermId,
        preferred_term: impl Into<String>,
        definition: impl Into<String>,
    ) -> Self {
        Self {
            id,
            preferred_term: preferred_term.into(),
            definition: definition.into(),
            narrower_terms: None,
            related_terms: None,
        }
    }

    /// Add `child` to the narrower set, creating the attribute if absent.
    pub fn add_narrower(&mut self, child: TermId) -> bool {
        self.narrower_terms.get_or_insert_with(BTreeSet::new).insert(child)
    }

    /// Add `other` to the related set, creating the attribute if absent.
    pub fn add_related(&mut self, other: TermId) -> bool {
        self.related_terms.get_or_insert_with(BTreeSet::new).insert(other)
    }
}

/// Normalize a surface form for synonym lookup: trim, collapse internal
/// whitespace runs to a single space, and lowercase.
pub fn normalize_surface(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_folds_case_and_whitespace() {
        assert_eq!(normalize_surface("  Statistical   Inference "), "statistical inference");
        assert_eq!(normalize_surface("ANOVA"), "anova");
        assert_eq!(normalize_surface("\t\n"), "");
    }

    #[test]
    fn add_narrower_creates_attribute() {
        let mut t = Term::new(TermId::new("urn:root"), "root", "the root");
        assert!(t.narrower_terms.is_none());
        assert!(t.add_narrower(TermId::new("urn:child")));
        assert!(!t.add_narrower(TermId::new("urn:child")));
        assert_eq!(t.narrower_terms.as_ref().map(|s| s.len()), Some(1));
        assert!(t.related_terms.is_none());
    }

    #[test]
    fn term_id_display_is_raw() {
        assert_eq!(TermId::new("http://x/1").to_string(), "http://x/1");
    }
}
