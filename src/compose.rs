//! Answer text for define / decompose / relate.
//!
//! Decompose and relate share one three-way policy over a term's
//! neighbour attribute:
//!
//! 1. attribute absent → "cannot go further" message
//! 2. attribute present, every reference dangling → a distinct degraded
//!    message; each dangling reference is logged, never fatal
//! 3. at least one neighbour resolves → counted, comma-separated list

use std::collections::BTreeSet;

use crate::graph::source::TermSource;
use crate::resolve::presentation_phrase;
use crate::store::StoreResult;
use crate::term::{Term, TermId};

/// Which neighbour attribute an answer lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Narrower,
    Related,
}

impl Facet {
    fn attribute(self) -> &'static str {
        match self {
            Self::Narrower => "NarrowerTerms",
            Self::Related => "RelatedTerms",
        }
    }

    fn references(self, term: &Term) -> Option<&BTreeSet<TermId>> {
        match self {
            Self::Narrower => term.narrower_terms.as_ref(),
            Self::Related => term.related_terms.as_ref(),
        }
    }

    fn absent_message(self, spoken: &str) -> String {
        match self {
            Self::Narrower => {
                format!("Sorry, it isn't possible to decompose '{spoken}' any further")
            }
            Self::Related => {
                format!("Sorry, the term '{spoken}' isn't related to any other terms")
            }
        }
    }

    fn dangling_message(self, spoken: &str) -> String {
        match self {
            Self::Narrower => {
                format!("I'm sorry, the term '{spoken}' can't be broken down any further")
            }
            Self::Related => format!(
                "I'm sorry, the term '{spoken}' isn't related to any other terms in my database"
            ),
        }
    }

    fn listing(self, phrase: &str, count: &str, items: &str) -> String {
        match self {
            Self::Narrower => {
                format!("{phrase} can be broken down into the following {count}: {items}")
            }
            Self::Related => format!("{phrase} is related to the following {count}: {items}"),
        }
    }
}

/// "1 item" / "N items".
pub fn count_text(n: usize) -> String {
    if n == 1 {
        "1 item".to_string()
    } else {
        format!("{n} items")
    }
}

/// Renders answers, fetching neighbour labels from a [`TermSource`].
pub struct ResponsePhraseComposer<'a> {
    source: &'a dyn TermSource,
}

impl<'a> ResponsePhraseComposer<'a> {
    pub const SEPARATOR: &'static str = ", ";

    pub fn new(source: &'a dyn TermSource) -> Self {
        Self { source }
    }

    /// `"<phrase>: <definition>"`.
    pub fn compose_definition(&self, term: &Term, spoken: &str) -> String {
        format!(
            "{}: {}",
            presentation_phrase(spoken, &term.preferred_term),
            term.definition
        )
    }

    pub fn compose_decomposition(&self, term: &Term, spoken: &str) -> StoreResult<String> {
        self.compose_facet(Facet::Narrower, term, spoken)
    }

    pub fn compose_relations(&self, term: &Term, spoken: &str) -> StoreResult<String> {
        self.compose_facet(Facet::Related, term, spoken)
    }

    fn compose_facet(&self, facet: Facet, term: &Term, spoken: &str) -> StoreResult<String> {
        let Some(references) = facet.references(term) else {
            return Ok(facet.absent_message(spoken));
        };

        let mut labels = Vec::with_capacity(references.len());
        for reference in references {
            match self.source.lookup_term(reference)? {
                Some(neighbour) => labels.push(neighbour.preferred_term),
                None => tracing::warn!(
                    term = %term.id,
                    attribute = facet.attribute(),
                    missing = %reference,
                    "dangling reference: no term record for id"
                ),
            }
        }

        if labels.is_empty() {
            tracing::warn!(
                term = %term.id,
                attribute = facet.attribute(),
                "attribute present but no referenced term resolved"
            );
            return Ok(facet.dangling_message(spoken));
        }

        Ok(facet.listing(
            &presentation_phrase(spoken, &term.preferred_term),
            &count_text(labels.len()),
            &labels.join(Self::SEPARATOR),
        ))
    }
}
