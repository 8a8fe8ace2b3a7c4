//! Query surface for the host dialogue layer.
//!
//! Every request runs the same linear sequence: resolve → look up the term
//! record → compose. Each call is independent and reads shared state only.
//! Nothing here returns an error: every failure, storage included, becomes
//! plain, polite text the host can speak as-is.

use std::sync::Arc;

use crate::compose::ResponsePhraseComposer;
use crate::error::StoreError;
use crate::graph::source::TermSource;
use crate::resolve::{Resolution, TermResolver};
use crate::term::Term;

/// The three supported query types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Define,
    Decompose,
    Relate,
}

impl Intent {
    /// Parse a host intent name (`define`, `decompose`, `relate`; any case).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "define" => Some(Self::Define),
            "decompose" => Some(Self::Decompose),
            "relate" | "related" => Some(Self::Relate),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Define => "define",
            Self::Decompose => "decompose",
            Self::Relate => "relate",
        }
    }
}

impl std::fmt::Display for Intent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed user-facing failure texts.
pub mod messages {
    pub const NO_TERM: &str = "I'm sorry, I couldn't find a term in that sentence";
    pub const UNKNOWN_INTENT: &str = "I'm sorry, I don't know how to process that request.";
    pub const MISSING_DEFINITION: &str =
        "I'm sorry, that's a valid term but there was a problem finding a matching definition";
    pub const STORAGE_UNAVAILABLE: &str =
        "I'm sorry, I'm having trouble reaching my term database right now. Please try again later.";

    pub fn unresolved(spoken: &str) -> String {
        format!("I'm sorry, I wasn't able to find a term named '{spoken}'")
    }

    pub fn unmatched(spoken: &str) -> String {
        format!("I'm sorry, but there was a problem matching '{spoken}' to my list of term names")
    }
}

/// Answers define / decompose / relate over a shared vocabulary.
#[derive(Clone)]
pub struct QueryEngine {
    source: Arc<dyn TermSource>,
}

impl QueryEngine {
    pub fn new(source: Arc<dyn TermSource>) -> Self {
        Self { source }
    }

    pub fn define(&self, spoken: &str, resolved: Option<&str>) -> String {
        self.answer(Intent::Define, spoken, resolved)
    }

    pub fn decompose(&self, spoken: &str, resolved: Option<&str>) -> String {
        self.answer(Intent::Decompose, spoken, resolved)
    }

    pub fn relate(&self, spoken: &str, resolved: Option<&str>) -> String {
        self.answer(Intent::Relate, spoken, resolved)
    }

    /// Dispatch on a host intent name. Unrecognized names get a defined
    /// message rather than no output.
    pub fn answer_named(&self, intent: &str, spoken: &str, resolved: Option<&str>) -> String {
        match Intent::from_name(intent) {
            Some(intent) => self.answer(intent, spoken, resolved),
            None => {
                tracing::warn!(intent, "unrecognized intent");
                messages::UNKNOWN_INTENT.to_string()
            }
        }
    }

    pub fn answer(&self, intent: Intent, spoken: &str, resolved: Option<&str>) -> String {
        match self.try_answer(intent, spoken, resolved) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(%intent, spoken, error = %e, "storage failure during query");
                messages::STORAGE_UNAVAILABLE.to_string()
            }
        }
    }

    fn try_answer(
        &self,
        intent: Intent,
        spoken: &str,
        resolved: Option<&str>,
    ) -> Result<String, StoreError> {
        let spoken = spoken.trim();
        if spoken.is_empty() {
            tracing::info!(%intent, "no term detected in request");
            return Ok(messages::NO_TERM.to_string());
        }

        let source = self.source.as_ref();
        let id = match TermResolver::new(source).resolve_spoken(spoken, resolved)? {
            Resolution::Resolved(id) => id,
            Resolution::NoCanonicalForm => return Ok(messages::unresolved(spoken)),
            Resolution::UnknownSurface { .. } => return Ok(messages::unmatched(spoken)),
        };

        let Some(term) = source.lookup_term(&id)? else {
            tracing::warn!(term = %id, "synonym points at a missing term record");
            return Ok(messages::MISSING_DEFINITION.to_string());
        };

        self.compose(intent, &term, spoken)
    }

    fn compose(&self, intent: Intent, term: &Term, spoken: &str) -> Result<String, StoreError> {
        let composer = ResponsePhraseComposer::new(self.source.as_ref());
        match intent {
            Intent::Define => Ok(composer.compose_definition(term, spoken)),
            Intent::Decompose => composer.compose_decomposition(term, spoken),
            Intent::Relate => composer.compose_relations(term, spoken),
        }
    }
}

impl std::fmt::Debug for QueryEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryEngine").finish()
    }
}
