//! Data types produced by the ontology parser.

use serde::{Deserialize, Serialize};

use crate::graph::{HierarchyEdge, RelationEdge};
use crate::term::{Term, TermId};

/// Supported concept document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    /// SKOS serialized as RDF/XML.
    Skos,
    /// A JSON array of [`ConceptRecord`]s.
    Json,
}

impl DocumentFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Skos => "skos",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for DocumentFormat {
    type Err = crate::error::IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "skos" | "rdf" | "xml" => Ok(Self::Skos),
            "json" => Ok(Self::Json),
            other => Err(crate::error::IngestError::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// One concept exactly as declared in the source document, before
/// validation. Every field may be empty or repeated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConceptRecord {
    pub id: Option<String>,
    pub pref_labels: Vec<String>,
    pub alt_labels: Vec<String>,
    /// Parent references.
    pub broader: Vec<String>,
    /// Child references.
    pub narrower: Vec<String>,
    pub related: Vec<String>,
    pub definitions: Vec<String>,
}

/// Entry of the derived slot-value artifact handed to the external slot
/// configuration generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotValue {
    pub id: TermId,
    pub canonical_label: String,
    pub synonyms: Vec<String>,
}

/// Validated output of one parse: term records without edges, the pending
/// edges, and the flat synonym list (preferred labels included).
#[derive(Debug, Default)]
pub struct ParsedOntology {
    pub terms: Vec<Term>,
    pub hierarchy: Vec<HierarchyEdge>,
    pub relations: Vec<RelationEdge>,
    /// `(normalized surface form, term)` pairs in declaration order.
    pub synonyms: Vec<(String, TermId)>,
    pub slot_values: Vec<SlotValue>,
}
