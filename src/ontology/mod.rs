//! Ontology parser: concept document → term records, pending edges, synonyms.
//!
//! Each supported format implements [`ConceptReader`], which only extracts raw
//! [`ConceptRecord`]s. [`OntologyParser`] then validates them and builds the
//! [`ParsedOntology`] the same way for every format.
//!
//! Label policy: when a concept carries several preferred labels or several
//! definitions, the first non-empty one in document order wins and the rest
//! are ignored. Alternate labels are all kept.

pub mod json;
pub mod model;
pub mod skos;

pub use model::{ConceptRecord, DocumentFormat, ParsedOntology, SlotValue};

use std::collections::HashSet;

use crate::error::{IngestError, IngestResult};
use crate::graph::{HierarchyEdge, RelationEdge};
use crate::term::{Term, TermId, normalize_surface};

/// Trait for format-specific concept readers.
pub trait ConceptReader {
    /// Extract every concept declared in the document, in document order.
    fn read(&self, data: &[u8]) -> IngestResult<Vec<ConceptRecord>>;

    /// The format this reader handles.
    fn format(&self) -> DocumentFormat;
}

/// Get the reader for a document format.
pub fn reader_for(format: DocumentFormat) -> Box<dyn ConceptReader> {
    match format {
        DocumentFormat::Skos => Box::new(skos::SkosXmlReader),
        DocumentFormat::Json => Box::new(json::JsonConceptReader),
    }
}

/// Detect the document format from a file extension.
pub fn detect_format(path: &str) -> Option<DocumentFormat> {
    let lower = path.to_lowercase();
    if lower.ends_with(".rdf") || lower.ends_with(".xml") || lower.ends_with(".skos") {
        Some(DocumentFormat::Skos)
    } else if lower.ends_with(".json") {
        Some(DocumentFormat::Json)
    } else {
        None
    }
}

/// Parses one complete concept document.
pub struct OntologyParser {
    reader: Box<dyn ConceptReader>,
}

impl OntologyParser {
    pub fn new(format: DocumentFormat) -> Self {
        Self {
            reader: reader_for(format),
        }
    }

    pub fn format(&self) -> DocumentFormat {
        self.reader.format()
    }

    /// Read and validate a document. The first malformed concept aborts the
    /// whole parse.
    pub fn parse(&self, data: &[u8]) -> IngestResult<ParsedOntology> {
        let records = self.reader.read(data)?;
        tracing::debug!(
            format = %self.format(),
            concepts = records.len(),
            "read concept records"
        );
        build(records)
    }
}

/// Validate raw records and assemble the parse output.
pub fn build(records: Vec<ConceptRecord>) -> IngestResult<ParsedOntology> {
    let mut out = ParsedOntology::default();
    let mut seen: HashSet<TermId> = HashSet::with_capacity(records.len());

    for (ordinal, record) in records.into_iter().enumerate() {
        let id = first_non_empty(record.id.iter())
            .map(|raw| TermId::new(raw.trim()))
            .ok_or_else(|| IngestError::MalformedRecord {
                concept: format!("#{}", ordinal + 1),
                field: "identifier",
            })?;

        let preferred = record
            .pref_labels
            .iter()
            .map(|l| normalize_surface(l))
            .find(|l| !l.is_empty())
            .ok_or_else(|| IngestError::MalformedRecord {
                concept: id.to_string(),
                field: "preferred label",
            })?;

        let definition = first_non_empty(record.definitions.iter())
            .map(|d| d.trim().to_string())
            .ok_or_else(|| IngestError::MalformedRecord {
                concept: id.to_string(),
                field: "definition",
            })?;

        if !seen.insert(id.clone()) {
            return Err(IngestError::DuplicateConcept { id: id.to_string() });
        }

        tracing::debug!(term = %id, label = %preferred, "parsed concept");

        out.synonyms.push((preferred.clone(), id.clone()));
        let mut slot_synonyms: Vec<String> = Vec::new();
        for alt in record.alt_labels.iter().map(|l| normalize_surface(l)) {
            if alt.is_empty() {
                continue;
            }
            out.synonyms.push((alt.clone(), id.clone()));
            if alt != preferred && !slot_synonyms.contains(&alt) {
                slot_synonyms.push(alt);
            }
        }

        for parent in refs(&record.broader) {
            out.hierarchy.push(HierarchyEdge {
                broader: parent,
                narrower: id.clone(),
            });
        }
        for child in refs(&record.narrower) {
            out.hierarchy.push(HierarchyEdge {
                broader: id.clone(),
                narrower: child,
            });
        }
        for target in refs(&record.related) {
            out.relations.push(RelationEdge {
                declared_by: id.clone(),
                target,
            });
        }

        out.slot_values.push(SlotValue {
            id: id.clone(),
            canonical_label: preferred.clone(),
            synonyms: slot_synonyms,
        });
        out.terms.push(Term::new(id, preferred, definition));
    }

    Ok(out)
}

fn first_non_empty<'a>(mut values: impl Iterator<Item = &'a String>) -> Option<&'a String> {
    values.find(|v| !v.trim().is_empty())
}

fn refs(raw: &[String]) -> impl Iterator<Item = TermId> + '_ {
    raw.iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .map(TermId::new)
}
