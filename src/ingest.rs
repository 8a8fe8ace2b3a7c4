//! Batch ingestion pipeline.
//!
//! Orchestrates: parse → register synonyms → insert terms → apply edges →
//! commit to storage → slot-value artifact.
//!
//! Each run is a full, independent batch. An [`IngestSession`] owns the
//! registry and graph it builds; nothing is shared between sessions.
//! Any conflict or malformed record aborts the batch before storage is
//! touched. Storage writes are per record, so a failure part-way through
//! [`commit`] can leave earlier records written; running the batch again
//! replaces them by key.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::error::{IngestError, IngestResult};
use crate::graph::source::TermSource;
use crate::graph::{EdgeOutcome, TermGraph};
use crate::ontology::{DocumentFormat, OntologyParser, ParsedOntology, SlotValue, detect_format};
use crate::registry::{Registration, SynonymRegistry};
use crate::store::{StorageAdapter, StoreResult};
use crate::term::{Term, TermId, normalize_surface};

/// Options for one ingestion run.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Override the format detected from the file extension.
    pub format: Option<DocumentFormat>,
    /// Record related edges on both endpoints.
    pub symmetric_relations: bool,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            format: None,
            symmetric_relations: true,
        }
    }
}

/// Counts gathered while building a vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub terms: usize,
    pub synonyms: usize,
    pub hierarchy_edges: usize,
    pub relation_edges: usize,
    /// Edges naming an identifier that no concept in the batch declares.
    pub dropped_references: usize,
}

impl std::fmt::Display for IngestReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} terms, {} synonyms, {} hierarchy edges, {} relation edges, {} dropped references",
            self.terms,
            self.synonyms,
            self.hierarchy_edges,
            self.relation_edges,
            self.dropped_references
        )
    }
}

/// Builds one vocabulary from one parsed document.
#[derive(Debug)]
pub struct IngestSession {
    registry: SynonymRegistry,
    graph: TermGraph,
    slot_values: Vec<SlotValue>,
    symmetric_relations: bool,
    report: IngestReport,
}

impl IngestSession {
    pub fn new(symmetric_relations: bool) -> Self {
        Self {
            registry: SynonymRegistry::new(),
            graph: TermGraph::new(),
            slot_values: Vec::new(),
            symmetric_relations,
            report: IngestReport::default(),
        }
    }

    /// Apply a parsed document.
    ///
    /// The whole document is checked for synonym conflicts and duplicate
    /// concepts before anything is applied, so a rejected document leaves
    /// the session exactly as it was.
    pub fn ingest(&mut self, parsed: ParsedOntology) -> IngestResult<()> {
        self.validate(&parsed)?;

        for (surface, id) in &parsed.synonyms {
            if self.registry.register(surface, id)? == Registration::Bound {
                self.report.synonyms += 1;
            }
        }

        for term in parsed.terms {
            self.graph.insert(term);
            self.report.terms += 1;
        }

        for edge in &parsed.hierarchy {
            match self.graph.apply_hierarchy(edge) {
                EdgeOutcome::Applied => self.report.hierarchy_edges += 1,
                EdgeOutcome::UnknownEndpoint => {
                    tracing::warn!(
                        broader = %edge.broader,
                        narrower = %edge.narrower,
                        "hierarchy reference to undeclared concept, dropping edge"
                    );
                    self.report.dropped_references += 1;
                }
            }
        }

        for edge in &parsed.relations {
            match self.graph.apply_relation(edge, self.symmetric_relations) {
                EdgeOutcome::Applied => self.report.relation_edges += 1,
                EdgeOutcome::UnknownEndpoint => {
                    tracing::warn!(
                        declared_by = %edge.declared_by,
                        target = %edge.target,
                        "related reference to undeclared concept, dropping edge"
                    );
                    self.report.dropped_references += 1;
                }
            }
        }

        self.slot_values.extend(parsed.slot_values);
        Ok(())
    }

    fn validate(&self, parsed: &ParsedOntology) -> IngestResult<()> {
        let mut pending: HashMap<String, &TermId> = HashMap::new();
        for (surface, id) in &parsed.synonyms {
            let surface = normalize_surface(surface);
            let bound = self.registry.resolve(&surface);
            let existing = bound.as_ref().or_else(|| pending.get(&surface).copied());
            match existing {
                Some(existing) if existing != id => {
                    return Err(IngestError::Conflict {
                        existing: existing.to_string(),
                        rejected: id.to_string(),
                        surface,
                    });
                }
                Some(_) => {}
                None => {
                    pending.insert(surface, id);
                }
            }
        }

        let mut seen: HashSet<&TermId> = HashSet::with_capacity(parsed.terms.len());
        for term in &parsed.terms {
            if self.graph.contains(&term.id) || !seen.insert(&term.id) {
                return Err(IngestError::DuplicateConcept {
                    id: term.id.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Freeze the session into a read-only vocabulary.
    pub fn finish(self) -> Vocabulary {
        tracing::info!(report = %self.report, "ingestion session complete");
        Vocabulary {
            registry: self.registry,
            graph: self.graph,
            slot_values: self.slot_values,
            report: self.report,
        }
    }
}

/// Immutable result of an ingestion session. Safe to share between
/// concurrent queries.
#[derive(Debug)]
pub struct Vocabulary {
    registry: SynonymRegistry,
    graph: TermGraph,
    slot_values: Vec<SlotValue>,
    report: IngestReport,
}

impl Vocabulary {
    pub fn registry(&self) -> &SynonymRegistry {
        &self.registry
    }

    pub fn graph(&self) -> &TermGraph {
        &self.graph
    }

    /// Derived slot-value artifact, in document order.
    pub fn slot_values(&self) -> &[SlotValue] {
        &self.slot_values
    }

    pub fn report(&self) -> &IngestReport {
        &self.report
    }
}

impl TermSource for Vocabulary {
    fn lookup_surface(&self, surface: &str) -> StoreResult<Option<TermId>> {
        Ok(self.registry.resolve(surface))
    }

    fn lookup_term(&self, id: &TermId) -> StoreResult<Option<Term>> {
        Ok(self.graph.get(id).cloned())
    }
}

/// Parse a document and build its vocabulary. Nothing is written to storage.
pub fn build_vocabulary(
    data: &[u8],
    format: DocumentFormat,
    symmetric_relations: bool,
) -> IngestResult<Vocabulary> {
    let parsed = OntologyParser::new(format).parse(data)?;
    let mut session = IngestSession::new(symmetric_relations);
    session.ingest(parsed)?;
    Ok(session.finish())
}

/// Write every term, then every synonym. The first storage error aborts.
pub fn commit(vocabulary: &Vocabulary, store: &dyn StorageAdapter) -> IngestResult<()> {
    let terms = vocabulary.graph.persist(store)?;
    tracing::info!(count = terms, "wrote term records");
    let synonyms = vocabulary.registry.persist(store)?;
    tracing::info!(count = synonyms, "wrote synonym records");
    Ok(())
}

/// Ingest a document file into storage: read, parse, build, commit.
pub fn ingest_file(
    path: &Path,
    config: &IngestConfig,
    store: &dyn StorageAdapter,
) -> IngestResult<Vocabulary> {
    let path_str = path.display().to_string();
    let format = match config.format {
        Some(format) => format,
        None => {
            let extension = path.extension().map(|e| e.to_string_lossy().into_owned());
            detect_format(&path_str).ok_or_else(|| IngestError::UnsupportedFormat {
                format: extension.unwrap_or_else(|| path_str.clone()),
            })?
        }
    };

    let data = std::fs::read(path).map_err(|e| IngestError::Io {
        path: path_str.clone(),
        source: e,
    })?;
    tracing::info!(path = %path_str, format = %format, "ingesting concept document");

    let vocabulary = build_vocabulary(&data, format, config.symmetric_relations)?;
    commit(&vocabulary, store)?;
    Ok(vocabulary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::ontology::{ConceptRecord, build};
    use crate::store::{self, Keyspace, MemStore};

    fn concept(id: &str, pref: &str) -> ConceptRecord {
        ConceptRecord {
            id: Some(id.into()),
            pref_labels: vec![pref.into()],
            definitions: vec![format!("definition of {pref}")],
            ..Default::default()
        }
    }

    fn session_from(records: Vec<ConceptRecord>, symmetric: bool) -> IngestResult<Vocabulary> {
        let mut session = IngestSession::new(symmetric);
        session.ingest(build(records)?)?;
        Ok(session.finish())
    }

    #[test]
    fn shared_alt_label_across_terms_conflicts() {
        let mut a = concept("urn:a", "Alpha");
        a.alt_labels.push("shared".into());
        let mut b = concept("urn:b", "Beta");
        b.alt_labels.push("Shared".into());

        let err = session_from(vec![a, b], true).unwrap_err();
        assert!(matches!(err, IngestError::Conflict { .. }));
    }

    #[test]
    fn rejected_document_leaves_session_untouched() {
        let mut a = concept("urn:a", "Alpha");
        a.alt_labels.push("shared".into());
        let mut b = concept("urn:b", "Beta");
        b.alt_labels.push("shared".into());

        let mut session = IngestSession::new(true);
        let err = session.ingest(build(vec![a, b]).unwrap()).unwrap_err();
        assert!(matches!(err, IngestError::Conflict { .. }));

        let vocab = session.finish();
        assert_eq!(vocab.report(), &IngestReport::default());
        assert!(vocab.registry().is_empty());
        assert!(vocab.graph().is_empty());
        assert_eq!(vocab.registry().resolve("alpha"), None);
    }

    #[test]
    fn rejected_second_document_keeps_first() {
        let mut session = IngestSession::new(true);
        session
            .ingest(build(vec![concept("urn:a", "Alpha")]).unwrap())
            .unwrap();

        let mut clash = concept("urn:z", "Zeta");
        clash.alt_labels.push("alpha".into());
        let err = session
            .ingest(build(vec![concept("urn:y", "Ypsilon"), clash]).unwrap())
            .unwrap_err();
        assert!(matches!(err, IngestError::Conflict { .. }));

        let dup = session
            .ingest(build(vec![concept("urn:a", "Another")]).unwrap())
            .unwrap_err();
        assert!(matches!(dup, IngestError::DuplicateConcept { .. }));

        let vocab = session.finish();
        assert_eq!(vocab.report().terms, 1);
        assert_eq!(vocab.report().synonyms, 1);
        assert_eq!(vocab.registry().resolve("ypsilon"), None);
        assert_eq!(vocab.registry().resolve("another"), None);
        assert!(vocab.graph().get(&TermId::new("urn:y")).is_none());

        let mem = MemStore::new();
        commit(&vocab, &mem).unwrap();
        assert_eq!(mem.len(Keyspace::Terms), 1);
        assert_eq!(mem.len(Keyspace::Synonyms), 1);
    }

    #[test]
    fn two_terms_cannot_share_preferred_label() {
        let err = session_from(vec![concept("urn:a", "Same"), concept("urn:b", "same")], true)
            .unwrap_err();
        assert!(matches!(err, IngestError::Conflict { .. }));
    }

    #[test]
    fn unknown_parent_is_counted_and_dropped() {
        let mut child = concept("urn:c", "Child");
        child.broader.push("urn:ghost".into());
        let vocab = session_from(vec![child], true).unwrap();
        assert_eq!(vocab.report().dropped_references, 1);
        assert_eq!(vocab.report().hierarchy_edges, 0);
        assert!(vocab.graph().get(&TermId::new("urn:ghost")).is_none());
    }

    #[test]
    fn unknown_declared_child_is_dropped() {
        let mut parent = concept("urn:p", "Parent");
        parent.narrower.push("urn:ghost".into());
        let vocab = session_from(vec![parent], true).unwrap();
        assert_eq!(vocab.report().dropped_references, 1);
        assert!(vocab.graph().narrower_of(&TermId::new("urn:p")).is_empty());
    }

    #[test]
    fn relation_symmetry_follows_session_setting() {
        let mut a = concept("urn:a", "Alpha");
        a.related.push("urn:b".into());
        let records = vec![a, concept("urn:b", "Beta")];

        let sym = session_from(records.clone(), true).unwrap();
        assert!(!sym.graph().related_to(&TermId::new("urn:a")).is_empty());

        let asym = session_from(records, false).unwrap();
        assert!(asym.graph().related_to(&TermId::new("urn:a")).is_empty());
        assert_eq!(asym.graph().related_to(&TermId::new("urn:b")).len(), 1);
    }

    #[test]
    fn commit_writes_both_keyspaces() {
        let mut mid = concept("urn:mid", "Mid");
        mid.alt_labels.push("middle".into());
        let vocab = session_from(vec![mid], true).unwrap();

        let mem = MemStore::new();
        commit(&vocab, &mem).unwrap();
        assert_eq!(mem.len(Keyspace::Terms), 1);
        assert_eq!(mem.len(Keyspace::Synonyms), 2);
        assert_eq!(
            store::get_synonym(&mem, "middle").unwrap(),
            Some(TermId::new("urn:mid"))
        );
    }

    struct FailingStore;

    impl StorageAdapter for FailingStore {
        fn get(&self, _: Keyspace, _: &str) -> StoreResult<Option<Vec<u8>>> {
            Ok(None)
        }

        fn put(&self, _: Keyspace, _: &str, _: &[u8]) -> StoreResult<()> {
            Err(StoreError::Redb {
                message: "disk full".into(),
            })
        }
    }

    #[test]
    fn storage_failure_aborts_commit() {
        let vocab = session_from(vec![concept("urn:a", "Alpha")], true).unwrap();
        let err = commit(&vocab, &FailingStore).unwrap_err();
        assert!(matches!(err, IngestError::Store(StoreError::Redb { .. })));
    }

    #[test]
    fn ingest_file_detects_format() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("terms.json");
        std::fs::write(
            &path,
            r#"[{"id": "urn:a", "prefLabels": ["Alpha"], "definitions": ["First."]}]"#,
        )
        .unwrap();

        let mem = MemStore::new();
        let vocab = ingest_file(&path, &IngestConfig::default(), &mem).unwrap();
        assert_eq!(vocab.report().terms, 1);
        assert_eq!(mem.len(Keyspace::Terms), 1);
    }

    #[test]
    fn ingest_file_rejects_unknown_extension() {
        let mem = MemStore::new();
        let err = ingest_file(Path::new("terms.csv"), &IngestConfig::default(), &mem).unwrap_err();
        assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
    }
}
