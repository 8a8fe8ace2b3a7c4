//! Persistence tests for the redb-backed store.
//!
//! These verify that committed terms and synonyms survive a reopen and
//! that re-ingestion replaces records by key.

use std::path::Path;
use std::sync::Arc;

use vocab_graph::graph::source::{StoredVocabulary, TermSource};
use vocab_graph::ingest::{IngestConfig, build_vocabulary, commit, ingest_file};
use vocab_graph::ontology::DocumentFormat;
use vocab_graph::query::QueryEngine;
use vocab_graph::store::{DurableStore, Keyspace, StorageAdapter};
use vocab_graph::term::TermId;

fn stored_engine(dir: &Path) -> QueryEngine {
    let store = DurableStore::open(dir).unwrap();
    QueryEngine::new(Arc::new(StoredVocabulary::new(Arc::new(store))))
}

fn json_doc(definition: &str) -> String {
    format!(
        r#"[
            {{"id": "urn:stats", "prefLabels": ["Statistics"], "definitions": ["The study of data."]}},
            {{"id": "urn:anova", "prefLabels": ["Analysis of Variance"], "altLabels": ["ANOVA"],
              "broader": ["urn:stats"], "definitions": ["{definition}"]}}
        ]"#
    )
}

#[test]
fn committed_vocabulary_survives_reopen() {
    let dir = tempfile::TempDir::new().unwrap();

    // First session: build and commit.
    {
        let store = DurableStore::open(dir.path()).unwrap();
        let doc = json_doc("Comparing group means.");
        let vocab = build_vocabulary(doc.as_bytes(), DocumentFormat::Json, true).unwrap();
        commit(&vocab, &store).unwrap();
    }

    // Second session: reopen and query straight from storage.
    {
        let engine = stored_engine(dir.path());
        assert_eq!(
            engine.define("anova", Some("Anova")),
            "anova (typically known as analysis of variance): Comparing group means."
        );
        assert_eq!(
            engine.decompose("statistics", Some("statistics")),
            "statistics can be broken down into the following 1 item: analysis of variance"
        );
    }
}

#[test]
fn reingestion_replaces_by_key() {
    let dir = tempfile::TempDir::new().unwrap();

    {
        let store = DurableStore::open(dir.path()).unwrap();
        for wording in ["Old wording.", "New wording."] {
            let doc = json_doc(wording);
            let vocab = build_vocabulary(doc.as_bytes(), DocumentFormat::Json, true).unwrap();
            commit(&vocab, &store).unwrap();
        }
    }

    let store = DurableStore::open(dir.path()).unwrap();
    let source = StoredVocabulary::new(Arc::new(store));
    let term = source.lookup_term(&TermId::new("urn:anova")).unwrap().unwrap();
    assert_eq!(term.definition, "New wording.");
    let anova = source.lookup_surface("ANOVA").unwrap();
    assert_eq!(anova, Some(TermId::new("urn:anova")));
}

#[test]
fn ingest_file_commits_skos_fixture() {
    let dir = tempfile::TempDir::new().unwrap();
    let store_dir = dir.path().join("store");
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/methods.rdf");

    {
        let store = DurableStore::open(&store_dir).unwrap();
        let vocab = ingest_file(&fixture, &IngestConfig::default(), &store).unwrap();
        let report = vocab.report();
        assert_eq!(report.terms, 5);
        assert_eq!(report.hierarchy_edges, 4);
        assert_eq!(report.relation_edges, 1);
        assert_eq!(report.dropped_references, 0);
    }

    let engine = stored_engine(&store_dir);
    assert_eq!(
        engine.relate("sampling", Some("sampling")),
        "sampling is related to the following 1 item: statistical inference"
    );
    assert_eq!(
        engine.decompose("t-test", Some("student's t-test")),
        "Sorry, it isn't possible to decompose 't-test' any further"
    );
}

#[test]
fn empty_store_reads_as_absent() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = DurableStore::open(dir.path()).unwrap();
    assert_eq!(store.get(Keyspace::Terms, "urn:anything").unwrap(), None);
    assert_eq!(store.get(Keyspace::Synonyms, "anything").unwrap(), None);

    let engine = QueryEngine::new(Arc::new(StoredVocabulary::new(Arc::new(store))));
    assert_eq!(
        engine.define("anova", Some("anova")),
        "I'm sorry, but there was a problem matching 'anova' to my list of term names"
    );
}
