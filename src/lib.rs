// thiserror's #[error("...{field}...")] format strings reference struct fields,
// but the compiler doesn't see through the derive macro and reports false positives.
#![allow(unused_assignments)]

//! # vocab-graph
//!
//! A controlled-vocabulary knowledge graph: terms, synonyms, broader/narrower
//! hierarchy and related links, answering "define", "decompose" and "relate"
//! questions as speakable text.
//!
//! ## Architecture
//!
//! - **Parsing** (`ontology`): SKOS RDF/XML or JSON → term records, pending edges, synonyms
//! - **Synonyms** (`registry`): injective surface form → term id mapping
//! - **Graph** (`graph`): term records with single-hop narrower/related lookups
//! - **Ingestion** (`ingest`): one explicit session per batch, committed to storage
//! - **Storage** (`store`): two keyspaces behind one adapter, in-memory or redb
//! - **Queries** (`resolve`, `compose`, `query`): resolve → look up → compose,
//!   with edit distance deciding whether to disclose the canonical label
//!
//! ## Library usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use vocab_graph::ingest::build_vocabulary;
//! use vocab_graph::ontology::DocumentFormat;
//! use vocab_graph::query::QueryEngine;
//!
//! let doc = br#"[{"id": "urn:anova", "prefLabels": ["Analysis of Variance"],
//!                 "altLabels": ["ANOVA"], "definitions": ["Comparing group means."]}]"#;
//! let vocabulary = build_vocabulary(doc, DocumentFormat::Json, true).unwrap();
//! let engine = QueryEngine::new(Arc::new(vocabulary));
//! println!("{}", engine.define("anova", Some("anova")));
//! ```

pub mod compose;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod ingest;
pub mod ontology;
pub mod paths;
pub mod query;
pub mod registry;
pub mod resolve;
pub mod store;
pub mod term;
