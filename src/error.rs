//! Rich diagnostic error types for vocab-graph.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it.
//!
//! Only ingestion and setup surface these errors. Queries recover every failure
//! into polite text (see [`crate::query`]).

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for vocab-graph.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source spans) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum VocabError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error("I/O error: {source}")]
    #[diagnostic(
        code(vocab::store::io),
        help(
            "A filesystem operation failed. Check that the data directory exists, \
             has correct permissions, and that the disk is not full."
        )
    )]
    Io {
        #[source]
        source: std::io::Error,
    },

    #[error("redb transaction error: {message}")]
    #[diagnostic(
        code(vocab::store::redb),
        help(
            "The embedded database encountered a transaction error. \
             Re-run ingestion against a fresh data directory; records are \
             replaced by key, so a full re-ingest restores a consistent state."
        )
    )]
    Redb { message: String },

    #[error("serialization error: {message}")]
    #[diagnostic(
        code(vocab::store::serde),
        help(
            "Failed to serialize or deserialize a stored record. \
             This usually means the record format has changed between versions. \
             Re-ingest the vocabulary document."
        )
    )]
    Serialization { message: String },
}

// ---------------------------------------------------------------------------
// Ingestion errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum IngestError {
    #[error("parse error in {format} document: {message}")]
    #[diagnostic(
        code(vocab::ingest::parse),
        help(
            "The concept document could not be parsed. Verify the file is valid \
             {format} and not truncated."
        )
    )]
    Parse { format: String, message: String },

    #[error("malformed concept {concept}: missing {field}")]
    #[diagnostic(
        code(vocab::ingest::malformed_record),
        help(
            "Every concept needs an identifier, a preferred label and a definition. \
             The whole batch was aborted so the stored graph is never silently \
             incomplete; fix the concept and ingest again."
        )
    )]
    MalformedRecord { concept: String, field: &'static str },

    #[error("duplicate concept: \"{id}\" is declared more than once")]
    #[diagnostic(
        code(vocab::ingest::duplicate_concept),
        help(
            "Term identifiers must be unique within a document. Merge the two \
             declarations into one concept."
        )
    )]
    DuplicateConcept { id: String },

    #[error("synonym conflict: \"{surface}\" is bound to {existing}, cannot rebind to {rejected}")]
    #[diagnostic(
        code(vocab::ingest::synonym_conflict),
        help(
            "A surface form may refer to exactly one term. Remove the label from \
             one of the two concepts, or merge the concepts."
        )
    )]
    Conflict {
        surface: String,
        existing: String,
        rejected: String,
    },

    #[error("unsupported document format: \"{format}\"")]
    #[diagnostic(
        code(vocab::ingest::unsupported_format),
        help("Supported formats are: skos (RDF/XML) and json. Pass --format explicitly.")
    )]
    UnsupportedFormat { format: String },

    #[error("I/O error reading {path}: {source}")]
    #[diagnostic(
        code(vocab::ingest::io),
        help("Check the document path and its permissions.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write slot values to {path}: {message}")]
    #[diagnostic(
        code(vocab::ingest::artifact_write),
        help(
            "Storage was already updated; only the slot-value file is missing. \
             Check the output path and re-run ingestion."
        )
    )]
    ArtifactWrite { path: String, message: String },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("cannot determine home directory")]
    #[diagnostic(
        code(vocab::config::no_home),
        help("Set the HOME environment variable or pass --data-dir explicitly.")
    )]
    NoHome,

    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(vocab::config::read),
        help("Ensure the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    #[diagnostic(
        code(vocab::config::parse),
        help("Check the TOML syntax in the config file.")
    )]
    Parse { path: String, message: String },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(vocab::config::write),
        help("Ensure you have write permissions to the config directory.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias for top-level results.
pub type VocabResult<T> = std::result::Result<T, VocabError>;

/// Convenience alias for ingestion results.
pub type IngestResult<T> = std::result::Result<T, IngestError>;
