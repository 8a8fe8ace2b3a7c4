//! JSON concept list reader.
//!
//! The document is an array of objects shaped like [`ConceptRecord`]:
//!
//! ```json
//! [{"id": "urn:a", "prefLabels": ["Alpha"], "altLabels": ["A"],
//!   "broader": [], "narrower": [], "related": ["urn:b"],
//!   "definitions": ["The first letter."]}]
//! ```
//!
//! Every key is optional; missing required values surface later as
//! malformed-record errors, exactly as for SKOS input.

use crate::error::{IngestError, IngestResult};
use crate::ontology::{ConceptReader, ConceptRecord, DocumentFormat};

/// Reader for JSON concept lists.
pub struct JsonConceptReader;

impl ConceptReader for JsonConceptReader {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Json
    }

    fn read(&self, data: &[u8]) -> IngestResult<Vec<ConceptRecord>> {
        serde_json::from_slice(data).map_err(|e| IngestError::Parse {
            format: DocumentFormat::Json.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_partial_objects() {
        let doc = br#"[
            {"id": "urn:a", "prefLabels": ["Alpha"], "definitions": ["First."], "related": ["urn:b"]},
            {"prefLabels": ["Beta"]}
        ]"#;
        let records = JsonConceptReader.read(doc).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].related, vec!["urn:b"]);
        assert!(records[0].alt_labels.is_empty());
        assert_eq!(records[1].id, None);
    }

    #[test]
    fn rejects_non_array() {
        let err = JsonConceptReader.read(br#"{"id": "urn:a"}"#).unwrap_err();
        assert!(matches!(err, IngestError::Parse { .. }));
    }
}
