//! Derived slot-value artifact.
//!
//! One ingestion run produces a flat list of `{id, canonicalLabel, synonyms}`
//! entries for the external slot-configuration generator. The core never
//! reads it back.

use std::path::Path;

use crate::error::{IngestError, IngestResult};
use crate::ontology::SlotValue;

/// Serialize slot values as pretty-printed JSON.
pub fn slot_values_json(values: &[SlotValue]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(values)
}

/// Write slot values to `path`, creating parent directories as needed.
pub fn write_slot_values(path: &Path, values: &[SlotValue]) -> IngestResult<()> {
    let artifact_err = |message: String| IngestError::ArtifactWrite {
        path: path.display().to_string(),
        message,
    };

    let json = slot_values_json(values).map_err(|e| artifact_err(e.to_string()))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| artifact_err(e.to_string()))?;
    }
    std::fs::write(path, json).map_err(|e| artifact_err(e.to_string()))?;
    tracing::info!(path = %path.display(), count = values.len(), "wrote slot values");
    Ok(())
}
