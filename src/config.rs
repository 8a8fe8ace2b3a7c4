//! Runtime configuration, persisted as TOML.
//!
//! Lives at `$XDG_CONFIG_HOME/vocab-graph/config.toml`. Every key is optional.
//!
//! ```toml
//! data_dir = "/var/lib/vocab-graph"
//! symmetric_relations = true
//! slot_values_file = "slot_values.json"
//! log_filter = "vocab_graph=debug"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::ingest::IngestConfig;
use crate::paths::VocabPaths;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabConfig {
    /// Directory holding the redb store. Defaults to the XDG data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Record related edges on both endpoints during ingestion.
    #[serde(default = "default_symmetric_relations")]
    pub symmetric_relations: bool,
    /// Where ingestion writes the derived slot-value artifact.
    #[serde(default = "default_slot_values_file")]
    pub slot_values_file: PathBuf,
    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_symmetric_relations() -> bool {
    true
}
fn default_slot_values_file() -> PathBuf {
    PathBuf::from("slot_values.json")
}
fn default_log_filter() -> String {
    "info".into()
}

impl Default for VocabConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            symmetric_relations: default_symmetric_relations(),
            slot_values_file: default_slot_values_file(),
            log_filter: default_log_filter(),
        }
    }
}

impl VocabConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load `path` if it exists, otherwise defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Locate the config file: `explicit` if given, otherwise the XDG
    /// default. The environment is only consulted in the second case.
    pub fn locate(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
        match explicit {
            Some(path) => Ok(path.to_path_buf()),
            None => Ok(VocabPaths::resolve()?.config_file()),
        }
    }

    /// Render as pretty TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: "<in-memory config>".into(),
            message: e.to_string(),
        })
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Effective store directory: the configured one, or the XDG default.
    pub fn store_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(VocabPaths::resolve()?.store_dir()),
        }
    }

    pub fn ingest_config(&self) -> IngestConfig {
        IngestConfig {
            format: None,
            symmetric_relations: self.symmetric_relations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: VocabConfig = toml::from_str("").unwrap();
        assert_eq!(config, VocabConfig::default());
        assert!(config.symmetric_relations);
    }

    #[test]
    fn partial_file_overrides() {
        let config: VocabConfig = toml::from_str("symmetric_relations = false").unwrap();
        assert!(!config.symmetric_relations);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");
        let config = VocabConfig {
            data_dir: Some(dir.path().join("store")),
            log_filter: "debug".into(),
            ..Default::default()
        };
        config.save(&path).unwrap();
        assert_eq!(VocabConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = VocabConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, VocabConfig::default());
    }

    #[test]
    fn explicit_locations_skip_environment() {
        let explicit = Path::new("/etc/vocab/config.toml");
        assert_eq!(VocabConfig::locate(Some(explicit)).unwrap(), explicit);

        let config = VocabConfig {
            data_dir: Some(PathBuf::from("/srv/vocab")),
            ..Default::default()
        };
        assert_eq!(config.store_dir().unwrap(), PathBuf::from("/srv/vocab"));
    }

    #[test]
    fn to_toml_omits_unset_data_dir() {
        let rendered = VocabConfig::default().to_toml().unwrap();
        assert!(!rendered.contains("data_dir"));
        assert!(rendered.contains("symmetric_relations = true"));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "symmetric_relations = \"maybe\"").unwrap();
        assert!(matches!(
            VocabConfig::load(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
