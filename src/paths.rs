//! XDG-compliant path resolution for vocab-graph.

use std::path::PathBuf;

use crate::error::ConfigError;

/// Global directories for vocab-graph.
#[derive(Debug, Clone)]
pub struct VocabPaths {
    /// `$XDG_CONFIG_HOME/vocab-graph/`
    pub config_dir: PathBuf,
    /// `$XDG_DATA_HOME/vocab-graph/`
    pub data_dir: PathBuf,
}

impl VocabPaths {
    /// Resolve XDG directories from environment variables with standard fallbacks.
    pub fn resolve() -> Result<Self, ConfigError> {
        Self::from_env(|key| std::env::var(key).ok())
    }

    fn from_env(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let home = var("HOME").map(PathBuf::from);
        let xdg = |key: &str, fallback: &str| -> Result<PathBuf, ConfigError> {
            match var(key) {
                Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
                _ => home
                    .as_ref()
                    .map(|h| h.join(fallback))
                    .ok_or(ConfigError::NoHome),
            }
        };

        Ok(Self {
            config_dir: xdg("XDG_CONFIG_HOME", ".config")?.join("vocab-graph"),
            data_dir: xdg("XDG_DATA_HOME", ".local/share")?.join("vocab-graph"),
        })
    }

    /// `config_dir/config.toml`
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// `data_dir/store/`, the redb database location.
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| v.to_string())
        }
    }

    #[test]
    fn home_fallbacks() {
        let paths = VocabPaths::from_env(env(&[("HOME", "/home/u")])).unwrap();
        assert_eq!(paths.config_dir, PathBuf::from("/home/u/.config/vocab-graph"));
        assert_eq!(paths.data_dir, PathBuf::from("/home/u/.local/share/vocab-graph"));
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/home/u/.config/vocab-graph/config.toml")
        );
    }

    #[test]
    fn xdg_overrides_home() {
        let paths = VocabPaths::from_env(env(&[
            ("XDG_CONFIG_HOME", "/cfg"),
            ("XDG_DATA_HOME", "/data"),
        ]))
        .unwrap();
        assert_eq!(paths.config_dir, PathBuf::from("/cfg/vocab-graph"));
        assert_eq!(paths.store_dir(), PathBuf::from("/data/vocab-graph/store"));
    }

    #[test]
    fn no_home_no_xdg_fails() {
        assert!(matches!(
            VocabPaths::from_env(env(&[])),
            Err(ConfigError::NoHome)
        ));
    }
}
