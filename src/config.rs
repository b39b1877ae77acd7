//! Configuration file handling
//!
//! Read from `{config-dir}/jph/config.toml`:
//! ```toml
//! data_dir = "/home/me/.local/share/jph"   # review state lives in {data_dir}/srs
//! decks_dir = "/home/me/decks"             # extra *.json decks, default {data_dir}/decks
//! include_builtin = true                   # ship the kana/kanji/vocab decks
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::flashcards::{
    BuiltinCatalog, CompositeDeckSource, DirectoryDeckSource, JsonStateStore, StorageError,
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root for stored review state
    pub data_dir: Option<PathBuf>,
    /// Directory of user deck files
    pub decks_dir: Option<PathBuf>,
    /// Whether the built-in decks are offered
    pub include_builtin: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            decks_dir: None,
            include_builtin: true,
        }
    }
}

impl Config {
    /// Default location of the config file, if the platform has a config dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("jph").join("config.toml"))
    }

    /// Load a config file. A missing file gives the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from `path`, or from the default location when `None`
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => match Self::default_path() {
                Some(p) => Self::load(&p),
                None => Ok(Self::default()),
            },
        }
    }

    pub fn data_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(JsonStateStore::default_data_dir()?),
        }
    }

    pub fn decks_dir(&self) -> Result<PathBuf, ConfigError> {
        match &self.decks_dir {
            Some(dir) => Ok(dir.clone()),
            None => Ok(self.data_dir()?.join("decks")),
        }
    }

    pub fn state_store(&self) -> Result<JsonStateStore, ConfigError> {
        Ok(JsonStateStore::new(&self.data_dir()?))
    }

    /// Built-in decks (if enabled) followed by the decks directory
    pub fn deck_source(&self) -> Result<CompositeDeckSource, ConfigError> {
        let mut source = CompositeDeckSource::new();
        if self.include_builtin {
            source = source.with_source(BuiltinCatalog::new());
        }
        Ok(source.with_source(DirectoryDeckSource::new(self.decks_dir()?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::DeckSource;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(&temp.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.include_builtin);
    }

    #[test]
    fn test_load_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "data_dir = \"/srv/jph\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.data_dir, Some(PathBuf::from("/srv/jph")));
        assert!(config.include_builtin);
        assert_eq!(config.decks_dir().unwrap(), PathBuf::from("/srv/jph/decks"));
    }

    #[test]
    fn test_invalid_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "include_builtin = \"maybe\"").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_deck_source_without_builtin() {
        let temp = TempDir::new().unwrap();
        let config = Config {
            data_dir: Some(temp.path().to_path_buf()),
            decks_dir: None,
            include_builtin: false,
        };

        assert!(config.deck_source().unwrap().list_decks().unwrap().is_empty());
    }
}
