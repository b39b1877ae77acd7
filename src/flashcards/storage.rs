//! Storage operations for scheduler state
//!
//! Directory structure:
//! ```text
//! {data-dir}/srs/
//! └── {url-encoded deck-id}.json   # DeckState: { cardId: { id, box, dueAt } }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use super::models::DeckState;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data directory not found")]
    DataDirNotFound,

    #[error("State store lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StorageError>;

/// Durable per-deck persistence of scheduler state
pub trait StateStore {
    /// Load the state for a deck. A deck with nothing stored loads as empty.
    fn load(&self, deck_id: &str) -> Result<DeckState>;

    /// Replace the stored state for a deck
    fn save(&self, deck_id: &str, state: &DeckState) -> Result<()>;

    /// Forget all stored state for a deck
    fn reset(&self, deck_id: &str) -> Result<()>;
}

/// State store backed by one JSON file per deck
pub struct JsonStateStore {
    states_dir: PathBuf,
}

impl JsonStateStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            states_dir: data_dir.join("srs"),
        }
    }

    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("jph"))
            .ok_or(StorageError::DataDirNotFound)
    }

    /// Get the path for a deck's state file
    fn state_path(&self, deck_id: &str) -> PathBuf {
        self.states_dir
            .join(format!("{}.json", urlencoding::encode(deck_id)))
    }

    /// Ids of every deck with stored state
    pub fn list_deck_ids(&self) -> Result<Vec<String>> {
        if !self.states_dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.states_dir)? {
            let path = entry?.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    match urlencoding::decode(stem) {
                        Ok(id) => ids.push(id.into_owned()),
                        Err(e) => log::warn!("Skipping state file {:?}: {}", path, e),
                    }
                }
            }
        }

        ids.sort();
        Ok(ids)
    }
}

impl StateStore for JsonStateStore {
    fn load(&self, deck_id: &str) -> Result<DeckState> {
        let path = self.state_path(deck_id);
        if !path.exists() {
            return Ok(DeckState::new());
        }

        let content = fs::read_to_string(&path)?;
        let state: DeckState = serde_json::from_str(&content)?;
        log::debug!("Loaded {} card states for deck {}", state.len(), deck_id);
        Ok(state)
    }

    /// Atomic write (write to .tmp then rename)
    fn save(&self, deck_id: &str, state: &DeckState) -> Result<()> {
        fs::create_dir_all(&self.states_dir)?;

        let path = self.state_path(deck_id);
        let tmp_path = path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&tmp_path, json)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn reset(&self, deck_id: &str) -> Result<()> {
        let path = self.state_path(deck_id);
        if path.exists() {
            fs::remove_file(&path)?;
            log::info!("Reset review state for deck {}", deck_id);
        }
        Ok(())
    }
}

/// In-memory state store, for tests and embedding
#[derive(Default)]
pub struct MemoryStateStore {
    decks: Mutex<HashMap<String, DeckState>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn load(&self, deck_id: &str) -> Result<DeckState> {
        let decks = self.decks.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(decks.get(deck_id).cloned().unwrap_or_default())
    }

    fn save(&self, deck_id: &str, state: &DeckState) -> Result<()> {
        let mut decks = self.decks.lock().map_err(|_| StorageError::Poisoned)?;
        decks.insert(deck_id.to_string(), state.clone());
        Ok(())
    }

    fn reset(&self, deck_id: &str) -> Result<()> {
        let mut decks = self.decks.lock().map_err(|_| StorageError::Poisoned)?;
        decks.remove(deck_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::ReviewState;
    use tempfile::TempDir;

    fn create_test_store() -> (JsonStateStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonStateStore::new(temp_dir.path());
        (store, temp_dir)
    }

    fn sample_state() -> DeckState {
        let mut state = DeckState::new();
        state.insert("kana:あ".into(), ReviewState::new("kana:あ", 3, 1_700_000_000_000));
        state.insert("kana:い".into(), ReviewState::new("kana:い", 0, 1_699_999_999_999));
        state
    }

    #[test]
    fn test_load_missing_is_empty() {
        let (store, _temp) = create_test_store();
        assert!(store.load("kana:hiragana").unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (store, _temp) = create_test_store();
        let state = sample_state();

        store.save("kana:hiragana", &state).unwrap();
        let loaded = store.load("kana:hiragana").unwrap();

        assert_eq!(loaded, state);
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let (store, temp) = create_test_store();
        store.save("kana:hiragana", &sample_state()).unwrap();

        let names: Vec<String> = fs::read_dir(temp.path().join("srs"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["kana%3Ahiragana.json".to_string()]);
    }

    #[test]
    fn test_decks_are_isolated() {
        let (store, _temp) = create_test_store();
        store.save("kanji:N5", &sample_state()).unwrap();

        assert!(store.load("kanji:N4").unwrap().is_empty());
        assert_eq!(store.list_deck_ids().unwrap(), vec!["kanji:N5".to_string()]);
    }

    #[test]
    fn test_reset() {
        let (store, _temp) = create_test_store();
        store.save("vocab:N5", &sample_state()).unwrap();

        store.reset("vocab:N5").unwrap();
        assert!(store.load("vocab:N5").unwrap().is_empty());

        // Resetting a deck with nothing stored is fine
        store.reset("vocab:N5").unwrap();
    }

    #[test]
    fn test_load_platform_format() {
        let (store, temp) = create_test_store();
        fs::create_dir_all(temp.path().join("srs")).unwrap();
        fs::write(
            temp.path().join("srs").join("kana%3Akatakana.json"),
            r#"{"katakana:ア":{"id":"katakana:ア","box":7,"dueAt":1700000000000}}"#,
        )
        .unwrap();

        let state = store.load("kana:katakana").unwrap();
        assert_eq!(state["katakana:ア"].box_index, 5);
        assert_eq!(state["katakana:ア"].due_at, 1_700_000_000_000);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStateStore::new();
        assert!(store.load("d").unwrap().is_empty());

        store.save("d", &sample_state()).unwrap();
        assert_eq!(store.load("d").unwrap(), sample_state());

        store.reset("d").unwrap();
        assert!(store.load("d").unwrap().is_empty());
    }
}
