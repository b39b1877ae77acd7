//! Deck sources: where immutable card content comes from

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::models::Deck;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid deck file {path:?}: {source}")]
    InvalidDeckFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Deck {deck} contains card {card} more than once")]
    DuplicateCard { deck: String, card: String },

    #[error("Deck not found: {0}")]
    DeckNotFound(String),
}

/// Supplies decks to the scheduler
pub trait DeckSource {
    /// All decks, in display order
    fn list_decks(&self) -> Result<Vec<Deck>, CatalogError>;

    /// Get a deck by exact id
    fn get_deck(&self, deck_id: &str) -> Result<Deck, CatalogError> {
        self.list_decks()?
            .into_iter()
            .find(|d| d.id == deck_id)
            .ok_or_else(|| CatalogError::DeckNotFound(deck_id.to_string()))
    }
}

/// Decks stored as `*.json` files in a directory, one deck per file
pub struct DirectoryDeckSource {
    decks_dir: PathBuf,
}

impl DirectoryDeckSource {
    pub fn new(decks_dir: impl Into<PathBuf>) -> Self {
        Self {
            decks_dir: decks_dir.into(),
        }
    }

    /// Read and check a single deck file
    pub fn read_deck(path: &Path) -> Result<Deck, CatalogError> {
        let content = fs::read_to_string(path)?;
        let deck: Deck = serde_json::from_str(&content).map_err(|source| {
            CatalogError::InvalidDeckFile {
                path: path.to_path_buf(),
                source,
            }
        })?;

        if let Some(card) = deck.duplicate_card_id() {
            return Err(CatalogError::DuplicateCard {
                deck: deck.id.clone(),
                card: card.to_string(),
            });
        }

        Ok(deck)
    }
}

impl DeckSource for DirectoryDeckSource {
    fn list_decks(&self) -> Result<Vec<Deck>, CatalogError> {
        if !self.decks_dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.decks_dir)? {
            let path = entry?.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut decks = Vec::new();
        for path in &paths {
            match Self::read_deck(path) {
                Ok(deck) => decks.push(deck),
                Err(e @ (CatalogError::InvalidDeckFile { .. } | CatalogError::DuplicateCard { .. })) => {
                    log::warn!("Skipping deck file {:?}: {}", path, e);
                }
                Err(e) => return Err(e),
            }
        }

        log::info!("Loaded {} decks from {:?}", decks.len(), self.decks_dir);
        Ok(decks)
    }
}

/// Several sources merged in order. A later deck with an id already seen
/// replaces the earlier one in place.
pub struct CompositeDeckSource {
    sources: Vec<Box<dyn DeckSource>>,
}

impl CompositeDeckSource {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: impl DeckSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl Default for CompositeDeckSource {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckSource for CompositeDeckSource {
    fn list_decks(&self) -> Result<Vec<Deck>, CatalogError> {
        let mut decks: Vec<Deck> = Vec::new();
        for source in &self.sources {
            for deck in source.list_decks()? {
                match decks.iter_mut().find(|d| d.id == deck.id) {
                    Some(existing) => {
                        log::debug!("Deck {} overridden by a later source", deck.id);
                        *existing = deck;
                    }
                    None => decks.push(deck),
                }
            }
        }
        Ok(decks)
    }
}
