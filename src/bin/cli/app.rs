use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use jph_lib::flashcards::{CompositeDeckSource, Deck, DeckSource, JsonStateStore, ReviewSession};
use jph_lib::Config;

/// Shared application state for CLI commands
pub struct App {
    pub source: CompositeDeckSource,
    pub store: JsonStateStore,
}

impl App {
    /// Load the config file and apply command-line overrides
    pub fn new(config_path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<Self> {
        let mut config = Config::load_or_default(config_path)
            .context("Failed to load config")?;
        if data_dir.is_some() {
            config.data_dir = data_dir;
        }

        let source = config.deck_source()
            .context("Failed to resolve deck directory")?;
        let store = config.state_store()
            .context("Failed to resolve data directory")?;

        Ok(Self { source, store })
    }

    /// List all decks
    pub fn list_decks(&self) -> Result<Vec<Deck>> {
        self.source.list_decks().context("Failed to list decks")
    }

    /// Find a deck by id or name
    pub fn find_deck(&self, query: &str) -> Result<Deck> {
        let decks = self.list_decks()?;
        match_deck(&decks, query).cloned()
    }

    /// Ids with stored review state but no deck to go with them
    pub fn orphaned_state_ids(&self, decks: &[Deck]) -> Result<Vec<String>> {
        let stored = self.store.list_deck_ids()
            .context("Failed to list stored review state")?;
        Ok(orphaned_ids(stored, decks))
    }

    /// Open a review session for a deck
    pub fn open_session<'a>(&'a self, deck: &'a Deck) -> Result<ReviewSession<'a, JsonStateStore>> {
        ReviewSession::open(deck, &self.store)
            .with_context(|| format!("Failed to load review state for {}", deck.id))
    }
}

/// Exact id first, then case-insensitive prefix of id or name
pub fn match_deck<'d>(decks: &'d [Deck], query: &str) -> Result<&'d Deck> {
    if let Some(deck) = decks.iter().find(|d| d.id == query) {
        return Ok(deck);
    }

    let query_lower = query.to_lowercase();
    let matches: Vec<&Deck> = decks.iter()
        .filter(|d| {
            d.id.to_lowercase().starts_with(&query_lower)
                || d.name.to_lowercase().starts_with(&query_lower)
        })
        .collect();

    match matches.len() {
        0 => bail!("No deck matching '{}'. Available decks:\n{}", query,
            decks.iter().map(|d| format!("  - {} ({})", d.id, d.name)).collect::<Vec<_>>().join("\n")),
        1 => Ok(matches[0]),
        _ => bail!("Ambiguous deck '{}'. Matches:\n{}", query,
            matches.iter().map(|d| format!("  - {} ({})", d.id, d.name)).collect::<Vec<_>>().join("\n")),
    }
}

fn orphaned_ids(stored: Vec<String>, decks: &[Deck]) -> Vec<String> {
    stored
        .into_iter()
        .filter(|id| !decks.iter().any(|d| &d.id == id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decks() -> Vec<Deck> {
        vec![
            Deck::new("kanji:N5", "Kanji N5", Vec::new()),
            Deck::new("kanji:N4", "Kanji N4", Vec::new()),
            Deck::new("kana:hiragana", "Hiragana", Vec::new()),
            Deck::new("kana", "Kana Mix", Vec::new()),
        ]
    }

    #[test]
    fn test_exact_id_wins_over_prefix() {
        let decks = decks();
        // "kana" is also a prefix of "kana:hiragana"
        assert_eq!(match_deck(&decks, "kana").unwrap().id, "kana");
    }

    #[test]
    fn test_prefix_of_id_or_name() {
        let decks = decks();
        assert_eq!(match_deck(&decks, "KANJI:n4").unwrap().id, "kanji:N4");
        assert_eq!(match_deck(&decks, "hira").unwrap().id, "kana:hiragana");
    }

    #[test]
    fn test_no_match() {
        let err = match_deck(&decks(), "vocab").unwrap_err();
        assert!(err.to_string().contains("No deck matching 'vocab'"));
    }

    #[test]
    fn test_ambiguous_prefix() {
        let err = match_deck(&decks(), "kanji").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Ambiguous deck 'kanji'"));
        assert!(message.contains("kanji:N5") && message.contains("kanji:N4"));
    }

    #[test]
    fn test_orphaned_ids() {
        let stored = vec!["kana".to_string(), "old:deck".to_string()];
        assert_eq!(orphaned_ids(stored, &decks()), vec!["old:deck".to_string()]);
    }
}
