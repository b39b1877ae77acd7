//! Review sessions: the load, grade, save loop for one deck
//!
//! A session owns the in-memory state for its deck, so one session is one
//! writer. Every grade is written through to the store before returning.

use thiserror::Error;

use super::algorithm::{self, Grade};
use super::models::{CardWithState, Deck, DeckState, ReviewState, ReviewStats};
use super::storage::{StateStore, StorageError};

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("No cards due in deck {0}")]
    NothingDue(String),

    #[error("Card {card} is not in deck {deck}")]
    UnknownCard { deck: String, card: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, SessionError>;

pub struct ReviewSession<'a, S: StateStore + ?Sized> {
    deck: &'a Deck,
    store: &'a S,
    state: DeckState,
}

impl<'a, S: StateStore + ?Sized> ReviewSession<'a, S> {
    /// Load the stored state for `deck`
    pub fn open(deck: &'a Deck, store: &'a S) -> Result<Self> {
        let state = store.load(&deck.id)?;
        Ok(Self { deck, store, state })
    }

    pub fn state(&self) -> &DeckState {
        &self.state
    }

    /// Cards due at `now`, in review order
    pub fn due(&self, now: i64) -> Vec<CardWithState<'a>> {
        algorithm::list_due(self.deck, &self.state, now)
    }

    /// The card to review next, if any
    pub fn current(&self, now: i64) -> Option<CardWithState<'a>> {
        self.due(now).into_iter().next()
    }

    /// Grade the card at the head of the due list and persist
    pub fn grade_current(&mut self, grade: Grade, now: i64) -> Result<ReviewState> {
        let card_id = match self.current(now) {
            Some(cs) => cs.card.id.clone(),
            None => return Err(SessionError::NothingDue(self.deck.id.clone())),
        };
        self.apply(&card_id, grade, now)
    }

    /// Grade a specific card of this deck and persist, due or not
    pub fn grade_card(&mut self, card_id: &str, grade: Grade, now: i64) -> Result<ReviewState> {
        if self.deck.card(card_id).is_none() {
            return Err(SessionError::UnknownCard {
                deck: self.deck.id.clone(),
                card: card_id.to_string(),
            });
        }
        self.apply(card_id, grade, now)
    }

    /// Write the in-memory state to the store. Used to retry after a
    /// failed save.
    pub fn flush(&self) -> Result<()> {
        self.store.save(&self.deck.id, &self.state)?;
        Ok(())
    }

    pub fn stats(&self, now: i64) -> ReviewStats {
        algorithm::deck_stats(self.deck, &self.state, now)
    }

    /// Interval in days each grade would give the current card
    pub fn preview(&self, card_id: &str, now: i64) -> [i64; 4] {
        algorithm::preview_intervals(&self.state, card_id, now)
    }

    fn apply(&mut self, card_id: &str, grade: Grade, now: i64) -> Result<ReviewState> {
        let updated = algorithm::grade(&mut self.state, card_id, grade, now);
        self.flush()?;
        Ok(updated)
    }
}
