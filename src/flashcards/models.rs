//! Data models for the flashcard system

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize};

/// Highest Leitner box a card can reach
pub const MAX_BOX: u8 = 5;

/// A deck is a named, ordered collection of flashcards sharing one
/// scheduling state scope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl Deck {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cards: Vec<Card>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cards,
        }
    }

    /// Look up a card by id
    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }

    /// First card id that appears more than once, if any
    pub fn duplicate_card_id(&self) -> Option<&str> {
        let mut seen = BTreeSet::new();
        self.cards
            .iter()
            .map(|c| c.id.as_str())
            .find(|id| !seen.insert(*id))
    }
}

/// A flashcard with a prompt (front) and answer (back)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub front: String,
    pub back: String,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub tags: BTreeSet<String>,
}

impl Card {
    pub fn new(id: impl Into<String>, front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            front: front.into(),
            back: back.into(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Current spaced repetition state for a card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewState {
    #[serde(rename = "id", alias = "cardId")]
    pub card_id: String,
    /// Leitner box, 0 (least mastered) to 5
    #[serde(rename = "box", deserialize_with = "deserialize_box")]
    pub box_index: u8,
    /// When the card is next due, in milliseconds since the Unix epoch
    #[serde(rename = "dueAt")]
    pub due_at: i64,
}

impl ReviewState {
    pub fn new(card_id: impl Into<String>, box_index: u8, due_at: i64) -> Self {
        Self {
            card_id: card_id.into(),
            box_index: box_index.min(MAX_BOX),
            due_at,
        }
    }

    /// State of a card that has never been graded: box 0, due immediately
    pub fn fresh(card_id: impl Into<String>, now: i64) -> Self {
        Self::new(card_id, 0, now)
    }

    /// Check if the card is due at `now`
    pub fn is_due(&self, now: i64) -> bool {
        self.due_at <= now
    }
}

/// Stored boxes may come from older or hand-edited state; any integer is
/// accepted and clamped into range.
fn deserialize_box<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(raw.clamp(0, MAX_BOX as i64) as u8)
}

/// Per-deck scheduler state, keyed by card id. Ordered so saved files
/// come out the same every time.
pub type DeckState = BTreeMap<String, ReviewState>;

/// A card with its effective state, used for review sessions
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardWithState<'a> {
    pub card: &'a Card,
    pub state: ReviewState,
}

/// Statistics for a deck at a point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    pub total_cards: usize,
    pub due_cards: usize,
    /// Cards with no stored state
    pub new_cards: usize,
    /// Card count per box, index = box
    pub boxes: [usize; MAX_BOX as usize + 1],
    /// Due cards over total cards, 0.0 for an empty deck
    pub completion_ratio: f64,
}
