//! Leitner box scheduling
//!
//! Each card sits in one of six boxes. A review grade moves the card between
//! boxes and the box decides how long until the card is due again:
//!
//! | box | 0   | 1  | 2  | 3  | 4   | 5   |
//! |-----|-----|----|----|----|-----|-----|
//! | gap | now | 1d | 2d | 5d | 10d | 20d |
//!
//! Grades:
//! - again: down one box
//! - hard: stay in the same box
//! - good: up one box
//! - easy: up two boxes
//!
//! Every function here is pure over `(deck, state, now)`. Persisting the
//! resulting state is the caller's job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::models::{CardWithState, Deck, DeckState, ReviewState, ReviewStats, MAX_BOX};

/// Review interval in days, indexed by box
pub const BOX_INTERVALS_DAYS: [i64; MAX_BOX as usize + 1] = [0, 1, 2, 5, 10, 20];

pub const MS_PER_DAY: i64 = 86_400_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    #[error("Invalid grade: {0:?} (expected again, hard, good, easy or 1-4)")]
    InvalidGrade(String),
}

/// A learner's self-reported recall quality for one review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    /// Forgotten
    Again,
    /// Recalled with difficulty
    Hard,
    /// Normal successful recall
    Good,
    /// Trivial recall
    Easy,
}

impl Grade {
    /// All grades in button order
    pub const ALL: [Grade; 4] = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Again => "again",
            Grade::Hard => "hard",
            Grade::Good => "good",
            Grade::Easy => "easy",
        }
    }

    /// Map UI rating (1-4: Again, Hard, Good, Easy) to a grade
    pub fn from_rating(rating: i32) -> Result<Self, SchedulerError> {
        match rating {
            1 => Ok(Grade::Again),
            2 => Ok(Grade::Hard),
            3 => Ok(Grade::Good),
            4 => Ok(Grade::Easy),
            other => Err(SchedulerError::InvalidGrade(other.to_string())),
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Grade {
    type Err = SchedulerError;

    /// Accepts grade names in any case, or the 1-4 button numbers
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "again" => Ok(Grade::Again),
            "hard" => Ok(Grade::Hard),
            "good" => Ok(Grade::Good),
            "easy" => Ok(Grade::Easy),
            _ => match trimmed.parse::<i32>() {
                Ok(rating) => Grade::from_rating(rating),
                Err(_) => Err(SchedulerError::InvalidGrade(s.to_string())),
            },
        }
    }
}

/// Interval in days for a box; out-of-range boxes use the nearest valid one
pub fn interval_days(box_index: u8) -> i64 {
    BOX_INTERVALS_DAYS[box_index.min(MAX_BOX) as usize]
}

/// Box a card moves to after being graded
pub fn next_box(box_index: u8, grade: Grade) -> u8 {
    let b = box_index.min(MAX_BOX);
    match grade {
        Grade::Again => b.saturating_sub(1),
        // Hard keeps the card where it is
        Grade::Hard => b,
        Grade::Good => (b + 1).min(MAX_BOX),
        Grade::Easy => (b + 2).min(MAX_BOX),
    }
}

/// Timestamp at which a card placed in `box_index` at `now` becomes due
pub fn next_due(box_index: u8, now: i64) -> i64 {
    now.saturating_add(interval_days(box_index) * MS_PER_DAY)
}

/// Stored state for a card, or the implicit default for a card never graded
pub fn effective_state(state: &DeckState, card_id: &str, now: i64) -> ReviewState {
    match state.get(card_id) {
        Some(stored) => ReviewState::new(card_id, stored.box_index, stored.due_at),
        None => ReviewState::fresh(card_id, now),
    }
}

/// Cards due at `now`, least mastered first, then earliest due.
///
/// Cards that tie on both keep their deck order.
pub fn list_due<'a>(deck: &'a Deck, state: &DeckState, now: i64) -> Vec<CardWithState<'a>> {
    let mut due: Vec<CardWithState<'a>> = deck
        .cards
        .iter()
        .map(|card| CardWithState {
            card,
            state: effective_state(state, &card.id, now),
        })
        .filter(|cs| cs.state.is_due(now))
        .collect();

    due.sort_by_key(|cs| (cs.state.box_index, cs.state.due_at));
    due
}

/// Apply a grade to a card and record the new state in `state`.
///
/// An unknown card id is graded as a fresh card.
pub fn grade(state: &mut DeckState, card_id: &str, grade: Grade, now: i64) -> ReviewState {
    let current = effective_state(state, card_id, now);
    let box_index = next_box(current.box_index, grade);
    let updated = ReviewState::new(card_id, box_index, next_due(box_index, now));

    log::debug!(
        "Graded {} as {}: box {} -> {}, due at {}",
        card_id,
        grade,
        current.box_index,
        updated.box_index,
        updated.due_at
    );

    state.insert(card_id.to_string(), updated.clone());
    updated
}

/// Interval in days each grade would give, in `Grade::ALL` order.
/// Used to label the grade buttons.
pub fn preview_intervals(state: &DeckState, card_id: &str, now: i64) -> [i64; 4] {
    let current = effective_state(state, card_id, now);
    Grade::ALL.map(|g| interval_days(next_box(current.box_index, g)))
}

/// Share of the deck currently due. An empty deck has nothing due.
pub fn completion_ratio(deck: &Deck, state: &DeckState, now: i64) -> f64 {
    if deck.cards.is_empty() {
        return 0.0;
    }
    list_due(deck, state, now).len() as f64 / deck.cards.len() as f64
}

/// Review statistics for a deck at `now`
pub fn deck_stats(deck: &Deck, state: &DeckState, now: i64) -> ReviewStats {
    let mut stats = ReviewStats {
        total_cards: deck.cards.len(),
        ..ReviewStats::default()
    };

    for card in &deck.cards {
        if !state.contains_key(&card.id) {
            stats.new_cards += 1;
        }

        let effective = effective_state(state, &card.id, now);
        stats.boxes[effective.box_index as usize] += 1;
        if effective.is_due(now) {
            stats.due_cards += 1;
        }
    }

    if stats.total_cards > 0 {
        stats.completion_ratio = stats.due_cards as f64 / stats.total_cards as f64;
    }

    stats
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: i64) -> String {
    if days <= 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flashcards::models::Card;

    const NOW: i64 = 1_700_000_000_000;

    fn two_card_deck() -> Deck {
        Deck::new(
            "test",
            "Test",
            vec![Card::new("a", "あ", "a"), Card::new("b", "い", "i")],
        )
    }

    fn ids(due: &[CardWithState<'_>]) -> Vec<String> {
        due.iter().map(|cs| cs.card.id.clone()).collect()
    }

    #[test]
    fn test_next_box_stays_in_range() {
        for b in 0..=MAX_BOX {
            for g in Grade::ALL {
                assert!(next_box(b, g) <= MAX_BOX, "box {} grade {}", b, g);
            }
        }
    }

    #[test]
    fn test_again_demotes() {
        let mut state = DeckState::new();
        state.insert("a".into(), ReviewState::new("a", 3, NOW - 1));

        let updated = grade(&mut state, "a", Grade::Again, NOW);

        assert_eq!(updated.box_index, 2);
        assert_eq!(updated.due_at, NOW + 2 * MS_PER_DAY);
        assert_eq!(state["a"], updated);
    }

    #[test]
    fn test_again_on_box_zero_stays_due() {
        let mut state = DeckState::new();
        let updated = grade(&mut state, "a", Grade::Again, NOW);

        assert_eq!(updated.box_index, 0);
        assert_eq!(updated.due_at, NOW);
    }

    #[test]
    fn test_easy_caps_at_top_box() {
        let mut state = DeckState::new();
        state.insert("a".into(), ReviewState::new("a", 4, NOW));

        let updated = grade(&mut state, "a", Grade::Easy, NOW);

        assert_eq!(updated.box_index, 5);
        assert_eq!(updated.due_at, NOW + 20 * MS_PER_DAY);
    }

    #[test]
    fn test_hard_keeps_box_and_reschedules() {
        let mut state = DeckState::new();
        state.insert("a".into(), ReviewState::new("a", 3, NOW - 10));

        let updated = grade(&mut state, "a", Grade::Hard, NOW);

        assert_eq!(updated.box_index, 3);
        assert_eq!(updated.due_at, NOW + 5 * MS_PER_DAY);
    }

    #[test]
    fn test_good_promotes_one() {
        let mut state = DeckState::new();
        let updated = grade(&mut state, "a", Grade::Good, NOW);

        assert_eq!(updated.box_index, 1);
        assert_eq!(updated.due_at, NOW + MS_PER_DAY);
    }

    #[test]
    fn test_list_due_orders_by_box_then_due_at() {
        let deck = Deck::new(
            "test",
            "Test",
            vec![
                Card::new("high", "1", "1"),
                Card::new("low-late", "2", "2"),
                Card::new("low-early", "3", "3"),
                Card::new("future", "4", "4"),
                Card::new("fresh", "5", "5"),
            ],
        );

        let mut state = DeckState::new();
        state.insert("high".into(), ReviewState::new("high", 4, NOW - 100));
        state.insert("low-late".into(), ReviewState::new("low-late", 1, NOW - 10));
        state.insert("low-early".into(), ReviewState::new("low-early", 1, NOW - 50));
        state.insert("future".into(), ReviewState::new("future", 0, NOW + 1));

        let due = list_due(&deck, &state, NOW);

        assert_eq!(ids(&due), vec!["fresh", "low-early", "low-late", "high"]);
        for pair in due.windows(2) {
            let a = (pair[0].state.box_index, pair[0].state.due_at);
            let b = (pair[1].state.box_index, pair[1].state.due_at);
            assert!(a <= b);
        }
    }

    #[test]
    fn test_due_set_matches_due_at() {
        let deck = two_card_deck();
        let mut state = DeckState::new();
        state.insert("a".into(), ReviewState::new("a", 2, NOW));
        state.insert("b".into(), ReviewState::new("b", 2, NOW + 1));

        // Due exactly at `now` counts
        assert_eq!(ids(&list_due(&deck, &state, NOW)), vec!["a"]);
        assert_eq!(ids(&list_due(&deck, &state, NOW + 1)), vec!["a", "b"]);
    }

    #[test]
    fn test_list_due_empty_when_nothing_due() {
        let deck = two_card_deck();
        let mut state = DeckState::new();
        grade(&mut state, "a", Grade::Good, NOW);
        grade(&mut state, "b", Grade::Easy, NOW);

        assert!(list_due(&deck, &state, NOW).is_empty());
    }

    #[test]
    fn test_implicit_default_matches_explicit_fresh_state() {
        let deck = two_card_deck();
        let implicit = DeckState::new();
        let mut explicit = DeckState::new();
        explicit.insert("a".into(), ReviewState::fresh("a", NOW));
        explicit.insert("b".into(), ReviewState::fresh("b", NOW));

        assert_eq!(list_due(&deck, &implicit, NOW), list_due(&deck, &explicit, NOW));

        for g in Grade::ALL {
            let mut left = implicit.clone();
            let mut right = explicit.clone();
            assert_eq!(grade(&mut left, "a", g, NOW), grade(&mut right, "a", g, NOW));
        }
    }

    #[test]
    fn test_two_card_scenario() {
        let deck = two_card_deck();
        let mut state = DeckState::new();

        assert_eq!(ids(&list_due(&deck, &state, NOW)), vec!["a", "b"]);

        let a = grade(&mut state, "a", Grade::Good, NOW);
        assert_eq!((a.box_index, a.due_at), (1, NOW + MS_PER_DAY));

        let b = grade(&mut state, "b", Grade::Again, NOW);
        assert_eq!((b.box_index, b.due_at), (0, NOW));

        assert_eq!(ids(&list_due(&deck, &state, NOW)), vec!["b"]);
    }

    #[test]
    fn test_grade_replaces_prior_entry() {
        let mut state = DeckState::new();
        grade(&mut state, "a", Grade::Easy, NOW);
        grade(&mut state, "a", Grade::Again, NOW);

        assert_eq!(state.len(), 1);
        assert_eq!(state["a"].box_index, 1);
    }

    #[test]
    fn test_grade_parsing() {
        assert_eq!("again".parse::<Grade>(), Ok(Grade::Again));
        assert_eq!("HARD".parse::<Grade>(), Ok(Grade::Hard));
        assert_eq!(" Good ".parse::<Grade>(), Ok(Grade::Good));
        assert_eq!("4".parse::<Grade>(), Ok(Grade::Easy));
        assert_eq!(
            "meh".parse::<Grade>(),
            Err(SchedulerError::InvalidGrade("meh".to_string()))
        );
        assert!("0".parse::<Grade>().is_err());
        assert!(Grade::from_rating(5).is_err());
    }

    #[test]
    fn test_preview_intervals() {
        let mut state = DeckState::new();
        assert_eq!(preview_intervals(&state, "a", NOW), [0, 0, 1, 2]);

        state.insert("a".into(), ReviewState::new("a", 4, NOW));
        assert_eq!(preview_intervals(&state, "a", NOW), [5, 10, 20, 20]);
    }

    #[test]
    fn test_deck_stats_and_ratio() {
        let deck = two_card_deck();
        let mut state = DeckState::new();
        grade(&mut state, "a", Grade::Easy, NOW);

        let stats = deck_stats(&deck, &state, NOW);
        assert_eq!(stats.total_cards, 2);
        assert_eq!(stats.due_cards, 1);
        assert_eq!(stats.new_cards, 1);
        assert_eq!(stats.boxes, [1, 0, 1, 0, 0, 0]);
        assert_eq!(stats.completion_ratio, 0.5);
        assert_eq!(completion_ratio(&deck, &state, NOW), 0.5);

        let empty = Deck::new("empty", "Empty", Vec::new());
        assert_eq!(completion_ratio(&empty, &state, NOW), 0.0);
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(0), "now");
        assert_eq!(format_interval(1), "1d");
        assert_eq!(format_interval(5), "5d");
        assert_eq!(format_interval(7), "1w");
        assert_eq!(format_interval(20), "2w");
        assert_eq!(format_interval(30), "1mo");
        assert_eq!(format_interval(365), "1y");
    }
}
