//! Flashcard spaced repetition for JPH
//!
//! This module provides:
//! - Leitner box scheduling (due lists, grade transitions)
//! - Deck sources (built-in Japanese decks, JSON deck directories)
//! - Per-deck review state persistence
//! - Review sessions that write through after every grade

pub mod algorithm;
pub mod builtin;
pub mod catalog;
pub mod models;
pub mod session;
pub mod storage;

pub use algorithm::{Grade, SchedulerError};
pub use builtin::BuiltinCatalog;
pub use catalog::{CatalogError, CompositeDeckSource, DeckSource, DirectoryDeckSource};
pub use models::*;
pub use session::{ReviewSession, SessionError};
pub use storage::{JsonStateStore, MemoryStateStore, StateStore, StorageError};
