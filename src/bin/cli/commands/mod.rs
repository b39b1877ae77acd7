pub mod decks;
pub mod due;
pub mod grade;
pub mod reset;
pub mod review;
pub mod stats;
