pub mod config;
pub mod flashcards;

pub use config::{Config, ConfigError};

/// Current wall-clock time in milliseconds since the Unix epoch
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
