use chrono::{DateTime, Local, Utc};

use jph_lib::flashcards::algorithm::{format_interval, MS_PER_DAY};

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

/// Wrap text in a color when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Local date and time of a millisecond timestamp
pub fn format_timestamp(ms: i64) -> String {
    match DateTime::<Utc>::from_timestamp_millis(ms) {
        Some(utc) => utc.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => ms.to_string(),
    }
}

/// "due now" or "in 5d", relative to `now`
pub fn format_due(due_at: i64, now: i64) -> String {
    if due_at <= now {
        return "due now".to_string();
    }
    // Round up so a card due in 23 hours reads as 1d, not now
    let days = (due_at - now + MS_PER_DAY - 1) / MS_PER_DAY;
    format!("in {}", format_interval(days))
}

/// One line per box with a proportional bar
pub fn box_histogram(boxes: &[usize], use_color: bool) -> Vec<String> {
    let max = boxes.iter().copied().max().unwrap_or(0).max(1);
    boxes
        .iter()
        .enumerate()
        .map(|(b, &count)| {
            let width = (count * 30 + max - 1) / max;
            let bar = "\u{2588}".repeat(width);
            format!("  Box {} {:>5} {}", b, count, paint(&bar, Color::CYAN, use_color))
        })
        .collect()
}
