use anyhow::{Context, Result};

use jph_lib::flashcards::Grade;

use crate::app::App;
use crate::render::terminal::{format_due, paint, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    deck_query: &str,
    grade: &str,
    card_id: Option<&str>,
    now: i64,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    // Reject bad grades before any state is loaded
    let grade: Grade = grade.parse()?;

    let deck = app.find_deck(deck_query)?;
    let mut session = app.open_session(&deck)?;

    let (from_box, updated) = match card_id {
        Some(id) => {
            let from = session.state().get(id).map(|s| s.box_index).unwrap_or(0);
            (from, session.grade_card(id, grade, now)?)
        }
        None => {
            let from = session.current(now).map(|cs| cs.state.box_index).unwrap_or(0);
            (from, session.grade_current(grade, now)?)
        }
    };

    let card = deck.card(&updated.card_id)
        .context("Graded card missing from deck")?;
    let remaining = session.due(now).len();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deck": deck.id,
                "id": updated.card_id,
                "grade": grade,
                "fromBox": from_box,
                "box": updated.box_index,
                "dueAt": updated.due_at,
                "remainingDue": remaining,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            let color = match grade {
                Grade::Again => Color::RED,
                Grade::Hard => Color::YELLOW,
                Grade::Good | Grade::Easy => Color::GREEN,
            };
            println!("{} {}  {}",
                paint(grade.as_str(), color, use_color),
                card.front,
                paint(&card.back, Color::DIM, use_color));
            println!("  Box {} -> {}, {}", from_box, updated.box_index, format_due(updated.due_at, now));
            println!("  {} cards still due", remaining);
        }
    }

    Ok(())
}
