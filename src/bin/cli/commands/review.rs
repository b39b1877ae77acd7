use anyhow::Result;

use jph_lib::flashcards::algorithm::format_interval;
use jph_lib::flashcards::Grade;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    deck_query: &str,
    show_answer: bool,
    now: i64,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let deck = app.find_deck(deck_query)?;
    let session = app.open_session(&deck)?;
    let due_count = session.due(now).len();

    let Some(current) = session.current(now) else {
        match format {
            OutputFormat::Json => println!("null"),
            OutputFormat::Plain => {
                println!("All caught up for now. No cards due in {}.", deck.name);
            }
        }
        return Ok(());
    };

    let preview = session.preview(&current.card.id, now);

    match format {
        OutputFormat::Json => {
            let intervals: serde_json::Map<String, serde_json::Value> = Grade::ALL.iter()
                .zip(preview.iter())
                .map(|(g, days)| (g.to_string(), serde_json::json!(days)))
                .collect();
            let back = if show_answer { Some(&current.card.back) } else { None };
            let output = serde_json::json!({
                "deck": deck.id,
                "id": current.card.id,
                "front": current.card.front,
                "back": back,
                "box": current.state.box_index,
                "due": due_count,
                "total": deck.cards.len(),
                "intervals": intervals,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{}  Due: {} / {}  Box {}",
                paint(&deck.name, Color::BOLD, use_color),
                due_count, deck.cards.len(), current.state.box_index);
            println!();
            println!("  {}", paint(&current.card.front, Color::BOLD, use_color));
            if show_answer {
                println!("  {}", paint(&current.card.back, Color::GREEN, use_color));
            }
            println!();

            let buttons: Vec<String> = Grade::ALL.iter()
                .zip(preview.iter())
                .enumerate()
                .map(|(i, (g, days))| format!("{} {} ({})", i + 1, g, format_interval(*days)))
                .collect();
            println!("  {}", paint(&buttons.join("   "), Color::DIM, use_color));
        }
    }

    Ok(())
}
