use anyhow::Result;

use crate::app::App;
use crate::render::terminal::format_timestamp;
use crate::OutputFormat;

pub fn run(
    app: &App,
    deck_query: &str,
    limit: Option<usize>,
    now: i64,
    format: &OutputFormat,
    _use_color: bool,
) -> Result<()> {
    let deck = app.find_deck(deck_query)?;
    let session = app.open_session(&deck)?;
    let due = session.due(now);
    let shown = limit.unwrap_or(due.len()).min(due.len());

    match format {
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = due.iter().take(shown).map(|cs| {
                serde_json::json!({
                    "id": cs.card.id,
                    "front": cs.card.front,
                    "back": cs.card.back,
                    "tags": cs.card.tags,
                    "box": cs.state.box_index,
                    "dueAt": cs.state.due_at,
                })
            }).collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if due.is_empty() {
                println!("All caught up: nothing due in {}.", deck.name);
                return Ok(());
            }

            let front_width = due.iter().map(|cs| cs.card.front.chars().count()).max().unwrap_or(5).min(30).max(5);

            println!("{:<3} {:<fw$} {}", "Box", "Front", "Due since", fw = front_width);
            println!("{} {} {}",
                "\u{2500}".repeat(3),
                "\u{2500}".repeat(front_width),
                "\u{2500}".repeat(16));

            for cs in due.iter().take(shown) {
                println!("{:<3} {:<fw$} {}", cs.state.box_index, cs.card.front,
                    format_timestamp(cs.state.due_at), fw = front_width);
            }

            if shown < due.len() {
                println!("... and {} more", due.len() - shown);
            }
            println!("\n{} of {} cards due", due.len(), deck.cards.len());
        }
    }

    Ok(())
}
