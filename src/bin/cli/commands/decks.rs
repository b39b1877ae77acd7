use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(app: &App, now: i64, format: &OutputFormat, use_color: bool) -> Result<()> {
    let decks = app.list_decks()?;

    let mut rows = Vec::new();
    for deck in &decks {
        let session = app.open_session(deck)?;
        let due = session.due(now).len();
        rows.push((deck, due));
    }
    let orphaned = app.orphaned_state_ids(&decks)?;

    match format {
        OutputFormat::Json => {
            let deck_list: Vec<serde_json::Value> = rows.iter().map(|(deck, due)| {
                serde_json::json!({
                    "id": deck.id,
                    "name": deck.name,
                    "dueCards": due,
                    "totalCards": deck.cards.len(),
                })
            }).collect();
            let output = serde_json::json!({
                "decks": deck_list,
                "orphanedState": orphaned,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            if rows.is_empty() {
                println!("No decks found.");
                return Ok(());
            }

            let id_width = rows.iter().map(|(d, _)| d.id.chars().count()).max().unwrap_or(2).max(2);
            let name_width = rows.iter().map(|(d, _)| d.name.chars().count()).max().unwrap_or(4).max(4);

            println!("{:<iw$} {:<nw$} {:>9}", "Id", "Name", "Due",
                iw = id_width, nw = name_width);
            println!("{} {} {}",
                "\u{2500}".repeat(id_width),
                "\u{2500}".repeat(name_width),
                "\u{2500}".repeat(9));

            for (deck, due) in &rows {
                let counts = format!("{:>4}/{:<4}", due, deck.cards.len());
                let counts = if *due > 0 { paint(&counts, Color::YELLOW, use_color) } else { counts };
                println!("{:<iw$} {:<nw$} {}", deck.id, deck.name, counts,
                    iw = id_width, nw = name_width);
            }

            println!("\n{} decks total", rows.len());

            if !orphaned.is_empty() {
                println!("\nStored review state with no matching deck:");
                for id in &orphaned {
                    println!("  {}", paint(id, Color::DIM, use_color));
                }
            }
        }
    }

    Ok(())
}
