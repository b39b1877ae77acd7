use anyhow::Result;

use crate::app::App;
use crate::render::terminal::{box_histogram, paint, Color};
use crate::OutputFormat;

pub fn run(
    app: &App,
    deck_query: &str,
    now: i64,
    format: &OutputFormat,
    use_color: bool,
) -> Result<()> {
    let deck = app.find_deck(deck_query)?;
    let session = app.open_session(&deck)?;
    let stats = session.stats(now);

    match format {
        OutputFormat::Json => {
            let mut output = serde_json::to_value(&stats)?;
            output["deck"] = serde_json::json!(deck.id);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("{} ({})", paint(&deck.name, Color::BOLD, use_color), deck.id);
            println!("  Cards: {}  Due: {}  Never reviewed: {}",
                stats.total_cards, stats.due_cards, stats.new_cards);
            println!("  Due ratio: {:.0}%", stats.completion_ratio * 100.0);
            println!();
            for line in box_histogram(&stats.boxes, use_color) {
                println!("{}", line);
            }
        }
    }

    Ok(())
}
