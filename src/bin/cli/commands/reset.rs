use anyhow::{Context, Result};

use jph_lib::flashcards::StateStore;

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &App, deck_query: &str, format: &OutputFormat) -> Result<()> {
    let deck = app.find_deck(deck_query)?;
    app.store.reset(&deck.id)
        .with_context(|| format!("Failed to reset review state for {}", deck.id))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "deck": deck.id, "reset": true }));
        }
        OutputFormat::Plain => {
            println!("Reset review progress for {} ({} cards now due)", deck.name, deck.cards.len());
        }
    }

    Ok(())
}
