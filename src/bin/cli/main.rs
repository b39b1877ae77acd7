mod app;
mod commands;
mod render;

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jph-cli", about = "JPH flashcard reviews from the terminal", version)]
struct Cli {
    /// Config file (default: platform config dir/jph/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the data directory holding review state
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, default_value = "plain")]
    format: OutputFormat,

    /// Disable ANSI colors
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
}

#[derive(Subcommand)]
enum Command {
    /// List decks with due and total card counts
    Decks,

    /// List cards due now, in review order
    Due {
        /// Deck id or name (case-insensitive prefix match)
        deck: String,
        /// Maximum cards to show
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the next card to review
    Review {
        /// Deck id or name
        deck: String,
        /// Also print the answer
        #[arg(long)]
        show_answer: bool,
    },

    /// Grade a card and save the new schedule
    Grade {
        /// Deck id or name
        deck: String,
        /// again, hard, good, easy (or 1-4)
        grade: String,
        /// Grade this card instead of the next due one
        #[arg(long)]
        card: Option<String>,
    },

    /// Show box distribution and due counts for a deck
    Stats {
        /// Deck id or name
        deck: String,
    },

    /// Forget all review progress for a deck
    Reset {
        /// Deck id or name
        deck: String,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let use_color = !cli.no_color && std::io::stdout().is_terminal();
    let app = app::App::new(cli.config.as_deref(), cli.data_dir)?;
    let now = jph_lib::now_ms();

    match cli.command {
        Command::Decks => {
            commands::decks::run(&app, now, &cli.format, use_color)?;
        }
        Command::Due { deck, limit } => {
            commands::due::run(&app, &deck, limit, now, &cli.format, use_color)?;
        }
        Command::Review { deck, show_answer } => {
            commands::review::run(&app, &deck, show_answer, now, &cli.format, use_color)?;
        }
        Command::Grade { deck, grade, card } => {
            commands::grade::run(&app, &deck, &grade, card.as_deref(), now, &cli.format, use_color)?;
        }
        Command::Stats { deck } => {
            commands::stats::run(&app, &deck, now, &cli.format, use_color)?;
        }
        Command::Reset { deck } => {
            commands::reset::run(&app, &deck, &cli.format)?;
        }
    }

    Ok(())
}
