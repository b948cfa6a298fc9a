//! Shared aliases and the command-line surface.
use clap::Subcommand;

use crate::{MoodError, Theme};

/// A specialized Result type for moodtrack operations.
pub type Result<T> = std::result::Result<T, MoodError>;

/// Available subcommands for the moodtrack application
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Open the interactive mood tracker (default)
    Ui,

    /// Record a mood rating without opening the interactive view
    Add {
        /// Mood rating from 1 (very sad) to 5 (very happy)
        #[clap(allow_hyphen_values = true)]
        mood: String,

        /// Optional notes for the entry
        #[clap(short, long)]
        notes: Option<String>,

        /// Compose the notes in the configured editor
        #[clap(short, long, conflicts_with = "notes")]
        edit: bool,
    },

    /// Show average moods for the most recent days
    History {
        /// Output the daily averages as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// List recorded entries, oldest first
    List {
        /// Show only the most recent entries
        #[clap(short = 'n', long, default_value_t = 20)]
        limit: usize,

        /// Format output as JSON
        #[clap(short, long)]
        json: bool,
    },

    /// Create the database if it does not exist yet
    Init,

    /// Show or set the theme used at startup
    Theme {
        /// Theme to store in the configuration
        #[clap(value_enum)]
        theme: Option<Theme>,
    },
}
