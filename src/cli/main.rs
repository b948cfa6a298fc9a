use std::path::PathBuf;

use clap::Parser;

use crate::Commands;

/// Main CLI application arguments and command structure
#[derive(Parser, Debug)]
#[clap(
    name = "moodtrack",
    version,
    about = "Record a daily mood rating and chart the last seven days"
)]
pub struct Cli {
    /// Path to the configuration file
    #[clap(short = 'c', long, value_parser)]
    pub config: Option<PathBuf>,

    /// Path to the mood database
    #[clap(long, value_parser)]
    pub database: Option<PathBuf>,

    /// Start with the dark theme
    #[clap(long)]
    pub dark: bool,

    /// Verbose output mode
    #[clap(short, long)]
    pub verbose: bool,

    /// Subcommands for the moodtrack application
    #[clap(subcommand)]
    pub command: Option<Commands>,
}
