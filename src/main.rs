use clap::Parser;
use log::{error, info};

use moodtrack::{App, AppState, Cli, Commands, Config, MoodStore, Result, Theme};

pub fn initialize_logger(verbose: bool) {
    // Quiet by default so log lines do not land on top of the interactive view.
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp_secs()
        .format_module_path(true)
        .init();

    info!("Logger initialized");
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.unwrap_or_else(Config::default_path);
    let mut config = Config::load(&config_path)?;

    if let Some(database) = cli.database {
        config.database_path = database;
    }
    let theme = if cli.dark { Theme::Dark } else { config.theme };

    let store = MoodStore::new(&config.database_path);
    store.initialize()?;
    info!("Using database {}", store.path().display());

    let state = AppState::new(store, theme, config.chart_height);
    let mut app = App::new(state, config, config_path);
    app.run(cli.command.unwrap_or(Commands::Ui))
}

fn main() {
    let cli = Cli::parse();
    initialize_logger(cli.verbose);

    info!("Application starting up");

    if let Err(e) = run(cli) {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    info!("Application shutting down");
}
