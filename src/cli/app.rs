//! CLI module for the moodtrack application
//!
//! This module runs the interactive view and the one-shot subcommands on top
//! of [`AppState`].
use std::path::PathBuf;

use console::{style, Style, Term};
use log::{debug, info, warn};

use crate::{
    action_for_key, compose_in_editor, Action, AppState, Commands, Config, FormStatus, MoodEntry,
    MoodError, MoodRating, Notice, NoticeKind, Palette, Result, Theme, MOOD_GUIDE, NO_DATA_MESSAGE,
};

const NOTES_WIDTH: usize = 30;
const NOTES_LINES: usize = 4;

/// CLI Application handler - dispatches commands against the mood store
pub struct App {
    /// Form, theme and history shared by every handler
    state: AppState,

    /// Application configuration
    config: Config,

    /// Where `theme` writes the configuration back to
    config_path: PathBuf,

    /// Status line shown under the actions in the interactive view
    status_line: Option<String>,
}

impl App {
    pub fn new(state: AppState, config: Config, config_path: PathBuf) -> Self {
        Self {
            state,
            config,
            config_path,
            status_line: None,
        }
    }

    /// Run the CLI application with the given command
    pub fn run(&mut self, command: Commands) -> Result<()> {
        match command {
            Commands::Ui => self.run_session()?,
            Commands::Add { mood, notes, edit } => self.add_entry(mood, notes, edit)?,
            Commands::History { json } => self.show_history(json)?,
            Commands::List { limit, json } => self.list_entries(limit, json)?,
            Commands::Init => {
                self.state.store().initialize()?;
                println!(
                    "Database initialized at {}",
                    self.state.store().path().display()
                );
            }
            Commands::Theme { theme } => self.handle_theme(theme)?,
        }

        Ok(())
    }

    fn add_entry(&mut self, mood: String, notes: Option<String>, edit: bool) -> Result<()> {
        let notes = if edit {
            compose_in_editor(&self.config.get_editor_command(), "")?
        } else {
            notes.unwrap_or_default()
        };

        self.state.mood_input = mood;
        self.state.notes_input = notes;

        let notice = self.state.save();
        if notice.kind == NoticeKind::Error {
            return Err(MoodError::ApplicationError {
                message: notice.message,
            });
        }

        println!("{}", style(&notice.message).green());
        self.print_history()
    }

    fn show_history(&mut self, json: bool) -> Result<()> {
        if json {
            let history = self.state.view_history()?;
            println!("{}", serde_json::to_string_pretty(&history.aggregation)?);
            return Ok(());
        }

        self.state.view_history()?;
        self.print_history()
    }

    /// Prints the chart computed by the last refresh.
    fn print_history(&self) -> Result<()> {
        let Some(history) = self.state.history() else {
            return Ok(());
        };

        if let Some(warning) = history.skipped_warning() {
            eprintln!("{}", style(warning).yellow());
        }

        match self.state.chart_lines() {
            Some(lines) => {
                println!();
                for line in lines {
                    println!("{}", line);
                }
            }
            None => println!("{}", NO_DATA_MESSAGE),
        }

        Ok(())
    }

    fn list_entries(&self, limit: usize, json: bool) -> Result<()> {
        let entries = self.state.store().read_all()?;

        if json {
            let start = entries.len().saturating_sub(limit);
            println!("{}", serde_json::to_string_pretty(&entries[start..])?);
            return Ok(());
        }

        let term_width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        for line in list_lines(&entries, limit, term_width) {
            println!("{}", line);
        }
        Ok(())
    }

    fn handle_theme(&mut self, theme: Option<Theme>) -> Result<()> {
        match theme {
            None => println!("Current theme: {}", self.config.theme),
            Some(theme) => {
                self.config.theme = theme;
                self.config.save(&self.config_path)?;
                println!("Theme set to {}", theme);
            }
        }
        Ok(())
    }

    /// Runs the full-screen view until the user quits.
    fn run_session(&mut self) -> Result<()> {
        let term = Term::stdout();
        if !term.is_term() {
            return Err(MoodError::ApplicationError {
                message: "The interactive view needs a terminal; use a subcommand instead"
                    .to_string(),
            });
        }

        info!("Starting interactive session");
        term.hide_cursor()?;
        let result = self.session_loop(&term);
        term.show_cursor()?;
        term.clear_screen()?;
        info!("Interactive session closed");
        result
    }

    fn session_loop(&mut self, term: &Term) -> Result<()> {
        loop {
            self.draw(term)?;

            let key = term.read_key()?;
            let Some(action) = action_for_key(&key) else {
                debug!("Ignoring key {:?}", key);
                continue;
            };

            match action {
                Action::Save => {
                    let notice = self.state.save();
                    if notice.kind != NoticeKind::Error {
                        self.refresh_status_line();
                    }
                    self.dialog(term, &notice)?;
                }
                Action::ViewHistory => self.refresh_history(term)?,
                Action::ToggleTheme => {
                    let theme = self.state.toggle_theme();
                    self.status_line = Some(format!("Switched to {} mode", theme));
                }
                Action::TypeMood(c) => self.state.type_mood(c),
                Action::EraseMood => self.state.erase_mood(),
                Action::EditNotes => {
                    self.draw(term)?;
                    term.show_cursor()?;
                    term.write_str("Notes: ")?;
                    let notes = term.read_line_initial_text(&self.state.notes_input)?;
                    term.hide_cursor()?;
                    self.state.notes_input = notes;
                }
                Action::EditNotesInEditor => {
                    term.show_cursor()?;
                    let edited =
                        compose_in_editor(&self.config.get_editor_command(), &self.state.notes_input);
                    term.hide_cursor()?;
                    match edited {
                        Ok(notes) => self.state.notes_input = notes,
                        Err(e) => self.dialog(term, &Notice::error(e.to_string()))?,
                    }
                }
                Action::Quit => return Ok(()),
            }
        }
    }

    fn refresh_history(&mut self, term: &Term) -> Result<()> {
        match self.state.view_history() {
            Ok(_) => {
                self.refresh_status_line();
                Ok(())
            }
            Err(e) => {
                warn!("Failed to load history: {}", e);
                self.dialog(term, &Notice::error(format!("Failed to load history: {}", e)))
            }
        }
    }

    fn refresh_status_line(&mut self) {
        self.status_line = match self.state.history() {
            Some(history) if history.chart.is_none() => Some(NO_DATA_MESSAGE.to_string()),
            Some(history) => history.skipped_warning(),
            None => None,
        };
    }

    fn draw(&self, term: &Term) -> Result<()> {
        let palette = self.state.theme().palette();
        let width = terminal_size::terminal_size()
            .map(|(w, _)| w.0 as usize)
            .unwrap_or(80);

        term.clear_screen()?;
        for line in self.view_lines(palette, width) {
            term.write_line(&line)?;
        }
        Ok(())
    }

    /// Lines of the main view, padded to `width` with the palette background.
    fn view_lines(&self, palette: &Palette, width: usize) -> Vec<String> {
        let text = palette.text();
        let mut lines = Vec::new();

        lines.push(paint(&centered("Mood Tracker", width), &palette.title(), width));
        lines.push(paint("", &text, width));
        lines.push(paint("  Mood Rating (1-5):", &text, width));
        for (rating, description) in MOOD_GUIDE {
            lines.push(paint(&format!("    {}: {}", rating, description), &text, width));
        }

        let field = format!(" {:<8}", self.state.mood_input);
        lines.push(join_painted(
            &[("  ", &text), (field.as_str(), &palette.entry())],
            &text,
            width,
        ));

        lines.push(paint("  Notes (optional):", &text, width));
        for row in notes_rows(&self.state.notes_input) {
            let row = format!(" {:<w$}", row, w = NOTES_WIDTH);
            lines.push(join_painted(
                &[("  ", &text), (row.as_str(), &palette.entry())],
                &text,
                width,
            ));
        }
        lines.push(paint("", &text, width));

        let save_style = if self.state.status() == FormStatus::Saved {
            palette.button_active()
        } else {
            palette.button()
        };
        lines.push(join_painted(
            &[
                ("  ", &text),
                (" Save Mood (Ctrl+S) ", &save_style),
                ("  ", &text),
                (" View History (h) ", &palette.history_button()),
                ("  ", &text),
                (" Toggle Theme (Ctrl+T) ", &palette.button()),
            ],
            &text,
            width,
        ));
        lines.push(paint(
            "  0-9 type mood · n notes · e notes in editor · q quit",
            &text.clone().dim(),
            width,
        ));
        lines.push(paint(
            &format!("  {}", self.status_line.as_deref().unwrap_or("")),
            &text,
            width,
        ));

        if let Some(chart) = self.state.chart_lines() {
            let graph = palette.graph();
            for line in chart {
                lines.push(format!("{}{}", graph.apply_to("  "), line));
            }
        }

        lines
    }

    /// Shows a blocking message and waits for a key press.
    fn dialog(&self, term: &Term, notice: &Notice) -> Result<()> {
        let palette = self.state.theme().palette();
        let heading = match notice.kind {
            NoticeKind::Info => palette.button(),
            NoticeKind::Error => Style::new().white().on_red().bold(),
        };

        let inner = notice.message.chars().count().max(notice.title.len()).max(26) + 2;
        term.write_line("")?;
        term.write_line(&format!(
            "  {}",
            heading.apply_to(format!(" {:<w$}", notice.title, w = inner - 1))
        ))?;
        term.write_line(&format!(
            "  {}",
            palette.entry().apply_to(format!(" {:<w$}", notice.message, w = inner - 1))
        ))?;
        term.write_line(&format!(
            "  {}",
            palette
                .entry()
                .dim()
                .apply_to(format!(" {:<w$}", "Press any key to continue", w = inner - 1))
        ))?;

        term.read_key()?;
        Ok(())
    }
}

/// Text lines for `list`: the newest `limit` entries and a summary.
fn list_lines(entries: &[MoodEntry], limit: usize, width: usize) -> Vec<String> {
    if entries.is_empty() {
        return vec!["No mood entries recorded yet.".to_string()];
    }

    let start = entries.len().saturating_sub(limit);
    let shown = &entries[start..];
    let mut lines = Vec::with_capacity(shown.len() * 2 + 2);

    for entry in shown {
        let description = MoodRating::new(entry.mood)
            .map(MoodRating::description)
            .unwrap_or("");
        lines.push(format!(
            "{:>4}  {}  {} {}",
            entry.id,
            entry.date,
            style(entry.mood).bold(),
            style(description).cyan()
        ));

        if !entry.notes.is_empty() {
            let preview = notes_preview(&entry.notes, width.saturating_sub(8).max(20));
            lines.push(format!("      {}", style(preview).dim()));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Showing {} of {} entr{}",
        shown.len(),
        entries.len(),
        if entries.len() == 1 { "y" } else { "ies" }
    ));
    lines
}

fn paint(text: &str, style: &Style, width: usize) -> String {
    style.apply_to(pad(text, width)).to_string()
}

/// Paints each part with its own style and fills the rest of the line.
fn join_painted(parts: &[(&str, &Style)], fill: &Style, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for (text, style) in parts {
        used += text.chars().count();
        out.push_str(&style.apply_to(*text).to_string());
    }
    out.push_str(&fill.apply_to(" ".repeat(width.saturating_sub(used))).to_string());
    out
}

fn pad(text: &str, width: usize) -> String {
    let len = console::measure_text_width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn centered(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", " ".repeat(width.saturating_sub(len) / 2), text)
}

/// Wraps notes into the fixed-size notes box.
fn notes_rows(notes: &str) -> Vec<String> {
    let mut rows: Vec<String> = Vec::new();
    for line in notes.lines() {
        let chars: Vec<char> = line.chars().collect();
        if chars.is_empty() {
            rows.push(String::new());
        }
        for chunk in chars.chunks(NOTES_WIDTH) {
            rows.push(chunk.iter().collect());
        }
    }

    if rows.len() > NOTES_LINES {
        rows.truncate(NOTES_LINES);
        if let Some(last) = rows.last_mut() {
            let kept: String = last.chars().take(NOTES_WIDTH - 3).collect();
            *last = format!("{}...", kept);
        }
    }
    rows.resize(NOTES_LINES, String::new());
    rows
}

fn notes_preview(notes: &str, max_chars: usize) -> String {
    let first_line = notes
        .lines()
        .find(|line| !line.trim().is_empty())
        .unwrap_or("");
    if first_line.chars().count() <= max_chars && notes.lines().count() <= 1 {
        return first_line.to_string();
    }
    let truncated: String = first_line.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", truncated)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::MoodStore;

    fn app_in(dir: &tempfile::TempDir) -> App {
        let store = MoodStore::new(dir.path().join("mood_tracker.db"));
        store.initialize().expect("initialize");
        let config = Config {
            database_path: store.path().to_path_buf(),
            ..Config::default()
        };
        let state = AppState::new(store, Theme::Light, 10);
        App::new(state, config, dir.path().join("config.json"))
    }

    #[test]
    fn add_command_stores_a_valid_entry() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_in(&dir);

        app.run(Commands::Add {
            mood: "5".to_string(),
            notes: Some("sunny".to_string()),
            edit: false,
        })
        .expect("add");

        let entries = app.state.store().read_all().expect("read");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].mood, 5);
        assert_eq!(entries[0].notes, "sunny");
    }

    #[test]
    fn add_command_rejects_out_of_range_mood() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_in(&dir);

        let err = app
            .run(Commands::Add {
                mood: "0".to_string(),
                notes: None,
                edit: false,
            })
            .unwrap_err();

        assert_eq!(err.to_string(), crate::RANGE_MESSAGE);
        assert!(app.state.store().read_all().expect("read").is_empty());
    }

    #[test]
    fn theme_command_persists_choice() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_in(&dir);

        app.run(Commands::Theme {
            theme: Some(Theme::Dark),
        })
        .expect("theme");

        let saved = Config::load(&dir.path().join("config.json")).expect("load");
        assert_eq!(saved.theme, Theme::Dark);
    }

    #[test]
    fn view_shows_form_and_chart_after_history() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_in(&dir);
        app.state
            .store()
            .insert("Monday, 2024-01-01 09:00 AM", 3, "")
            .expect("insert");
        app.state.mood_input = "4".to_string();
        app.state.view_history().expect("history");

        let lines: Vec<String> = app
            .view_lines(Theme::Light.palette(), 80)
            .iter()
            .map(|l| console::strip_ansi_codes(l).into_owned())
            .collect();

        assert!(lines[0].contains("Mood Tracker"));
        assert!(lines.iter().any(|l| l.contains("3: Neutral 😐")));
        assert!(lines.iter().any(|l| l.trim() == "4"));
        assert!(lines.iter().any(|l| l.contains("Save Mood (Ctrl+S)")));
        assert!(lines.iter().any(|l| l.contains(crate::CHART_TITLE)));
    }

    #[test]
    fn status_line_reports_missing_data() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut app = app_in(&dir);
        app.state.view_history().expect("history");
        app.refresh_status_line();
        assert_eq!(app.status_line.as_deref(), Some(NO_DATA_MESSAGE));

        app.state
            .store()
            .insert_at(
                NaiveDate::from_ymd_opt(2024, 1, 1)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap(),
                MoodRating::new(2).unwrap(),
                "",
            )
            .expect("insert");
        app.state.view_history().expect("history");
        app.refresh_status_line();
        assert_eq!(app.status_line, None);
    }

    #[test]
    fn long_notes_are_wrapped_and_cut() {
        let rows = notes_rows(&"x".repeat(200));
        assert_eq!(rows.len(), NOTES_LINES);
        assert!(rows[NOTES_LINES - 1].ends_with("..."));

        let rows = notes_rows("short");
        assert_eq!(rows[0], "short");
        assert!(rows[1].is_empty());
    }

    #[test]
    fn preview_keeps_first_line() {
        assert_eq!(notes_preview("one line", 40), "one line");
        assert_eq!(notes_preview("first\nsecond", 40), "first...");
    }

    #[test]
    fn zero_limit_still_counts_stored_entries() {
        let dir = tempfile::tempdir().expect("tempdir");
        let app = app_in(&dir);
        let store = app.state.store();
        store.insert("Monday, 2024-01-01 09:00 AM", 3, "").expect("insert");
        store.insert("Monday, 2024-01-01 10:00 AM", 4, "").expect("insert");
        let entries = store.read_all().expect("read");

        let lines = list_lines(&entries, 0, 80);
        assert_eq!(lines.last().map(String::as_str), Some("Showing 0 of 2 entries"));
        assert!(!lines.iter().any(|l| l.contains("No mood entries")));

        assert_eq!(list_lines(&[], 5, 80), vec!["No mood entries recorded yet."]);
        let one = list_lines(&entries, 1, 80);
        assert_eq!(one.last().map(String::as_str), Some("Showing 1 of 2 entries"));
    }
}
