//! Form handling, history refresh and theme switching.
//!
//! Everything the view shows lives in [`AppState`], which handlers receive
//! explicitly. Nothing here draws to the terminal; the interactive session
//! reads the state back after each action.

use chrono::NaiveDateTime;
use console::Key;
use log::{debug, error, warn};

use crate::{
    daily_averages, now_local, render_chart, Aggregation, Chart, MoodError, MoodRating, MoodStore,
    Result, Theme, RANGE_MESSAGE,
};

pub const EMPTY_MOOD_MESSAGE: &str = "Please enter a mood rating.";
pub const SAVED_MESSAGE: &str = "Mood entry saved successfully!";
pub const NO_DATA_MESSAGE: &str = "No data to display on the graph.";

/// Checks free-form mood input and returns the rating it names.
pub fn validate_mood(input: &str) -> Result<MoodRating> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(MoodError::validation(EMPTY_MOOD_MESSAGE));
    }

    // Non-numbers get the same message as out-of-range numbers.
    let value = trimmed
        .parse::<i64>()
        .map_err(|_| MoodError::validation(RANGE_MESSAGE))?;
    MoodRating::new(value)
}

/// Where the form is in its save cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormStatus {
    #[default]
    Idle,
    Validating,
    Saved,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// A message the view shows as a dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

/// The most recently computed history.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    pub aggregation: Aggregation,
    /// `None` when there was nothing to plot
    pub chart: Option<Chart>,
}

impl History {
    /// Status-line text for entries that were left out of the chart.
    pub fn skipped_warning(&self) -> Option<String> {
        match self.aggregation.skipped {
            0 => None,
            1 => Some("1 entry with an unreadable date was left out of the chart.".to_string()),
            n => Some(format!(
                "{} entries with unreadable dates were left out of the chart.",
                n
            )),
        }
    }
}

/// Application state shared by all handlers.
#[derive(Debug)]
pub struct AppState {
    store: MoodStore,
    theme: Theme,
    chart_height: usize,
    /// Raw text of the mood field
    pub mood_input: String,
    /// Raw text of the notes field
    pub notes_input: String,
    status: FormStatus,
    history: Option<History>,
}

impl AppState {
    pub fn new(store: MoodStore, theme: Theme, chart_height: usize) -> Self {
        Self {
            store,
            theme,
            chart_height,
            mood_input: String::new(),
            notes_input: String::new(),
            status: FormStatus::Idle,
            history: None,
        }
    }

    pub fn store(&self) -> &MoodStore {
        &self.store
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn status(&self) -> FormStatus {
        self.status
    }

    pub fn history(&self) -> Option<&History> {
        self.history.as_ref()
    }

    /// Saves the form stamped with the current local time.
    pub fn save(&mut self) -> Notice {
        self.save_at(now_local())
    }

    /// Validates and stores the form, then refreshes the history.
    ///
    /// Invalid input and storage failures leave the form untouched so the
    /// user can correct it and try again.
    pub fn save_at(&mut self, timestamp: NaiveDateTime) -> Notice {
        self.status = FormStatus::Validating;

        let rating = match validate_mood(&self.mood_input) {
            Ok(rating) => rating,
            Err(e) => {
                debug!("Rejected mood input {:?}: {}", self.mood_input, e);
                self.status = FormStatus::Error;
                return Notice::error(e.to_string());
            }
        };

        let notes = self.notes_input.trim().to_string();
        if let Err(e) = self.store.insert_at(timestamp, rating, &notes) {
            error!("Failed to save mood: {}", e);
            self.status = FormStatus::Error;
            return Notice::error(format!("Failed to save mood: {}", e));
        }

        self.status = FormStatus::Saved;
        self.clear_form();

        if let Err(e) = self.view_history() {
            error!("Saved entry but could not refresh history: {}", e);
        }

        Notice::info(SAVED_MESSAGE)
    }

    /// Reads every entry, aggregates the last days and lays out the chart.
    pub fn view_history(&mut self) -> Result<&History> {
        let entries = self.store.read_all()?;
        let aggregation = daily_averages(&entries);
        let chart = render_chart(&aggregation.days, self.chart_height);

        if chart.is_none() {
            warn!("{}", NO_DATA_MESSAGE);
        }

        Ok(&*self.history.insert(History { aggregation, chart }))
    }

    /// Switches between light and dark. A history on screen is read again
    /// so the redrawn chart reflects the store.
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        debug!("Theme switched to {}", self.theme);

        if self.history.is_some() {
            if let Err(e) = self.view_history() {
                error!("Could not redraw history after theme change: {}", e);
            }
        }
        self.theme
    }

    /// Chart lines in the current palette, if a chart is shown.
    pub fn chart_lines(&self) -> Option<Vec<String>> {
        let chart = self.history.as_ref()?.chart.as_ref()?;
        Some(chart.styled_lines(self.theme.palette()))
    }

    pub fn clear_form(&mut self) {
        self.mood_input.clear();
        self.notes_input.clear();
    }

    /// Appends a typed character to the mood field.
    pub fn type_mood(&mut self, c: char) {
        self.mood_input.push(c);
        self.status = FormStatus::Idle;
    }

    pub fn erase_mood(&mut self) {
        self.mood_input.pop();
        self.status = FormStatus::Idle;
    }
}

/// Something the user asked the session to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Save,
    ViewHistory,
    ToggleTheme,
    TypeMood(char),
    EraseMood,
    EditNotes,
    EditNotesInEditor,
    Quit,
}

/// Maps a key press to an action.
///
/// Ctrl+S and Ctrl+T arrive as raw control characters. Ctrl+H is decoded as
/// backspace, so history is on `h`.
pub fn action_for_key(key: &Key) -> Option<Action> {
    match key {
        Key::Enter | Key::Char('\u{13}') | Key::Char('s') => Some(Action::Save),
        Key::Char('h') => Some(Action::ViewHistory),
        Key::Char('\u{14}') | Key::Char('t') => Some(Action::ToggleTheme),
        Key::Char(c) if c.is_ascii_digit() || *c == '-' || *c == '+' => {
            Some(Action::TypeMood(*c))
        }
        Key::Backspace => Some(Action::EraseMood),
        Key::Char('n') => Some(Action::EditNotes),
        Key::Char('e') => Some(Action::EditNotesInEditor),
        Key::Escape | Key::Char('q') | Key::Char('\u{3}') => Some(Action::Quit),
        _ => None,
    }
}
