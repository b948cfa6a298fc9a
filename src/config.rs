use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use which::which;

use crate::{chart::DEFAULT_HEIGHT, MoodError, Result, Theme};

pub const DATABASE_FILE: &str = "mood_tracker.db";
pub const CONFIG_FILE: &str = "config.json";

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// SQLite file holding the mood entries
    pub database_path: PathBuf,

    /// Theme used when the session starts
    pub theme: Theme,

    /// Number of rows in the history chart's plot area
    pub chart_height: usize,

    /// Editor used to compose notes; falls back to $EDITOR
    pub editor_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let database_path = project_dirs()
            .map(|dirs| dirs.data_dir().join(DATABASE_FILE))
            .unwrap_or_else(|| PathBuf::from(DATABASE_FILE));

        Self {
            database_path,
            theme: Theme::Light,
            chart_height: DEFAULT_HEIGHT,
            editor_command: None,
        }
    }
}

impl Config {
    /// Platform location of the config file, e.g. `~/.config/moodtrack/config.json`.
    pub fn default_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE))
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
    }

    /// Reads the config at `path`, or returns defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let raw = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&raw).map_err(|e| MoodError::ConfigError {
            message: format!("{}: {}", path.display(), e),
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|_| MoodError::DirectoryError {
                    path: parent.to_path_buf(),
                })?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Saved config to {}", path.display());
        Ok(())
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        if let Ok(editor) = std::env::var("EDITOR") {
            if !editor.trim().is_empty() {
                return editor;
            }
        }

        if cfg!(windows) {
            "notepad".to_string()
        } else {
            for editor in &["nano", "vim", "vi"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "moodtrack")
}
