use std::{
    fs::read_to_string,
    io::Write,
    path::Path,
    process::Command,
};

use log::{debug, info};
use shell_words::split;
use tempfile::Builder;

use crate::{MoodError, Result};

/// Opens `editor_cmd` on a temporary file seeded with `existing` and returns
/// the text the user saved, without the instruction comments.
pub fn compose_in_editor(editor_cmd: &str, existing: &str) -> Result<String> {
    let mut temp_file = Builder::new()
        .prefix("moodtrack-notes-")
        .suffix(".md")
        .tempfile()?;

    writeln!(temp_file, "<!-- How are you feeling today? Write your notes below. -->")?;
    writeln!(
        temp_file,
        "<!-- Lines wrapped in these markers are ignored. Save and exit when done. -->"
    )?;
    if !existing.is_empty() {
        writeln!(temp_file, "{}", existing)?;
    }
    temp_file.flush()?;

    info!("Opening editor to write notes. Save and exit when done...");
    launch_editor(editor_cmd, temp_file.path())?;

    let content = read_to_string(temp_file.path())?;
    Ok(process_editor_content(&content))
}

fn launch_editor(editor_cmd: &str, file_path: &Path) -> Result<()> {
    let args = split(editor_cmd).map_err(|e| MoodError::EditorError {
        message: format!("Failed to parse editor command: {}", e),
    })?;

    let (program, rest) = args.split_first().ok_or_else(|| MoodError::EditorError {
        message: "Empty editor command".to_string(),
    })?;

    debug!("Launching editor {} on {}", program, file_path.display());
    let status = Command::new(program)
        .args(rest)
        .arg(file_path)
        .status()
        .map_err(|e| MoodError::EditorError {
            message: format!("Failed to execute editor command: {}", e),
        })?;

    if !status.success() {
        return Err(MoodError::EditorError {
            message: "Editor exited with non-zero status".to_string(),
        });
    }

    Ok(())
}

/// Drops instruction comment lines and surrounding blank space.
pub fn process_editor_content(content: &str) -> String {
    content
        .lines()
        .filter(|line| {
            !line.trim_start().starts_with("<!--") && !line.trim_end().ends_with("-->")
        })
        .collect::<Vec<&str>>()
        .join("\n")
        .trim()
        .to_string()
}
