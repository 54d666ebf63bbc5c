//! Interactive editing support
//!
//! Note bodies are written in `$VISUAL` / `$EDITOR` through a draft file whose
//! `<!--` lines are hints and never end up in the note.

use anyhow::{bail, Context, Result};
use std::env;
use std::fs;
use std::io::{self, Write};
use std::process::Command;

use jot_core::Note;

use crate::output::short_id;

#[cfg(windows)]
const DEFAULT_EDITOR: &str = "notepad";
#[cfg(not(windows))]
const DEFAULT_EDITOR: &str = "vi";

const HINT_PREFIX: &str = "<!--";

/// Edit the body of the note titled `title`, starting from `current_body`
///
/// Returns the body with hint lines and surrounding whitespace removed.
pub fn edit_body(title: &str, current_body: &str) -> Result<String> {
    let editor = editor_command(env::var("VISUAL").ok(), env::var("EDITOR").ok());
    let draft_path = env::temp_dir().join(format!("jot_{}.md", std::process::id()));

    fs::write(&draft_path, draft_for(title, current_body))
        .with_context(|| format!("Failed to write draft: {:?}", draft_path))?;

    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or(DEFAULT_EDITOR);
    let status = Command::new(program)
        .args(parts)
        .arg(&draft_path)
        .status()
        .with_context(|| format!("Failed to run editor: {}", editor));

    let edited = fs::read_to_string(&draft_path);
    let _ = fs::remove_file(&draft_path);

    let status = status?;
    if !status.success() {
        bail!("Editor '{}' exited with {}; note left unchanged.", editor, status);
    }

    let edited = edited.with_context(|| format!("Failed to read draft: {:?}", draft_path))?;
    Ok(body_from_draft(&edited))
}

/// Ask before deleting `note`
///
/// Without a TTY on stdin nothing is asked and the answer is no.
pub fn confirm_delete(note: &Note) -> Result<bool> {
    if !atty::is(atty::Stream::Stdin) {
        return Ok(false);
    }

    print!("Delete note {} \"{}\"? [y/N] ", short_id(&note.id), note.title);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(is_yes(&answer))
}

/// First non-blank of `$VISUAL`, `$EDITOR`, else the platform default
fn editor_command(visual: Option<String>, editor: Option<String>) -> String {
    [visual, editor]
        .into_iter()
        .flatten()
        .find(|e| !e.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
}

fn draft_for(title: &str, body: &str) -> String {
    format!(
        "{hint} Body for: {title} -->\n\
         {hint} Lines starting with {hint} are ignored. Save and quit when done. -->\n\
         \n{body}\n",
        hint = HINT_PREFIX,
        title = title,
        body = body
    )
}

fn body_from_draft(draft: &str) -> String {
    draft
        .lines()
        .filter(|line| !line.trim_start().starts_with(HINT_PREFIX))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editor_command_precedence() {
        assert_eq!(
            editor_command(Some("nvim".into()), Some("nano".into())),
            "nvim"
        );
        assert_eq!(editor_command(Some("  ".into()), Some("nano".into())), "nano");
        assert_eq!(editor_command(None, Some(String::new())), DEFAULT_EDITOR);
        assert_eq!(editor_command(None, None), DEFAULT_EDITOR);
    }

    #[test]
    fn test_draft_keeps_current_body() {
        let draft = draft_for("Groceries", "Milk, eggs\nbread");
        assert!(draft.starts_with("<!-- Body for: Groceries -->"));
        assert_eq!(body_from_draft(&draft), "Milk, eggs\nbread");
    }

    #[test]
    fn test_body_from_draft_drops_hints() {
        let edited = "<!-- Body for: Groceries -->\n\nMilk, eggs\n  <!-- stray hint -->\nbread\n\n";
        assert_eq!(body_from_draft(edited), "Milk, eggs\nbread");
        assert_eq!(body_from_draft(&draft_for("Empty", "")), "");
    }

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("nope"));
    }
}
