//! Note command handlers

use anyhow::{bail, Context, Result};

use jot_core::{Note, Store};

use crate::editor::{confirm_delete, edit_body};
use crate::output::{short_id, Output};

/// List all notes
pub fn list(store: &Store, output: &Output) -> Result<()> {
    let notes: Vec<&Note> = store.notes().iter().collect();
    output.print_notes(&notes);
    Ok(())
}

/// Show a single note
pub fn show(store: &Store, id: String, output: &Output) -> Result<()> {
    let note_id = resolve_id(store, &id)?;
    let note = store
        .get(&note_id)
        .ok_or_else(|| anyhow::anyhow!("Note not found: {}", id))?;

    output.print_note(note);
    Ok(())
}

/// Add a new note
///
/// Opens the editor for the body when `--body` is not given.
pub fn add(store: &mut Store, title: String, body: Option<String>, output: &Output) -> Result<()> {
    let body = match body {
        Some(b) => b,
        None => edit_body(&title, "").context("Failed to edit note")?,
    };

    let note = store.add(title, body).context("Failed to add note")?;

    output.success(&format!("Added note {}", short_id(&note.id)));
    output.print_note(note);
    Ok(())
}

/// Edit an existing note
///
/// Missing fields keep their current value. With neither `--title` nor
/// `--body`, the body is opened in the editor.
pub fn edit(
    store: &mut Store,
    id: String,
    title: Option<String>,
    body: Option<String>,
    output: &Output,
) -> Result<()> {
    let note_id = resolve_id(store, &id)?;
    let current = store
        .get(&note_id)
        .ok_or_else(|| anyhow::anyhow!("Note not found: {}", id))?;

    let body = match (&title, body) {
        (_, Some(b)) => b,
        (Some(_), None) => current.body.clone(),
        (None, None) => {
            edit_body(&current.title, &current.body).context("Failed to edit note")?
        }
    };
    let title = title.unwrap_or_else(|| current.title.clone());

    if !store
        .edit(&note_id, title, body)
        .context("Failed to save edited note")?
    {
        bail!("Note not found: {}", id);
    }

    output.success(&format!("Edited note {}", short_id(&note_id)));
    if let Some(note) = store.get(&note_id) {
        output.print_note(note);
    }
    Ok(())
}

/// Delete a note
pub fn delete(store: &mut Store, id: String, yes: bool, output: &Output) -> Result<()> {
    let note_id = resolve_id(store, &id)?;

    if output.should_prompt() && !yes {
        let note = store
            .get(&note_id)
            .ok_or_else(|| anyhow::anyhow!("Note not found: {}", id))?;
        if !confirm_delete(note)? {
            output.message("Cancelled.");
            return Ok(());
        }
    }

    store.delete(&note_id).context("Failed to delete note")?;

    output.success(&format!("Deleted note: {}", short_id(&note_id)));
    Ok(())
}

/// List notes created on dates starting with `date`
pub fn filter(store: &Store, date: String, output: &Output) -> Result<()> {
    let notes = store.filter_by_date(&date);
    output.print_notes(&notes);
    Ok(())
}

/// Resolve a full id or unique id prefix to a full note id
pub fn resolve_id(store: &Store, id: &str) -> Result<String> {
    let id = id.trim();
    if id.is_empty() {
        bail!("Note ID cannot be empty");
    }

    if let Some(note) = store.get(id) {
        return Ok(note.id.clone());
    }

    let matches = store.find_by_id_prefix(id);

    match matches.len() {
        0 => bail!("No note found matching: {}", id),
        1 => Ok(matches[0].id.clone()),
        _ => {
            let candidates: Vec<String> = matches
                .iter()
                .map(|n| format!("  {} - {}", n.id, n.title))
                .collect();
            bail!(
                "Ambiguous ID '{}'. Matches:\n{}\nPlease provide more characters.",
                id,
                candidates.join("\n")
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use jot_core::JsonPersistence;
    use tempfile::TempDir;

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            title: format!("title {}", id),
            body: "body".to_string(),
            created_at: "2024-05-01T10:00:00.000000".to_string(),
            updated_at: "2024-05-01T10:00:00.000000".to_string(),
        }
    }

    fn store_with(temp_dir: &TempDir, notes: &[Note]) -> Store {
        let path = temp_dir.path().join("notes.json");
        JsonPersistence::new(&path).save(notes).unwrap();
        let mut store = Store::new(path);
        store.load().unwrap();
        store
    }

    fn quiet() -> Output {
        Output::new(OutputFormat::Quiet)
    }

    #[test]
    fn test_resolve_full_id() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_with(&temp_dir, &[note("abc"), note("abcd")]);

        // Exact match wins even though it is also a prefix of another id
        assert_eq!(resolve_id(&store, "abc").unwrap(), "abc");
    }

    #[test]
    fn test_resolve_unique_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_with(&temp_dir, &[note("abc123"), note("def456")]);

        assert_eq!(resolve_id(&store, "de").unwrap(), "def456");
    }

    #[test]
    fn test_resolve_ambiguous_and_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_with(&temp_dir, &[note("abc1"), note("abc2")]);

        let err = resolve_id(&store, "abc").unwrap_err().to_string();
        assert!(err.contains("Ambiguous"));
        assert!(resolve_id(&store, "zzz").is_err());
    }

    #[test]
    fn test_resolve_blank_id() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_with(&temp_dir, &[note("abc123")]);

        assert!(resolve_id(&store, "").is_err());
        assert!(resolve_id(&store, "   ").is_err());
    }

    #[test]
    fn test_blank_id_changes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(&temp_dir, &[note("abc123")]);

        assert!(delete(&mut store, "".into(), true, &quiet()).is_err());
        assert!(edit(&mut store, " ".into(), Some("Other".into()), None, &quiet()).is_err());

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("abc123").unwrap().title, "title abc123");
    }

    #[test]
    fn test_add_with_body() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(&temp_dir, &[]);

        add(&mut store, "Title".into(), Some("Body".into()), &quiet()).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.notes()[0].body, "Body");
    }

    #[test]
    fn test_edit_title_keeps_body() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(&temp_dir, &[note("abc123")]);

        edit(&mut store, "abc".into(), Some("Renamed".into()), None, &quiet()).unwrap();

        let edited = store.get("abc123").unwrap();
        assert_eq!(edited.title, "Renamed");
        assert_eq!(edited.body, "body");
    }

    #[test]
    fn test_edit_body_keeps_title() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(&temp_dir, &[note("abc123")]);

        edit(&mut store, "abc123".into(), None, Some("new".into()), &quiet()).unwrap();

        let edited = store.get("abc123").unwrap();
        assert_eq!(edited.title, "title abc123");
        assert_eq!(edited.body, "new");
    }

    #[test]
    fn test_delete_by_prefix_without_prompt() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = store_with(&temp_dir, &[note("abc123"), note("def456")]);

        delete(&mut store, "def".into(), false, &quiet()).unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.get("def456").is_none());
    }
}
