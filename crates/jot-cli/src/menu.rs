//! Interactive menu
//!
//! A numbered text menu over the store, read from any `BufRead` and written
//! to any `Write` so it can be driven from tests. Storage errors are reported
//! and the loop keeps going; end of input exits like choosing "Exit".

use std::io::{BufRead, Write};

use anyhow::Result;
use tracing::debug;

use jot_core::{Note, StorageError, Store};

use crate::commands::note::resolve_id;
use crate::output::format_note;

const MENU: &str = "\
1. View all notes
2. Add a note
3. Edit a note
4. Delete a note
5. Filter notes by date
6. Exit
";

/// Run the menu until the user exits or input ends
pub fn run<R: BufRead, W: Write>(store: &mut Store, input: &mut R, out: &mut W) -> Result<()> {
    loop {
        write!(out, "\n{}", MENU)?;
        let Some(choice) = prompt(input, out, "Choose an action: ")? else {
            break;
        };
        debug!("Menu choice: {:?}", choice);

        match choice.trim() {
            "1" => display_notes(out, store.notes().iter())?,
            "2" => add(store, input, out)?,
            "3" => edit(store, input, out)?,
            "4" => delete(store, input, out)?,
            "5" => filter(store, input, out)?,
            "6" => break,
            _ => writeln!(out, "Invalid choice. Please pick an action from the list.")?,
        }
    }

    Ok(())
}

fn add<R: BufRead, W: Write>(store: &mut Store, input: &mut R, out: &mut W) -> Result<()> {
    let Some(title) = prompt(input, out, "Title: ")? else {
        return Ok(());
    };
    let Some(body) = prompt(input, out, "Body: ")? else {
        return Ok(());
    };

    match store.add(title, body) {
        Ok(_) => writeln!(out, "Note added.")?,
        Err(e) => report_storage_error(out, &e)?,
    }
    Ok(())
}

fn edit<R: BufRead, W: Write>(store: &mut Store, input: &mut R, out: &mut W) -> Result<()> {
    let Some(id) = prompt(input, out, "ID of the note to edit: ")? else {
        return Ok(());
    };
    let Some(title) = prompt(input, out, "New title: ")? else {
        return Ok(());
    };
    let Some(body) = prompt(input, out, "New body: ")? else {
        return Ok(());
    };

    let Ok(note_id) = resolve_id(store, id.trim()) else {
        writeln!(out, "No note found with that ID.")?;
        return Ok(());
    };

    match store.edit(&note_id, title, body) {
        Ok(true) => writeln!(out, "Note updated.")?,
        Ok(false) => writeln!(out, "No note found with that ID.")?,
        Err(e) => report_storage_error(out, &e)?,
    }
    Ok(())
}

fn delete<R: BufRead, W: Write>(store: &mut Store, input: &mut R, out: &mut W) -> Result<()> {
    let Some(id) = prompt(input, out, "ID of the note to delete: ")? else {
        return Ok(());
    };

    let note_id = resolve_id(store, id.trim()).unwrap_or_else(|_| id.trim().to_string());

    match store.delete(&note_id) {
        Ok(0) => writeln!(out, "No note found with that ID.")?,
        Ok(_) => writeln!(out, "Note deleted.")?,
        Err(e) => report_storage_error(out, &e)?,
    }
    Ok(())
}

fn filter<R: BufRead, W: Write>(store: &Store, input: &mut R, out: &mut W) -> Result<()> {
    let Some(date) = prompt(input, out, "Date to filter by (YYYY-MM-DD): ")? else {
        return Ok(());
    };

    display_notes(out, store.filter_by_date(date.trim()).into_iter())
}

fn display_notes<'a, W: Write>(out: &mut W, notes: impl Iterator<Item = &'a Note>) -> Result<()> {
    let mut any = false;
    for note in notes {
        any = true;
        write!(out, "{}", format_note(note))?;
    }
    if !any {
        writeln!(out, "No notes found.")?;
    }
    Ok(())
}

fn report_storage_error<W: Write>(out: &mut W, err: &StorageError) -> Result<()> {
    writeln!(out, "Error: {}", err)?;
    if let Some(hint) = err.recovery_suggestion() {
        writeln!(out, "Hint: {}", hint)?;
    }
    if err.is_recoverable() {
        writeln!(out, "The change is kept in memory; it will be written on the next successful save.")?;
    } else {
        writeln!(out, "The notes file was not updated and may differ from what is shown here.")?;
    }
    Ok(())
}

/// Print `label` and read one line; `None` at end of input
fn prompt<R: BufRead, W: Write>(input: &mut R, out: &mut W, label: &str) -> Result<Option<String>> {
    write!(out, "{}", label)?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
}
