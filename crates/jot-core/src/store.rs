//! Note store
//!
//! The `Store` owns the ordered list of notes and the JSON file that backs
//! it. Every mutation (`add`, `edit`, `delete`) changes the list and then
//! rewrites the whole file before returning.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = Store::open(&Config::load()?)?;
//!
//! let id = store.add("Groceries", "Milk, eggs")?.id.clone();
//! store.edit(&id, "Groceries v2", "Milk, eggs, bread")?;
//!
//! let today = store.filter_by_date("2024-05-01");
//! ```
//!
//! If a save fails, the in-memory change has already been applied and the
//! file still holds the previous snapshot. Callers that keep going after a
//! save error should `load()` again to resynchronize.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::Config;
use crate::models::Note;
use crate::storage::{JsonPersistence, StorageResult};

/// In-memory notes backed by a JSON file
pub struct Store {
    /// Notes in insertion (or stored) order
    notes: Vec<Note>,
    /// Notes file handler
    persistence: JsonPersistence,
}

impl Store {
    /// Create an empty store backed by `path`
    ///
    /// Nothing is read until `load()` is called.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            notes: Vec::new(),
            persistence: JsonPersistence::new(path),
        }
    }

    /// Create a store on the configured notes file and load it
    pub fn open(config: &Config) -> StorageResult<Self> {
        let mut store = Self::new(config.notes_path());
        store.load()?;
        Ok(store)
    }

    /// Path of the backing notes file
    pub fn path(&self) -> &Path {
        self.persistence.path()
    }

    /// Replace the in-memory notes with the stored snapshot
    ///
    /// A missing file loads as an empty store. On error the current notes
    /// are left untouched.
    pub fn load(&mut self) -> StorageResult<()> {
        self.notes = self.persistence.load()?.unwrap_or_default();
        Ok(())
    }

    /// Write the full list of notes to disk
    pub fn save(&self) -> StorageResult<()> {
        self.persistence.save(&self.notes)
    }

    // ==================== Mutations ====================

    /// Create a note, append it, and persist
    pub fn add(
        &mut self,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> StorageResult<&Note> {
        let note = Note::new(title, body);
        info!("Adding note {}", note.id);
        self.notes.push(note);
        self.save()?;
        Ok(&self.notes[self.notes.len() - 1])
    }

    /// Update the title and body of the note with `id`
    ///
    /// Returns `Ok(false)` without saving when no note has that id.
    pub fn edit(
        &mut self,
        id: &str,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> StorageResult<bool> {
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            warn!("Edit requested for unknown note {}", id);
            return Ok(false);
        };

        note.update(title, body);
        info!("Edited note {}", id);
        self.save()?;
        Ok(true)
    }

    /// Remove every note with `id` and persist
    ///
    /// Returns how many notes were removed. Removing nothing is not an
    /// error, and the file is still rewritten.
    pub fn delete(&mut self, id: &str) -> StorageResult<usize> {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        let removed = before - self.notes.len();
        info!("Deleted {} note(s) with id {}", removed, id);
        self.save()?;
        Ok(removed)
    }

    // ==================== Queries ====================

    /// All notes, in order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Get a note by id
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Notes whose id starts with `prefix`
    pub fn find_by_id_prefix(&self, prefix: &str) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|n| n.id.starts_with(prefix))
            .collect()
    }

    /// Notes whose `created_at` text starts with `prefix`, in order
    ///
    /// `"2024-05-01"` matches every note created that day; `"2024-05"` the
    /// whole month.
    pub fn filter_by_date(&self, prefix: &str) -> Vec<&Note> {
        self.notes
            .iter()
            .filter(|n| n.created_at.starts_with(prefix))
            .collect()
    }

    /// Number of notes
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Check if the store holds no notes
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
