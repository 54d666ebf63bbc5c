//! JSON snapshot persistence
//!
//! Handles saving and loading the notes file. Uses atomic writes (write to
//! temp file, then rename) so a failed save leaves the previous file intact.
//!
//! Storage location: `~/.local/share/jot/notes.json` (configurable via `Config`)

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::models::Note;
use crate::storage::error::{StorageError, StorageResult};

/// Persistence layer for the notes file
pub struct JsonPersistence {
    path: PathBuf,
}

impl JsonPersistence {
    /// Create a persistence handler for the given notes file
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the notes file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load notes from disk
    ///
    /// Returns `None` if the file doesn't exist.
    /// Returns an error if the file exists but can't be read or parsed.
    pub fn load(&self) -> StorageResult<Option<Vec<Note>>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No notes file at {:?}", self.path);
                return Ok(None);
            }
            Err(e) => {
                return Err(StorageError::ReadError {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        let notes: Vec<Note> =
            serde_json::from_slice(&bytes).map_err(|e| StorageError::InvalidFormat {
                path: self.path.clone(),
                details: e.to_string(),
            })?;

        debug!("Loaded {} note(s) from {:?}", notes.len(), self.path);
        Ok(Some(notes))
    }

    /// Save notes to disk using atomic write
    pub fn save(&self, notes: &[Note]) -> StorageResult<()> {
        let bytes = to_pretty_json(notes)?;
        atomic_write(&self.path, &bytes)?;
        debug!("Saved {} note(s) to {:?}", notes.len(), self.path);
        Ok(())
    }
}

/// Encode notes as a JSON array indented with four spaces
fn to_pretty_json(notes: &[Note]) -> StorageResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    notes.serialize(&mut ser)?;
    Ok(buf)
}

/// Temp file used while writing `path`: `<file name>.tmp` in the same directory
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("notes"));
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let temp_path = temp_path_for(path);

    let result = File::create(&temp_path)
        .and_then(|mut file| {
            file.write_all(data)?;
            file.sync_all()
        })
        .map_err(|e| StorageError::from_io(e, temp_path.clone()));

    if let Err(e) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        StorageError::AtomicWriteFailed {
            from: temp_path.clone(),
            to: path.to_path_buf(),
            source: e,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn notes_file(temp_dir: &TempDir) -> PathBuf {
        temp_dir.path().join("notes.json")
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::new(notes_file(&temp_dir));

        assert!(!persistence.path().exists());
        assert!(persistence.load().unwrap().is_none());

        let notes = vec![Note::new("One", "first"), Note::new("Two", "second")];
        persistence.save(&notes).unwrap();
        assert!(persistence.path().exists());

        let loaded = persistence.load().unwrap().unwrap();
        assert_eq!(loaded, notes);
    }

    #[test]
    fn test_saved_file_format() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::new(notes_file(&temp_dir));

        let note = Note::new("Title", "Body");
        persistence.save(std::slice::from_ref(&note)).unwrap();

        let content = fs::read_to_string(persistence.path()).unwrap();
        assert!(content.starts_with("[\n    {\n        \"id\""));

        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        let records = value.as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0], note.to_value());
    }

    #[test]
    fn test_save_twice_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = JsonPersistence::new(notes_file(&temp_dir));
        let notes = vec![Note::new("a", "b")];

        persistence.save(&notes).unwrap();
        let first = fs::read(persistence.path()).unwrap();
        persistence.save(&notes).unwrap();
        let second = fs::read(persistence.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_load_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = notes_file(&temp_dir);
        fs::write(&path, "{ not json").unwrap();

        let err = JsonPersistence::new(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::InvalidFormat { .. }));
    }

    #[test]
    fn test_load_wrong_structure() {
        let temp_dir = TempDir::new().unwrap();
        let path = notes_file(&temp_dir);
        fs::write(&path, r#"{"id": "x"}"#).unwrap();

        let err = JsonPersistence::new(&path).load().unwrap_err();
        assert!(matches!(err, StorageError::InvalidFormat { .. }));
    }

    #[test]
    fn test_load_empty_array() {
        let temp_dir = TempDir::new().unwrap();
        let path = notes_file(&temp_dir);
        fs::write(&path, "[]").unwrap();

        let loaded = JsonPersistence::new(&path).load().unwrap().unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested_path = temp_dir.path().join("a").join("b").join("notes.json");

        atomic_write(&nested_path, b"[]").unwrap();

        assert!(nested_path.exists());
        assert_eq!(fs::read_to_string(&nested_path).unwrap(), "[]");
        assert!(!temp_path_for(&nested_path).exists());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let path = PathBuf::from("/data/jot/notes.json");
        assert_eq!(temp_path_for(&path), PathBuf::from("/data/jot/notes.json.tmp"));
    }
}
