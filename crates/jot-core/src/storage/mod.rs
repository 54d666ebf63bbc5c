//! Storage layer
//!
//! The notes file is a pretty-printed JSON array of note records, rewritten
//! in full on every save.

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::JsonPersistence;
