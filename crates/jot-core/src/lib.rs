//! JOT Core Library
//!
//! This crate provides the core functionality for JOT, a small local
//! note keeper: a note model and a store that keeps an ordered list of notes
//! in sync with a JSON file on disk.
//!
//! The core never prints; callers render results and errors themselves.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = Store::open(&Config::load()?)?;
//!
//! let id = store.add("Groceries", "Milk, eggs")?.id.clone();
//! store.edit(&id, "Groceries v2", "Milk, eggs, bread")?;
//!
//! for note in store.filter_by_date("2024-05-01") {
//!     println!("{}", note.title);
//! }
//! ```
//!
//! # Modules
//!
//! - `store`: In-memory notes plus persistence (main entry point)
//! - `models`: The `Note` record
//! - `storage`: JSON file persistence and storage errors
//! - `config`: Application configuration

pub mod config;
pub mod models;
pub mod storage;
pub mod store;

pub use config::Config;
pub use models::Note;
pub use storage::{JsonPersistence, StorageError, StorageResult};
pub use store::Store;
