//! Data models for JOT
//!
//! A `Note` has an immutable identity (`id`, `created_at`) and mutable
//! content (`title`, `body`, `updated_at`). Timestamps are kept as the exact
//! local-time ISO-8601 text they were written with, so stored values survive
//! a load/save cycle unchanged and date filtering can work on the text.

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Format used for `created_at` / `updated_at`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// A text note
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    /// Unique identifier
    pub id: String,
    /// Note title
    pub title: String,
    /// Note body content
    pub body: String,
    /// When this note was created
    pub created_at: String,
    /// When this note was last updated
    pub updated_at: String,
}

impl Note {
    /// Create a new note with a fresh id and the current time
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        let now = timestamp_now();
        Self {
            id: generate_id(),
            title: title.into(),
            body: body.into(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Replace title and body, and bump `updated_at`
    pub fn update(&mut self, title: impl Into<String>, body: impl Into<String>) {
        self.title = title.into();
        self.body = body.into();
        self.touch();
    }

    /// Serialize to a JSON mapping with the five stored keys
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "id": self.id,
            "title": self.title,
            "body": self.body,
            "created_at": self.created_at,
            "updated_at": self.updated_at,
        })
    }

    /// Rebuild a note from a stored mapping
    ///
    /// The stored `id`, `created_at` and `updated_at` are kept as-is.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// The `YYYY-MM-DD` part of `created_at`
    pub fn created_date(&self) -> &str {
        self.created_at.get(..10).unwrap_or(&self.created_at)
    }

    /// `created_at` as a datetime, if it parses
    pub fn created_at_parsed(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.created_at)
    }

    /// `updated_at` as a datetime, if it parses
    pub fn updated_at_parsed(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.updated_at)
    }

    /// Set `updated_at` to now, never moving it backwards
    fn touch(&mut self) {
        let now = Local::now().naive_local();
        match self.updated_at_parsed() {
            Some(previous) if previous > now => {}
            _ => self.updated_at = now.format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Generate a new note id (UUID v4 as 32 lowercase hex characters)
pub fn generate_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Current local time in the stored timestamp format
pub fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    s.parse::<NaiveDateTime>().ok()
}
