use crate::models::{format_deadline, parse_deadline};
use crate::Result;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single note. `deadline` is kept as the stored string so that a value
/// that fails to parse only affects this note, not the whole collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Note {
    pub title: String,
    pub content: String,
    pub deadline: String,
    /// Stable identifier. Older files have no id; one is generated on load.
    #[serde(default = "generate_id")]
    pub id: String,
}

fn generate_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

impl Note {
    /// Create a new note with a generated UUID
    pub fn new(title: String, content: String, deadline: NaiveDateTime) -> Self {
        Self::with_id(generate_id(), title, content, deadline)
    }

    /// Create a note with a specific ID, used when an edit replaces a note
    pub fn with_id(id: String, title: String, content: String, deadline: NaiveDateTime) -> Self {
        Self {
            title,
            content,
            deadline: format_deadline(&deadline),
            id,
        }
    }

    /// Parse the stored deadline
    pub fn deadline_at(&self) -> Result<NaiveDateTime> {
        parse_deadline(&self.deadline)
    }
}
