//! Edit sessions: raw editor values in, validated notes out.
//!
//! The same flow serves "new note" (seeded with blanks and the current time)
//! and "edit note" (seeded from the existing note). Nothing here touches the
//! store; the caller persists whatever [`EditSession::resolve`] returns.

use crate::models::{format_deadline, parse_deadline, Note};
use crate::Result;
use chrono::NaiveDateTime;

/// Editable fields of a note, in editor order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Content,
    Deadline,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Title => Field::Content,
            Field::Content => Field::Deadline,
            Field::Deadline => Field::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Title => Field::Deadline,
            Field::Content => Field::Title,
            Field::Deadline => Field::Content,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::Content => "Content",
            Field::Deadline => "Deadline",
        }
    }
}

/// Raw values as typed by the user
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditFields {
    pub title: String,
    pub content: String,
    pub deadline: String,
}

impl EditFields {
    /// Pre-fill an editor with an existing note
    pub fn seed_from(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            deadline: note.deadline.clone(),
        }
    }

    /// Defaults for a new note: empty text, deadline = `now`
    pub fn blank(now: NaiveDateTime) -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            deadline: format_deadline(&now),
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::Content => &self.content,
            Field::Deadline => &self.deadline,
        }
    }

    pub fn get_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::Content => &mut self.content,
            Field::Deadline => &mut self.deadline,
        }
    }

    /// Build a brand-new note from these values
    pub fn into_note(self) -> Result<Note> {
        from_fields(self.title, self.content, &self.deadline)
    }

    /// Build the edited version of `original`, keeping its id
    pub fn apply_to(self, original: &Note) -> Result<Note> {
        let deadline = parse_deadline(self.deadline.trim())?;
        Ok(Note::with_id(original.id.clone(), self.title, self.content, deadline))
    }
}

/// Construct a note from three raw strings.
///
/// Empty title and content are accepted. `deadline_text` must be in the
/// fixed `YYYY-MM-DD HH:MM:SS` format; surrounding whitespace is ignored.
pub fn from_fields(title: String, content: String, deadline_text: &str) -> Result<Note> {
    let deadline = parse_deadline(deadline_text.trim())?;
    Ok(Note::new(title, content, deadline))
}

/// How an edit dialog ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    Accepted(EditFields),
    Cancelled,
}

/// State of one open editor
#[derive(Debug, Clone)]
pub struct EditSession {
    original: Option<Note>,
    pub fields: EditFields,
    pub focus: Field,
}

impl EditSession {
    /// Session for a new note
    pub fn create(now: NaiveDateTime) -> Self {
        Self {
            original: None,
            fields: EditFields::blank(now),
            focus: Field::Title,
        }
    }

    /// Session editing an existing note
    pub fn edit(note: &Note) -> Self {
        Self {
            original: Some(note.clone()),
            fields: EditFields::seed_from(note),
            focus: Field::Title,
        }
    }

    pub fn is_new(&self) -> bool {
        self.original.is_none()
    }

    /// Id of the note being edited, if any
    pub fn target_id(&self) -> Option<&str> {
        self.original.as_ref().map(|n| n.id.as_str())
    }

    pub fn accept(&self) -> EditOutcome {
        EditOutcome::Accepted(self.fields.clone())
    }

    /// Turn an outcome into the note to persist. `Ok(None)` means cancelled.
    pub fn resolve(&self, outcome: EditOutcome) -> Result<Option<Note>> {
        let fields = match outcome {
            EditOutcome::Cancelled => return Ok(None),
            EditOutcome::Accepted(fields) => fields,
        };

        let note = match &self.original {
            Some(original) => fields.apply_to(original)?,
            None => fields.into_note()?,
        };
        Ok(Some(note))
    }
}
