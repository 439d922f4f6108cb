//! Core of duenotes: the note model, the JSON-file backed store, deadline
//! countdown formatting and the edit-session contract used by front ends.

pub mod deadline;
pub mod error;
pub mod models;
pub mod session;
pub mod storage;

pub use deadline::{remaining, remaining_for, Remaining};
pub use error::{Error, Result};
pub use models::Note;
pub use session::{EditFields, EditOutcome, EditSession, Field};
pub use storage::NoteStore;
