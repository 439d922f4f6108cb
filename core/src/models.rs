mod note;

pub use note::Note;

use crate::{Error, Result};
use chrono::NaiveDateTime;

/// Fixed on-disk format for deadlines: second precision, no timezone.
pub const DEADLINE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a deadline string in [`DEADLINE_FORMAT`]
pub fn parse_deadline(value: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, DEADLINE_FORMAT).map_err(|source| Error::DeadlineParse {
        value: value.to_string(),
        source,
    })
}

/// Render a timestamp in [`DEADLINE_FORMAT`]
pub fn format_deadline(deadline: &NaiveDateTime) -> String {
    deadline.format(DEADLINE_FORMAT).to_string()
}
