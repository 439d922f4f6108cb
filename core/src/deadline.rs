//! Countdown until a note's deadline.
//!
//! Everything here is a pure function of `(deadline, now)`; callers decide
//! how often to ask. Both instants are naive local times and are compared
//! as-is, without any timezone conversion.

use crate::models::Note;
use crate::Result;
use chrono::{Duration, NaiveDateTime};
use std::fmt;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Time left until a deadline, in whole seconds.
///
/// Negative once the deadline has passed. Rendered as `H:MM:SS` with a
/// `N day(s), ` prefix when the day count is non-zero. Days are floored and
/// the clock part is always positive, so overdue values read like
/// `-1 day, 23:59:55` (five seconds late) or `-2 days, 22:00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Remaining {
    seconds: i64,
}

impl Remaining {
    /// Time from `now` until `deadline`. Sub-second parts are dropped by
    /// flooring to the whole second below, never rounded.
    pub fn between(deadline: NaiveDateTime, now: NaiveDateTime) -> Self {
        let delta = deadline.signed_duration_since(now);
        let mut seconds = delta.num_seconds();
        // num_seconds truncates toward zero; step down for negative fractions
        if delta < Duration::seconds(seconds) {
            seconds -= 1;
        }
        Self { seconds }
    }

    pub fn from_seconds(seconds: i64) -> Self {
        Self { seconds }
    }

    pub fn as_seconds(&self) -> i64 {
        self.seconds
    }

    /// True as soon as the deadline has passed
    pub fn is_overdue(&self) -> bool {
        self.seconds < 0
    }
}

impl fmt::Display for Remaining {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.seconds.div_euclid(SECONDS_PER_DAY);
        let clock = self.seconds.rem_euclid(SECONDS_PER_DAY);
        let hours = clock / SECONDS_PER_HOUR;
        let minutes = (clock % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
        let seconds = clock % SECONDS_PER_MINUTE;

        if days != 0 {
            let unit = if days.abs() == 1 { "day" } else { "days" };
            write!(f, "{} {}, ", days, unit)?;
        }
        write!(f, "{}:{:02}:{:02}", hours, minutes, seconds)
    }
}

/// Human-readable time remaining until `deadline`, as seen at `now`
pub fn remaining(deadline: NaiveDateTime, now: NaiveDateTime) -> String {
    Remaining::between(deadline, now).to_string()
}

/// Countdown for a stored note. Fails only for this note when its deadline
/// string does not parse.
pub fn remaining_for(note: &Note, now: NaiveDateTime) -> Result<Remaining> {
    Ok(Remaining::between(note.deadline_at()?, now))
}
