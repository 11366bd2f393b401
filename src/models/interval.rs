//! Availability interval model.
//!
//! Teachers and buildings declare when they are open as lists of
//! `HH:MM` intervals per weekday.

use serde::{Deserialize, Serialize};

use crate::time::to_minutes;

/// A daily availability interval `[start, end]` in `HH:MM` notation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Interval start (inclusive).
    pub start: String,
    /// Interval end (inclusive for containment checks).
    pub end: String,
}

impl TimeInterval {
    /// Creates a new interval.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Whether `[start, end]` lies fully within this interval.
    ///
    /// Malformed time strings are never contained.
    pub fn contains_span(&self, start: &str, end: &str) -> bool {
        let (Ok(av_start), Ok(av_end), Ok(s), Ok(e)) = (
            to_minutes(&self.start),
            to_minutes(&self.end),
            to_minutes(start),
            to_minutes(end),
        ) else {
            return false;
        };
        av_start <= s && e <= av_end
    }
}
