//! Student group model.

use serde::{Deserialize, Serialize};

/// Default group size when the configuration omits one.
pub const DEFAULT_GROUP_SIZE: u32 = 30;

/// A student group.
///
/// The split fields say into how many subgroups the group partitions for
/// seminars and laboratories; `1` means the whole group attends together.
/// Immutable after catalog load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique group id, e.g. `"911"`.
    pub id: String,
    /// Number of students.
    pub size: u32,
    /// Language of instruction.
    pub language: String,
    /// Names of subjects this group takes.
    pub subjects: Vec<String>,
    /// Subgroup count for seminars.
    pub seminary_split: u32,
    /// Subgroup count for laboratories.
    pub laboratory_split: u32,
}

impl Group {
    /// Creates a group of default size taking no subjects.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            size: DEFAULT_GROUP_SIZE,
            language: String::new(),
            subjects: Vec::new(),
            seminary_split: 1,
            laboratory_split: 1,
        }
    }

    /// Sets the group size.
    pub fn with_size(mut self, size: u32) -> Self {
        self.size = size;
        self
    }

    /// Sets the language of instruction.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Adds a subject this group takes.
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subjects.push(subject.into());
        self
    }

    /// Sets the seminar subgroup count.
    pub fn with_seminary_split(mut self, split: u32) -> Self {
        self.seminary_split = split;
        self
    }

    /// Sets the laboratory subgroup count.
    pub fn with_laboratory_split(mut self, split: u32) -> Self {
        self.laboratory_split = split;
        self
    }
}
