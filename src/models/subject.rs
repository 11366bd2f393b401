//! Subject model.
//!
//! A subject declares how many course, seminar, and laboratory meetings a
//! group taking it needs per week, and how long each meeting runs.
//! Fractional frequencies up to 0.5 denote biweekly meetings.

use serde::{Deserialize, Serialize};

use super::SessionType;

/// A subject in the curriculum.
///
/// Immutable after catalog load. Frequencies are per-week counts; a value in
/// `(0, 0.5]` means the meeting runs every other week. Lengths are whole
/// hours; any non-zero frequency should carry a non-zero length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject name.
    pub name: String,
    /// Default teacher for generated sessions.
    pub main_teacher: String,
    /// Language of instruction.
    pub language: String,
    /// Course meetings per week.
    pub courses_per_week: f64,
    /// Course meeting length (hours).
    pub course_length: u32,
    /// Seminar meetings per week.
    pub seminars_per_week: f64,
    /// Seminar meeting length (hours).
    pub seminar_length: u32,
    /// Laboratory meetings per week.
    pub laboratories_per_week: f64,
    /// Laboratory meeting length (hours).
    pub laboratory_length: u32,
    /// Overrides the group's laboratory split when positive.
    pub lab_split_override: Option<u32>,
}

impl Subject {
    /// Creates a subject with no workload.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            main_teacher: String::new(),
            language: String::new(),
            courses_per_week: 0.0,
            course_length: 0,
            seminars_per_week: 0.0,
            seminar_length: 0,
            laboratories_per_week: 0.0,
            laboratory_length: 0,
            lab_split_override: None,
        }
    }

    /// Sets the main teacher.
    pub fn with_teacher(mut self, teacher: impl Into<String>) -> Self {
        self.main_teacher = teacher.into();
        self
    }

    /// Sets the language of instruction.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sets course frequency and length.
    pub fn with_courses(mut self, per_week: f64, length: u32) -> Self {
        self.courses_per_week = per_week;
        self.course_length = length;
        self
    }

    /// Sets seminar frequency and length.
    pub fn with_seminars(mut self, per_week: f64, length: u32) -> Self {
        self.seminars_per_week = per_week;
        self.seminar_length = length;
        self
    }

    /// Sets laboratory frequency and length.
    pub fn with_laboratories(mut self, per_week: f64, length: u32) -> Self {
        self.laboratories_per_week = per_week;
        self.laboratory_length = length;
        self
    }

    /// Sets the laboratory split override.
    pub fn with_lab_split(mut self, split: u32) -> Self {
        self.lab_split_override = Some(split);
        self
    }

    /// Weekly frequency for a session type.
    pub fn frequency_for(&self, session_type: SessionType) -> f64 {
        match session_type {
            SessionType::Course => self.courses_per_week,
            SessionType::Seminary => self.seminars_per_week,
            SessionType::Laboratory => self.laboratories_per_week,
        }
    }

    /// Meeting length in hours for a session type.
    pub fn length_for(&self, session_type: SessionType) -> u32 {
        match session_type {
            SessionType::Course => self.course_length,
            SessionType::Seminary => self.seminar_length,
            SessionType::Laboratory => self.laboratory_length,
        }
    }

    /// Whether every non-zero frequency carries a non-zero length.
    pub fn is_consistent(&self) -> bool {
        [
            SessionType::Course,
            SessionType::Seminary,
            SessionType::Laboratory,
        ]
        .iter()
        .all(|&t| self.frequency_for(t) == 0.0 || self.length_for(t) > 0)
    }
}
