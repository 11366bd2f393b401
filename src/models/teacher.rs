//! Teacher model.
//!
//! A teacher carries an availability map (weekday to intervals), a
//! per-subject capability map, and advisory preferences. Only the
//! availability map is consulted during placement; the weekly hour cap and
//! building preferences are informational.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::TimeInterval;

/// What a teacher may do for one subject besides lecturing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeachingAbility {
    /// May lead seminars.
    pub can_seminar: bool,
    /// May lead laboratories.
    pub can_laboratory: bool,
}

/// A teacher in the catalog.
///
/// Immutable after catalog load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Unique teacher name.
    pub name: String,
    /// Advisory weekly hour cap; not enforced during placement.
    pub max_hours_per_week: u32,
    /// Buildings this teacher prefers to work in.
    pub preferred_buildings: Vec<String>,
    /// Languages this teacher can teach in.
    pub languages: Vec<String>,
    /// Subject name to teaching ability.
    pub abilities: BTreeMap<String, TeachingAbility>,
    /// Weekday to ordered availability intervals.
    pub availability: BTreeMap<String, Vec<TimeInterval>>,
}

impl Teacher {
    /// Creates a teacher with an empty availability map.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_hours_per_week: 0,
            preferred_buildings: Vec::new(),
            languages: Vec::new(),
            abilities: BTreeMap::new(),
            availability: BTreeMap::new(),
        }
    }

    /// Sets the advisory weekly hour cap.
    pub fn with_max_hours(mut self, hours: u32) -> Self {
        self.max_hours_per_week = hours;
        self
    }

    /// Adds a preferred building.
    pub fn with_preferred_building(mut self, building: impl Into<String>) -> Self {
        self.preferred_buildings.push(building.into());
        self
    }

    /// Adds a teaching language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.languages.push(language.into());
        self
    }

    /// Registers an ability for a subject.
    pub fn with_ability(
        mut self,
        subject: impl Into<String>,
        can_seminar: bool,
        can_laboratory: bool,
    ) -> Self {
        self.abilities.insert(
            subject.into(),
            TeachingAbility {
                can_seminar,
                can_laboratory,
            },
        );
        self
    }

    /// Appends an availability interval for a weekday.
    pub fn with_availability(
        mut self,
        day: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.availability
            .entry(day.into())
            .or_default()
            .push(TimeInterval::new(start, end));
        self
    }

    /// Whether `[start, end]` on `day` lies within some availability
    /// interval.
    ///
    /// A day absent from the availability map means the teacher is never
    /// available on that day.
    pub fn is_available(&self, day: &str, start: &str, end: &str) -> bool {
        match self.availability.get(day) {
            Some(intervals) => intervals.iter().any(|iv| iv.contains_span(start, end)),
            None => false,
        }
    }
}
