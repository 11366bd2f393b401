//! Building and room models.
//!
//! A place (building) owns a named room table. Rooms carry a capacity and a
//! set of negative flags that forbid specific session types; the search
//! itself always runs inside the fixed 08:00-20:00 teaching window, so the
//! opening-hours map is informational.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{SessionType, TimeInterval};

/// A negative room flag forbidding one session type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoomFlag {
    /// Courses may not be held here.
    #[serde(rename = "noCourse")]
    NoCourse,
    /// Seminars may not be held here.
    #[serde(rename = "noSeminar")]
    NoSeminar,
    /// Laboratories may not be held here.
    #[serde(rename = "noLaboratory")]
    NoLaboratory,
}

impl RoomFlag {
    /// Parses the configuration spelling of a flag.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "noCourse" => Some(Self::NoCourse),
            "noSeminar" => Some(Self::NoSeminar),
            "noLaboratory" => Some(Self::NoLaboratory),
            _ => None,
        }
    }

    /// The flag that forbids a session type.
    pub fn forbidding(session_type: SessionType) -> Self {
        match session_type {
            SessionType::Course => Self::NoCourse,
            SessionType::Seminary => Self::NoSeminar,
            SessionType::Laboratory => Self::NoLaboratory,
        }
    }
}

/// A room inside a place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Seats available.
    pub capacity: u32,
    /// Session types forbidden in this room.
    pub flags: BTreeSet<RoomFlag>,
}

impl Room {
    /// Creates a room with no flags.
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            flags: BTreeSet::new(),
        }
    }

    /// Adds a negative flag.
    pub fn with_flag(mut self, flag: RoomFlag) -> Self {
        self.flags.insert(flag);
        self
    }

    /// Whether this room forbids a session type.
    pub fn forbids(&self, session_type: SessionType) -> bool {
        self.flags.contains(&RoomFlag::forbidding(session_type))
    }
}

/// A building with a named room table.
///
/// Rooms iterate in sorted name order so the placement search is
/// reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Unique building name.
    pub name: String,
    /// Weekday to opening intervals; informational for the core search.
    pub opening_hours: BTreeMap<String, Vec<TimeInterval>>,
    /// Room name to room.
    pub rooms: BTreeMap<String, Room>,
}

impl Place {
    /// Creates a place with no rooms.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            opening_hours: BTreeMap::new(),
            rooms: BTreeMap::new(),
        }
    }

    /// Adds a room.
    pub fn with_room(mut self, name: impl Into<String>, room: Room) -> Self {
        self.rooms.insert(name.into(), room);
        self
    }

    /// Appends an opening interval for a weekday.
    pub fn with_opening(
        mut self,
        day: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) -> Self {
        self.opening_hours
            .entry(day.into())
            .or_default()
            .push(TimeInterval::new(start, end));
        self
    }
}
