//! Configuration ingestion.
//!
//! Loads the four catalog files from a configuration directory:
//! `subjects-config.json`, `teachers-config.json`, `places-config.json`,
//! and `groups-config.json`. Each file is a JSON object keyed by record
//! name. Unknown fields and unknown room flags are ignored; missing or
//! malformed files are fatal.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::models::{
    Group, Place, Room, RoomFlag, Subject, Teacher, DEFAULT_GROUP_SIZE,
};

/// Error loading the configuration directory.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config file {}: {}", .path.display(), .source)]
    Missing {
        /// Offending file.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file was not valid JSON of the expected shape.
    #[error("malformed config file {}: {}", .path.display(), .source)]
    Malformed {
        /// Offending file.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SubjectConfig {
    main_teacher: String,
    language: String,
    courses_per_week: f64,
    course_length: u32,
    seminars_per_week: f64,
    seminar_length: u32,
    laboratories_per_week: f64,
    laboratory_length: u32,
    laboratory_split: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AbilityConfig {
    can_seminar: bool,
    can_laboratory: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct IntervalConfig {
    start: String,
    end: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TeacherConfig {
    max_hours_per_week: u32,
    preferred_buildings: Vec<String>,
    languages: Vec<String>,
    subjects: BTreeMap<String, AbilityConfig>,
    availability: BTreeMap<String, Vec<IntervalConfig>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RoomConfig {
    capacity: u32,
    flags: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PlaceConfig {
    opening_hours: BTreeMap<String, Vec<IntervalConfig>>,
    rooms: BTreeMap<String, RoomConfig>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct GroupConfig {
    size: u32,
    language: String,
    subjects: Vec<String>,
    seminary_split: u32,
    laboratory_split: u32,
}

impl Default for GroupConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_GROUP_SIZE,
            language: String::new(),
            subjects: Vec::new(),
            seminary_split: 1,
            laboratory_split: 1,
        }
    }
}

/// Loads all four catalog files from `dir`.
pub fn load_catalog(dir: &Path) -> Result<Catalog, ConfigError> {
    let mut catalog = Catalog::new();

    let subjects: BTreeMap<String, SubjectConfig> =
        read_config(&dir.join("subjects-config.json"))?;
    for (name, raw) in subjects {
        let subject = subject_from(name, raw);
        if !subject.is_consistent() {
            warn!(
                subject = %subject.name,
                "non-zero frequency with zero length; placer will fall back to 2 hours"
            );
        }
        catalog.add_subject(subject);
    }

    let teachers: BTreeMap<String, TeacherConfig> =
        read_config(&dir.join("teachers-config.json"))?;
    for (name, raw) in teachers {
        catalog.add_teacher(teacher_from(name, raw));
    }

    let places: BTreeMap<String, PlaceConfig> = read_config(&dir.join("places-config.json"))?;
    for (name, raw) in places {
        catalog.add_place(place_from(name, raw));
    }

    let groups: BTreeMap<String, GroupConfig> = read_config(&dir.join("groups-config.json"))?;
    for (id, raw) in groups {
        catalog.add_group(group_from(id, raw));
    }

    info!(
        subjects = catalog.subject_count(),
        teachers = catalog.teacher_count(),
        places = catalog.place_count(),
        groups = catalog.group_count(),
        "catalog loaded"
    );
    Ok(catalog)
}

fn read_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Missing {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

fn subject_from(name: String, raw: SubjectConfig) -> Subject {
    let mut subject = Subject::new(name)
        .with_teacher(raw.main_teacher)
        .with_language(raw.language)
        .with_courses(raw.courses_per_week, raw.course_length)
        .with_seminars(raw.seminars_per_week, raw.seminar_length)
        .with_laboratories(raw.laboratories_per_week, raw.laboratory_length);
    if let Some(split) = raw.laboratory_split {
        subject = subject.with_lab_split(split);
    }
    subject
}

fn teacher_from(name: String, raw: TeacherConfig) -> Teacher {
    let mut teacher = Teacher::new(name).with_max_hours(raw.max_hours_per_week);
    for building in raw.preferred_buildings {
        teacher = teacher.with_preferred_building(building);
    }
    for language in raw.languages {
        teacher = teacher.with_language(language);
    }
    for (subject, ability) in raw.subjects {
        teacher = teacher.with_ability(subject, ability.can_seminar, ability.can_laboratory);
    }
    for (day, intervals) in raw.availability {
        for iv in intervals {
            teacher = teacher.with_availability(day.clone(), iv.start, iv.end);
        }
    }
    teacher
}

fn place_from(name: String, raw: PlaceConfig) -> Place {
    let mut place = Place::new(name);
    for (day, intervals) in raw.opening_hours {
        for iv in intervals {
            place = place.with_opening(day.clone(), iv.start, iv.end);
        }
    }
    for (room_name, raw_room) in raw.rooms {
        let mut room = Room::new(raw_room.capacity);
        for flag in &raw_room.flags {
            match RoomFlag::parse(flag) {
                Some(parsed) => room = room.with_flag(parsed),
                None => warn!(room = %room_name, flag = %flag, "ignoring unknown room flag"),
            }
        }
        place = place.with_room(room_name, room);
    }
    place
}

fn group_from(id: String, raw: GroupConfig) -> Group {
    let mut group = Group::new(id)
        .with_size(raw.size)
        .with_language(raw.language)
        .with_seminary_split(raw.seminary_split.max(1))
        .with_laboratory_split(raw.laboratory_split.max(1));
    for subject in raw.subjects {
        group = group.with_subject(subject);
    }
    group
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionType;

    fn parse<T: DeserializeOwned>(text: &str) -> BTreeMap<String, T> {
        serde_json::from_str(text).expect("test JSON must parse")
    }

    #[test]
    fn test_parse_subjects() {
        let raw: BTreeMap<String, SubjectConfig> = parse(
            r#"{
                "Math": {
                    "main_teacher": "T1",
                    "language": "English",
                    "courses_per_week": 1.0,
                    "course_length": 2,
                    "seminars_per_week": 0.5,
                    "seminar_length": 2,
                    "laboratories_per_week": 0,
                    "laboratory_length": 0,
                    "laboratory_split": 2,
                    "unknown_field": true
                }
            }"#,
        );
        let (name, cfg) = raw.into_iter().next().expect("one subject");
        let subject = subject_from(name, cfg);

        assert_eq!(subject.main_teacher, "T1");
        assert_eq!(subject.frequency_for(SessionType::Seminary), 0.5);
        assert_eq!(subject.length_for(SessionType::Course), 2);
        assert_eq!(subject.lab_split_override, Some(2));
    }

    #[test]
    fn test_parse_teachers() {
        let raw: BTreeMap<String, TeacherConfig> = parse(
            r#"{
                "T1": {
                    "max_hours_per_week": 16,
                    "preferred_buildings": ["Main"],
                    "languages": ["English", "Romanian"],
                    "subjects": {"Math": {"can_seminar": true, "can_laboratory": false}},
                    "availability": {
                        "Monday": [{"start": "08:00", "end": "14:00"}],
                        "Friday": [{"start": "10:00", "end": "12:00"}]
                    }
                }
            }"#,
        );
        let (name, cfg) = raw.into_iter().next().expect("one teacher");
        let teacher = teacher_from(name, cfg);

        assert_eq!(teacher.max_hours_per_week, 16);
        assert!(teacher.is_available("Monday", "08:00", "10:00"));
        assert!(!teacher.is_available("Tuesday", "08:00", "10:00"));
        assert!(teacher.abilities["Math"].can_seminar);
    }

    #[test]
    fn test_parse_places_skips_unknown_flags() {
        let raw: BTreeMap<String, PlaceConfig> = parse(
            r#"{
                "Main": {
                    "rooms": {
                        "R1": {"capacity": 120, "flags": ["noLaboratory", "noDancing"]},
                        "R2": {"capacity": 15}
                    }
                }
            }"#,
        );
        let (name, cfg) = raw.into_iter().next().expect("one place");
        let place = place_from(name, cfg);

        let r1 = &place.rooms["R1"];
        assert!(r1.forbids(SessionType::Laboratory));
        assert_eq!(r1.flags.len(), 1);
        assert_eq!(place.rooms["R2"].capacity, 15);
    }

    #[test]
    fn test_parse_groups_defaults() {
        let raw: BTreeMap<String, GroupConfig> = parse(
            r#"{
                "911": {"subjects": ["Math"]},
                "912": {"size": 24, "seminary_split": 2, "laboratory_split": 2}
            }"#,
        );
        let groups: Vec<Group> = raw
            .into_iter()
            .map(|(id, cfg)| group_from(id, cfg))
            .collect();

        assert_eq!(groups[0].size, DEFAULT_GROUP_SIZE);
        assert_eq!(groups[0].seminary_split, 1);
        assert_eq!(groups[0].subjects, vec!["Math"]);
        assert_eq!(groups[1].size, 24);
        assert_eq!(groups[1].laboratory_split, 2);
    }

    #[test]
    fn test_zero_split_is_clamped() {
        let raw: BTreeMap<String, GroupConfig> = parse(r#"{"911": {"seminary_split": 0}}"#);
        let (id, cfg) = raw.into_iter().next().expect("one group");
        let group = group_from(id, cfg);
        assert_eq!(group.seminary_split, 1);
    }

    #[test]
    fn test_load_catalog_missing_dir() {
        let err = load_catalog(Path::new("/nonexistent-config-dir"))
            .expect_err("missing directory must fail");
        assert!(matches!(err, ConfigError::Missing { .. }));
    }
}
