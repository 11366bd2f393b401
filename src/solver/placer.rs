//! Greedy slot search for one session.
//!
//! Enumerates `building x day x hour x room` in a fixed order and takes the
//! first slot the verifier accepts. Buildings and rooms iterate in sorted
//! name order, so identical inputs always pick identical slots.

use tracing::trace;

use crate::catalog::Catalog;
use crate::models::{ClassSession, WEEK_DAYS};
use crate::time::format_hour;
use crate::verifier::{is_room_suitable, is_slot_free};

use super::SolveError;

/// First hour of the teaching day.
const DAY_START_HOUR: u32 = 8;
/// End of the teaching day; sessions must finish by this hour.
const DAY_END_HOUR: u32 = 20;
/// Substitute duration when the catalog gives no usable length.
const FALLBACK_DURATION_HOURS: u32 = 2;

/// Places sessions against a growing schedule.
#[derive(Debug, Clone, Copy)]
pub struct Placer<'a> {
    catalog: &'a Catalog,
}

impl<'a> Placer<'a> {
    /// Creates a placer over a catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Duration in hours for a candidate: the subject's per-type length,
    /// or two hours when the subject is unknown or the length is zero.
    fn duration_hours(&self, candidate: &ClassSession) -> u32 {
        match self.catalog.subject(&candidate.subject_name) {
            Some(subject) => {
                let length = subject.length_for(candidate.session_type);
                if length == 0 {
                    FALLBACK_DURATION_HOURS
                } else {
                    length
                }
            }
            None => FALLBACK_DURATION_HOURS,
        }
    }

    /// Tries to place `candidate` against `scheduled`.
    ///
    /// On success the candidate's room and time fields are assigned and
    /// `Ok(true)` is returned; on exhaustion the candidate is left unplaced
    /// and `Ok(false)` is returned. A candidate whose group is missing from
    /// the catalog is a fatal error: the effective size cannot be computed.
    pub fn try_place(
        &self,
        candidate: &mut ClassSession,
        scheduled: &[ClassSession],
    ) -> Result<bool, SolveError> {
        let group = self
            .catalog
            .group(&candidate.group_id)
            .ok_or_else(|| SolveError::UnknownGroup(candidate.group_id.clone()))?;

        // Subgroups bring roughly half the group.
        let effective_size = if candidate.sub_group.is_empty() {
            group.size
        } else {
            group.size / 2
        };

        let duration = self.duration_hours(candidate);

        for place in self.catalog.places() {
            for day in WEEK_DAYS {
                for hour in DAY_START_HOUR..DAY_END_HOUR {
                    if hour + duration > DAY_END_HOUR {
                        continue;
                    }
                    let start = format_hour(hour);
                    let end = format_hour(hour + duration);

                    for (room_name, room) in &place.rooms {
                        if !is_room_suitable(candidate, room) {
                            continue;
                        }
                        if room.capacity < effective_size {
                            continue;
                        }

                        candidate.assign(&place.name, room_name, day, &start, &end);
                        if is_slot_free(self.catalog, scheduled, candidate, day, &start, &end) {
                            trace!(
                                subject = %candidate.subject_name,
                                group = %candidate.group_id,
                                day,
                                start = %start,
                                room = %room_name,
                                "session placed"
                            );
                            return Ok(true);
                        }
                    }
                }
            }
        }

        candidate.clear_assignment();
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Group, Place, Room, RoomFlag, SessionType, Subject, Teacher};

    fn base_catalog() -> Catalog {
        Catalog::new()
            .with_subject(Subject::new("Math").with_teacher("T1").with_courses(1.0, 2))
            .with_group(Group::new("911").with_size(30).with_subject("Math"))
            .with_place(Place::new("B").with_room("R", Room::new(50)))
            .with_teacher(Teacher::new("T1").with_availability("Monday", "08:00", "20:00"))
    }

    #[test]
    fn test_places_first_feasible_slot() {
        let catalog = base_catalog();
        let placer = Placer::new(&catalog);
        let mut session = ClassSession::new("Math", SessionType::Course, "911")
            .with_teacher("T1");

        assert!(placer.try_place(&mut session, &[]).expect("no fatal error"));
        assert_eq!(session.building_name, "B");
        assert_eq!(session.room_name, "R");
        assert_eq!(session.day, "Monday");
        assert_eq!(session.start_time, "08:00");
        assert_eq!(session.end_time, "10:00");
    }

    #[test]
    fn test_failed_candidate_stays_unplaced() {
        // Only room is too small for the whole group.
        let catalog = Catalog::new()
            .with_subject(Subject::new("Math").with_courses(1.0, 2))
            .with_group(Group::new("911").with_size(100))
            .with_place(Place::new("B").with_room("R", Room::new(10)));
        let placer = Placer::new(&catalog);
        let mut session = ClassSession::new("Math", SessionType::Course, "911");

        assert!(!placer.try_place(&mut session, &[]).expect("no fatal error"));
        assert!(!session.is_placed());
        assert!(session.room_name.is_empty());
    }

    #[test]
    fn test_unknown_group_is_fatal() {
        let catalog = base_catalog();
        let placer = Placer::new(&catalog);
        let mut session = ClassSession::new("Math", SessionType::Course, "999");

        assert!(matches!(
            placer.try_place(&mut session, &[]),
            Err(SolveError::UnknownGroup(_))
        ));
    }

    #[test]
    fn test_unknown_subject_gets_two_hour_fallback() {
        let catalog = Catalog::new()
            .with_group(Group::new("911"))
            .with_place(Place::new("B").with_room("R", Room::new(50)));
        let placer = Placer::new(&catalog);
        let mut session = ClassSession::new("Mystery", SessionType::Course, "911");

        assert!(placer.try_place(&mut session, &[]).expect("no fatal error"));
        assert_eq!(session.start_time, "08:00");
        assert_eq!(session.end_time, "10:00");
    }

    #[test]
    fn test_zero_length_gets_two_hour_fallback() {
        let catalog = Catalog::new()
            .with_subject(Subject::new("Math").with_courses(1.0, 0))
            .with_group(Group::new("911"))
            .with_place(Place::new("B").with_room("R", Room::new(50)));
        let placer = Placer::new(&catalog);
        let mut session = ClassSession::new("Math", SessionType::Course, "911");

        assert!(placer.try_place(&mut session, &[]).expect("no fatal error"));
        assert_eq!(session.end_time, "10:00");
    }

    #[test]
    fn test_subgroup_needs_half_capacity() {
        let catalog = Catalog::new()
            .with_subject(Subject::new("Lab").with_laboratories(1.0, 2))
            .with_group(Group::new("911").with_size(30).with_laboratory_split(2))
            .with_place(Place::new("B").with_room("R", Room::new(15)));
        let placer = Placer::new(&catalog);

        let mut whole = ClassSession::new("Lab", SessionType::Laboratory, "911");
        assert!(!placer.try_place(&mut whole, &[]).expect("no fatal error"));

        let mut half = ClassSession::new("Lab", SessionType::Laboratory, "911")
            .with_sub_group("1");
        assert!(placer.try_place(&mut half, &[]).expect("no fatal error"));
    }

    #[test]
    fn test_room_flag_forces_other_room() {
        let catalog = Catalog::new()
            .with_subject(Subject::new("Lab").with_laboratories(1.0, 2))
            .with_group(Group::new("911").with_size(20))
            .with_place(
                Place::new("B")
                    .with_room("R1", Room::new(50).with_flag(RoomFlag::NoLaboratory))
                    .with_room("R2", Room::new(50)),
            );
        let placer = Placer::new(&catalog);
        let mut session = ClassSession::new("Lab", SessionType::Laboratory, "911");

        assert!(placer.try_place(&mut session, &[]).expect("no fatal error"));
        assert_eq!(session.room_name, "R2");
    }

    #[test]
    fn test_second_session_takes_next_slot() {
        let catalog = Catalog::new()
            .with_subject(Subject::new("Math").with_courses(1.0, 2))
            .with_group(Group::new("911").with_size(30))
            .with_group(Group::new("912").with_size(30))
            .with_place(Place::new("B").with_room("R", Room::new(50)));
        let placer = Placer::new(&catalog);

        let mut first = ClassSession::new("Math", SessionType::Course, "911");
        assert!(placer.try_place(&mut first, &[]).expect("no fatal error"));

        let mut second = ClassSession::new("Math", SessionType::Course, "912");
        assert!(placer
            .try_place(&mut second, std::slice::from_ref(&first))
            .expect("no fatal error"));

        assert_eq!(first.start_time, "08:00");
        assert_eq!(second.start_time, "10:00");
        assert_eq!(second.end_time, "12:00");
    }

    #[test]
    fn test_session_never_runs_past_closing() {
        // A 3-hour session cannot start at 18:00 or later.
        let catalog = Catalog::new()
            .with_subject(Subject::new("Long").with_courses(1.0, 3))
            .with_group(Group::new("911").with_size(10))
            .with_place(Place::new("B").with_room("R", Room::new(50)));
        let placer = Placer::new(&catalog);

        let mut scheduled = Vec::new();
        // Fill Monday through Friday until nothing fits.
        loop {
            let mut session = ClassSession::new("Long", SessionType::Course, "911")
                .with_sub_group(format!("{}", scheduled.len() + 1));
            if !placer
                .try_place(&mut session, &scheduled)
                .expect("no fatal error")
            {
                break;
            }
            scheduled.push(session);
        }

        assert!(!scheduled.is_empty());
        for s in &scheduled {
            let end: u32 = s.end_time[..2].parse().expect("hour");
            assert!(end <= 20);
        }
    }
}
