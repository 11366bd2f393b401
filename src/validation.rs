//! Schedule integrity validation.
//!
//! Checks a completed schedule against the catalog's hard constraints:
//! - Placement fields present, day within Monday..Friday
//! - Sessions inside the 08:00-20:00 teaching window
//! - Duration matching the subject's configured length
//! - Room flags and capacity respected
//! - No pairwise conflicts (room, teacher, group/subgroup)
//! - Teacher availability containment
//!
//! The solver enforces all of this during placement; this module makes the
//! same guarantees independently checkable after the fact.

use crate::catalog::Catalog;
use crate::models::{ClassSession, WEEK_DAYS};
use crate::time::{overlap, to_minutes};

/// Validation result.
pub type ScheduleCheck = Result<(), Vec<ScheduleViolation>>;

/// A detected schedule violation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleViolation {
    /// Violation category.
    pub kind: ViolationKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of schedule violations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// A session is missing placement fields or placed on an invalid day.
    Unplaced,
    /// A session starts before 08:00, ends after 20:00, or has a
    /// non-positive duration.
    OutsideTeachingWindow,
    /// A session's duration does not match the subject's configured length.
    DurationMismatch,
    /// A session sits in a room that forbids its type.
    ForbiddenRoom,
    /// A room is smaller than the attending (sub)group.
    CapacityExceeded,
    /// Two sessions collide on a room, teacher, or group.
    SessionConflict,
    /// A session lies outside its teacher's availability.
    TeacherUnavailable,
}

impl ScheduleViolation {
    fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a completed schedule.
///
/// Returns `Ok(())` when every check passes, otherwise all detected
/// violations.
pub fn validate_schedule(catalog: &Catalog, scheduled: &[ClassSession]) -> ScheduleCheck {
    let mut violations = Vec::new();

    for session in scheduled {
        check_placement(session, &mut violations);
        check_window(session, &mut violations);
        check_duration(catalog, session, &mut violations);
        check_room(catalog, session, &mut violations);
        check_teacher(catalog, session, &mut violations);
    }

    for (i, a) in scheduled.iter().enumerate() {
        for b in &scheduled[i + 1..] {
            check_pair(a, b, &mut violations);
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

fn describe(session: &ClassSession) -> String {
    let sub = if session.sub_group.is_empty() {
        String::new()
    } else {
        format!("/{}", session.sub_group)
    };
    format!(
        "{} {} for {}{}",
        session.subject_name,
        session.session_type.label(),
        session.group_id,
        sub
    )
}

fn check_placement(session: &ClassSession, violations: &mut Vec<ScheduleViolation>) {
    if !session.is_placed() || session.room_name.is_empty() {
        violations.push(ScheduleViolation::new(
            ViolationKind::Unplaced,
            format!("{} has no placement", describe(session)),
        ));
        return;
    }
    if !WEEK_DAYS.contains(&session.day.as_str()) {
        violations.push(ScheduleViolation::new(
            ViolationKind::Unplaced,
            format!(
                "{} placed on invalid day {:?}",
                describe(session),
                session.day
            ),
        ));
    }
}

fn check_window(session: &ClassSession, violations: &mut Vec<ScheduleViolation>) {
    let (Ok(start), Ok(end)) = (
        to_minutes(&session.start_time),
        to_minutes(&session.end_time),
    ) else {
        violations.push(ScheduleViolation::new(
            ViolationKind::OutsideTeachingWindow,
            format!("{} has malformed times", describe(session)),
        ));
        return;
    };
    if start < 8 * 60 || end > 20 * 60 || start >= end {
        violations.push(ScheduleViolation::new(
            ViolationKind::OutsideTeachingWindow,
            format!(
                "{} runs {}-{}",
                describe(session),
                session.start_time,
                session.end_time
            ),
        ));
    }
}

fn check_duration(
    catalog: &Catalog,
    session: &ClassSession,
    violations: &mut Vec<ScheduleViolation>,
) {
    let Some(subject) = catalog.subject(&session.subject_name) else {
        return;
    };
    let (Ok(start), Ok(end)) = (
        to_minutes(&session.start_time),
        to_minutes(&session.end_time),
    ) else {
        return;
    };
    let configured = subject.length_for(session.session_type);
    let expected_minutes = if configured == 0 {
        120
    } else {
        configured as i32 * 60
    };
    if end - start != expected_minutes {
        violations.push(ScheduleViolation::new(
            ViolationKind::DurationMismatch,
            format!(
                "{} runs {} minutes, expected {}",
                describe(session),
                end - start,
                expected_minutes
            ),
        ));
    }
}

fn check_room(catalog: &Catalog, session: &ClassSession, violations: &mut Vec<ScheduleViolation>) {
    let room = catalog
        .place(&session.building_name)
        .and_then(|place| place.rooms.get(&session.room_name));
    let Some(room) = room else {
        violations.push(ScheduleViolation::new(
            ViolationKind::ForbiddenRoom,
            format!(
                "{} placed in unknown room {}/{}",
                describe(session),
                session.building_name,
                session.room_name
            ),
        ));
        return;
    };

    if room.forbids(session.session_type) {
        violations.push(ScheduleViolation::new(
            ViolationKind::ForbiddenRoom,
            format!(
                "{} placed in room {} which forbids it",
                describe(session),
                session.room_name
            ),
        ));
    }

    if let Some(group) = catalog.group(&session.group_id) {
        let effective_size = if session.sub_group.is_empty() {
            group.size
        } else {
            group.size / 2
        };
        if room.capacity < effective_size {
            violations.push(ScheduleViolation::new(
                ViolationKind::CapacityExceeded,
                format!(
                    "{} needs {} seats, room {} has {}",
                    describe(session),
                    effective_size,
                    session.room_name,
                    room.capacity
                ),
            ));
        }
    }
}

fn check_teacher(
    catalog: &Catalog,
    session: &ClassSession,
    violations: &mut Vec<ScheduleViolation>,
) {
    if session.teacher_name.is_empty() {
        return;
    }
    let Some(teacher) = catalog.teacher(&session.teacher_name) else {
        return;
    };
    if !teacher.is_available(&session.day, &session.start_time, &session.end_time) {
        violations.push(ScheduleViolation::new(
            ViolationKind::TeacherUnavailable,
            format!(
                "{} on {} {}-{} is outside {}'s availability",
                describe(session),
                session.day,
                session.start_time,
                session.end_time,
                session.teacher_name
            ),
        ));
    }
}

fn check_pair(a: &ClassSession, b: &ClassSession, violations: &mut Vec<ScheduleViolation>) {
    if a.day != b.day {
        return;
    }
    if !a.week_mask.intersects(b.week_mask) {
        return;
    }
    if !overlap(&a.start_time, &a.end_time, &b.start_time, &b.end_time) {
        return;
    }

    if a.room_name == b.room_name {
        violations.push(ScheduleViolation::new(
            ViolationKind::SessionConflict,
            format!(
                "{} and {} share room {} at the same time",
                describe(a),
                describe(b),
                a.room_name
            ),
        ));
    }
    if !a.teacher_name.is_empty() && a.teacher_name == b.teacher_name {
        violations.push(ScheduleViolation::new(
            ViolationKind::SessionConflict,
            format!(
                "{} and {} share teacher {} at the same time",
                describe(a),
                describe(b),
                a.teacher_name
            ),
        ));
    }
    if a.group_id == b.group_id {
        let either_whole_group = a.sub_group.is_empty() || b.sub_group.is_empty();
        if either_whole_group || a.sub_group == b.sub_group {
            violations.push(ScheduleViolation::new(
                ViolationKind::SessionConflict,
                format!(
                    "{} and {} occupy group {} at the same time",
                    describe(a),
                    describe(b),
                    a.group_id
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Group, Place, Room, RoomFlag, SessionType, Subject, Teacher, WeekMask};

    fn sample_catalog() -> Catalog {
        Catalog::new()
            .with_subject(Subject::new("Math").with_teacher("T1").with_courses(1.0, 2))
            .with_group(Group::new("911").with_size(30))
            .with_place(
                Place::new("B")
                    .with_room("R", Room::new(50))
                    .with_room("Small", Room::new(10).with_flag(RoomFlag::NoLaboratory)),
            )
            .with_teacher(Teacher::new("T1").with_availability("Monday", "08:00", "12:00"))
    }

    fn placed_course(room: &str, day: &str, start: &str, end: &str) -> ClassSession {
        let mut s = ClassSession::new("Math", SessionType::Course, "911").with_teacher("T1");
        s.assign("B", room, day, start, end);
        s
    }

    #[test]
    fn test_valid_schedule() {
        let catalog = sample_catalog();
        let schedule = vec![placed_course("R", "Monday", "08:00", "10:00")];
        assert!(validate_schedule(&catalog, &schedule).is_ok());
    }

    #[test]
    fn test_unplaced_session() {
        let catalog = sample_catalog();
        let schedule = vec![ClassSession::new("Math", SessionType::Course, "911")];
        let errors = validate_schedule(&catalog, &schedule).unwrap_err();
        assert!(errors.iter().any(|v| v.kind == ViolationKind::Unplaced));
    }

    #[test]
    fn test_invalid_day() {
        let catalog = sample_catalog();
        let schedule = vec![placed_course("R", "Sunday", "08:00", "10:00")];
        let errors = validate_schedule(&catalog, &schedule).unwrap_err();
        assert!(errors.iter().any(|v| v.kind == ViolationKind::Unplaced));
    }

    #[test]
    fn test_outside_teaching_window() {
        let catalog = sample_catalog();
        let early = vec![placed_course("R", "Monday", "06:00", "08:00")];
        let errors = validate_schedule(&catalog, &early).unwrap_err();
        assert!(errors
            .iter()
            .any(|v| v.kind == ViolationKind::OutsideTeachingWindow));
    }

    #[test]
    fn test_duration_mismatch() {
        let catalog = sample_catalog();
        let schedule = vec![placed_course("R", "Monday", "08:00", "11:00")];
        let errors = validate_schedule(&catalog, &schedule).unwrap_err();
        assert!(errors
            .iter()
            .any(|v| v.kind == ViolationKind::DurationMismatch));
    }

    #[test]
    fn test_forbidden_room_and_capacity() {
        let catalog = sample_catalog();
        let mut lab = ClassSession::new("Math", SessionType::Laboratory, "911");
        lab.assign("B", "Small", "Monday", "08:00", "10:00");
        let errors = validate_schedule(&catalog, &[lab]).unwrap_err();

        assert!(errors.iter().any(|v| v.kind == ViolationKind::ForbiddenRoom));
        assert!(errors
            .iter()
            .any(|v| v.kind == ViolationKind::CapacityExceeded));
    }

    #[test]
    fn test_room_conflict() {
        let catalog = sample_catalog();
        let mut other = ClassSession::new("Math", SessionType::Course, "912");
        other.assign("B", "R", "Monday", "09:00", "11:00");
        let schedule = vec![placed_course("R", "Monday", "08:00", "10:00"), other];
        let errors = validate_schedule(&catalog, &schedule).unwrap_err();
        assert!(errors
            .iter()
            .any(|v| v.kind == ViolationKind::SessionConflict));
    }

    #[test]
    fn test_disjoint_week_masks_do_not_conflict() {
        let catalog = sample_catalog();
        let mut odd = ClassSession::new("Math", SessionType::Laboratory, "911")
            .with_sub_group("1")
            .with_week_mask(WeekMask::ODD);
        odd.assign("B", "R", "Monday", "08:00", "10:00");
        let mut even = ClassSession::new("Math", SessionType::Laboratory, "911")
            .with_sub_group("2")
            .with_week_mask(WeekMask::EVEN);
        even.assign("B", "R", "Monday", "08:00", "10:00");

        // Laboratory length is unset, so the 2-hour fallback applies and
        // the duration check passes.
        assert!(validate_schedule(&catalog, &[odd, even]).is_ok());
    }

    #[test]
    fn test_teacher_unavailable() {
        let catalog = sample_catalog();
        let schedule = vec![placed_course("R", "Monday", "14:00", "16:00")];
        let errors = validate_schedule(&catalog, &schedule).unwrap_err();
        assert!(errors
            .iter()
            .any(|v| v.kind == ViolationKind::TeacherUnavailable));
    }

    #[test]
    fn test_empty_schedule_is_valid() {
        let catalog = sample_catalog();
        assert!(validate_schedule(&catalog, &[]).is_ok());
    }
}
