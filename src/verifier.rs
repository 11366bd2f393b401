//! Placement constraint verification.
//!
//! Two pure predicates over a candidate placement: a static room check and
//! a dynamic conflict scan against everything already scheduled. Both are
//! free of side effects so the placer can call them speculatively and the
//! coordinator can re-run them at commit time.

use crate::catalog::Catalog;
use crate::models::{ClassSession, Room};
use crate::time::overlap;

/// Whether a room admits the candidate's session type.
///
/// Capacity is not checked here; it depends on group size and is the
/// placer's concern.
pub fn is_room_suitable(candidate: &ClassSession, room: &Room) -> bool {
    !room.forbids(candidate.session_type)
}

/// Whether the candidate can occupy `[start, end)` on `day` without
/// conflicting with the teacher's availability or any scheduled session.
///
/// The teacher gate runs first: a named teacher present in the catalog must
/// be available for the full span (teachers missing from the catalog are
/// externally managed and bypass the gate). The scan then rejects the slot
/// if any scheduled session on the same day and an intersecting week parity
/// overlaps in time and shares a room, a teacher, or the group.
///
/// Distinct non-empty subgroups of one group may co-occur; a whole-group
/// session conflicts with every subgroup. That asymmetry is what lets two
/// half-group laboratories run in parallel while a lecture blocks both.
pub fn is_slot_free(
    catalog: &Catalog,
    scheduled: &[ClassSession],
    candidate: &ClassSession,
    day: &str,
    start: &str,
    end: &str,
) -> bool {
    if !candidate.teacher_name.is_empty() {
        if let Some(teacher) = catalog.teacher(&candidate.teacher_name) {
            if !teacher.is_available(day, start, end) {
                return false;
            }
        }
    }

    for existing in scheduled {
        if existing.day != day {
            continue;
        }
        if !existing.week_mask.intersects(candidate.week_mask) {
            continue;
        }
        if !overlap(start, end, &existing.start_time, &existing.end_time) {
            continue;
        }

        if existing.room_name == candidate.room_name {
            return false;
        }
        if !candidate.teacher_name.is_empty() && existing.teacher_name == candidate.teacher_name {
            return false;
        }
        if existing.group_id == candidate.group_id {
            let either_whole_group =
                existing.sub_group.is_empty() || candidate.sub_group.is_empty();
            if either_whole_group || existing.sub_group == candidate.sub_group {
                return false;
            }
        }
    }

    true
}
