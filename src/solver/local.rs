//! Single-process greedy solver.
//!
//! The serial reference semantics: shuffle the workload with a
//! rank-derived seed, then place each session against the locally growing
//! schedule. The first placement failure aborts the whole solve; a greedy
//! pass does not backtrack.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::models::ClassSession;

use super::placer::Placer;
use super::{shuffle_seed, SolveError};

/// Greedy single-process solver.
#[derive(Debug, Clone, Copy)]
pub struct LocalSolver {
    rank: usize,
}

impl LocalSolver {
    /// Creates a solver for the given rank. The rank seeds the workload
    /// shuffle so different ranks try different orders.
    pub fn new(rank: usize) -> Self {
        Self { rank }
    }

    /// Solves the workload in place.
    ///
    /// On success `sessions` is replaced by the placed schedule and `true`
    /// is returned; on the first unplaceable session the input order is
    /// left shuffled and `false` is returned.
    pub fn solve(
        &self,
        catalog: &Catalog,
        sessions: &mut Vec<ClassSession>,
    ) -> Result<bool, SolveError> {
        let mut rng = SmallRng::seed_from_u64(shuffle_seed(self.rank));
        sessions.shuffle(&mut rng);

        let placer = Placer::new(catalog);
        let mut scheduled: Vec<ClassSession> = Vec::with_capacity(sessions.len());

        for session in sessions.iter_mut() {
            if !placer.try_place(session, &scheduled)? {
                debug!(
                    subject = %session.subject_name,
                    group = %session.group_id,
                    sub_group = %session.sub_group,
                    "no feasible slot; aborting greedy pass"
                );
                return Ok(false);
            }
            scheduled.push(session.clone());
        }

        info!(rank = self.rank, placed = scheduled.len(), "local solve complete");
        *sessions = scheduled;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Group, Place, Room, RoomFlag, Subject, Teacher, WeekMask};
    use crate::validation::validate_schedule;
    use crate::workload;

    fn solve_local(catalog: &Catalog) -> (bool, Vec<ClassSession>) {
        let mut sessions = workload::generate(catalog);
        let ok = LocalSolver::new(0)
            .solve(catalog, &mut sessions)
            .expect("no fatal error");
        (ok, sessions)
    }

    // One group, one subject, one wide-open room: the course lands in the
    // earliest slot.
    #[test]
    fn test_single_course_takes_monday_morning() {
        let catalog = Catalog::new()
            .with_subject(Subject::new("Math").with_teacher("T1").with_courses(1.0, 2))
            .with_group(Group::new("911").with_size(30).with_subject("Math"))
            .with_place(Place::new("B").with_room("R", Room::new(50)))
            .with_teacher(Teacher::new("T1").with_availability("Monday", "08:00", "20:00"));

        let (ok, scheduled) = solve_local(&catalog);
        assert!(ok);
        assert_eq!(scheduled.len(), 1);
        assert_eq!(scheduled[0].building_name, "B");
        assert_eq!(scheduled[0].room_name, "R");
        assert_eq!(scheduled[0].day, "Monday");
        assert_eq!(scheduled[0].start_time, "08:00");
        assert_eq!(scheduled[0].end_time, "10:00");
    }

    // Two groups contend for one room: the courses stack back to back.
    #[test]
    fn test_two_groups_stack_in_one_room() {
        let catalog = Catalog::new()
            .with_subject(Subject::new("Math").with_courses(1.0, 2))
            .with_group(Group::new("911").with_size(30).with_subject("Math"))
            .with_group(Group::new("912").with_size(30).with_subject("Math"))
            .with_place(Place::new("B").with_room("R", Room::new(50)));

        let (ok, scheduled) = solve_local(&catalog);
        assert!(ok);
        assert_eq!(scheduled.len(), 2);

        let mut starts: Vec<&str> = scheduled.iter().map(|s| s.start_time.as_str()).collect();
        starts.sort();
        assert_eq!(starts, vec!["08:00", "10:00"]);
        assert!(scheduled.iter().all(|s| s.day == "Monday"));
        assert!(validate_schedule(&catalog, &scheduled).is_ok());
    }

    // A biweekly split laboratory yields two subgroup sessions on
    // alternating weeks, free to share one room and slot.
    #[test]
    fn test_biweekly_lab_subgroups_may_share_slot() {
        let catalog = Catalog::new()
            .with_subject(Subject::new("Lab").with_laboratories(0.5, 2))
            .with_group(
                Group::new("911")
                    .with_size(30)
                    .with_subject("Lab")
                    .with_laboratory_split(2),
            )
            .with_place(Place::new("B").with_room("R", Room::new(20)));

        let (ok, scheduled) = solve_local(&catalog);
        assert!(ok);
        assert_eq!(scheduled.len(), 2);

        let mut subs: Vec<&str> = scheduled.iter().map(|s| s.sub_group.as_str()).collect();
        subs.sort();
        assert_eq!(subs, vec!["1", "2"]);

        let mut masks: Vec<u8> = scheduled.iter().map(|s| s.week_mask.0).collect();
        masks.sort();
        assert_eq!(masks, vec![1, 2]);
        assert!(validate_schedule(&catalog, &scheduled).is_ok());
    }

    // A noLaboratory room forces the lab elsewhere; with no other room the
    // solve fails outright.
    #[test]
    fn test_room_flag_redirects_or_fails() {
        let flagged = Room::new(50).with_flag(RoomFlag::NoLaboratory);

        let catalog_with_alternative = Catalog::new()
            .with_subject(Subject::new("Lab").with_laboratories(1.0, 2))
            .with_group(Group::new("911").with_size(20).with_subject("Lab"))
            .with_place(
                Place::new("B")
                    .with_room("R", flagged.clone())
                    .with_room("R2", Room::new(50)),
            );
        let (ok, scheduled) = solve_local(&catalog_with_alternative);
        assert!(ok);
        assert_eq!(scheduled[0].room_name, "R2");

        let catalog_without = Catalog::new()
            .with_subject(Subject::new("Lab").with_laboratories(1.0, 2))
            .with_group(Group::new("911").with_size(20).with_subject("Lab"))
            .with_place(Place::new("B").with_room("R", flagged));
        let (ok, _) = solve_local(&catalog_without);
        assert!(!ok);
    }

    // A narrow availability window pins the course to the only feasible
    // slot.
    #[test]
    fn test_tight_availability_pins_the_slot() {
        let catalog = Catalog::new()
            .with_subject(Subject::new("Math").with_teacher("T1").with_courses(1.0, 2))
            .with_group(Group::new("911").with_size(30).with_subject("Math"))
            .with_place(Place::new("B").with_room("R", Room::new(50)))
            .with_teacher(Teacher::new("T1").with_availability("Monday", "10:00", "12:00"));

        let (ok, scheduled) = solve_local(&catalog);
        assert!(ok);
        assert_eq!(scheduled[0].day, "Monday");
        assert_eq!(scheduled[0].start_time, "10:00");
        assert_eq!(scheduled[0].end_time, "12:00");
    }

    // More whole-group sessions than the week can hold in a single room:
    // the greedy pass must fail.
    #[test]
    fn test_overfull_workload_fails() {
        // 5 days x 1 room x 6 two-hour slots = 30 feasible placements.
        let mut group = Group::new("911").with_size(30);
        for i in 0..31 {
            group = group.with_subject(format!("S{i}"));
        }
        let mut catalog = Catalog::new()
            .with_place(Place::new("B").with_room("R", Room::new(50)))
            .with_group(group);
        for i in 0..31 {
            catalog.add_subject(Subject::new(format!("S{i}")).with_courses(1.0, 2));
        }

        let (ok, _) = solve_local(&catalog);
        assert!(!ok);
    }

    // The shuffle is seeded: identical inputs give identical schedules.
    #[test]
    fn test_rank_seeded_determinism() {
        let catalog = Catalog::new()
            .with_subject(Subject::new("Math").with_courses(1.0, 2))
            .with_subject(Subject::new("Physics").with_courses(1.0, 2))
            .with_group(
                Group::new("911")
                    .with_size(30)
                    .with_subject("Math")
                    .with_subject("Physics"),
            )
            .with_place(Place::new("B").with_room("R", Room::new(50)));

        let (ok_a, first) = solve_local(&catalog);
        let (ok_b, second) = solve_local(&catalog);
        assert!(ok_a && ok_b);
        assert_eq!(first, second);
    }

    // Every generated session ends up scheduled exactly once.
    #[test]
    fn test_total_coverage() {
        let catalog = Catalog::new()
            .with_subject(
                Subject::new("Math")
                    .with_courses(1.0, 2)
                    .with_seminars(1.0, 2),
            )
            .with_group(
                Group::new("911")
                    .with_size(30)
                    .with_subject("Math")
                    .with_seminary_split(2),
            )
            .with_place(
                Place::new("B")
                    .with_room("R1", Room::new(50))
                    .with_room("R2", Room::new(50)),
            );

        let generated = workload::generate(&catalog);
        let (ok, scheduled) = solve_local(&catalog);
        assert!(ok);
        assert_eq!(scheduled.len(), generated.len());

        let mut wanted: Vec<_> = generated
            .iter()
            .map(|s| {
                (
                    s.subject_name.clone(),
                    s.session_type,
                    s.group_id.clone(),
                    s.sub_group.clone(),
                )
            })
            .collect();
        let mut got: Vec<_> = scheduled
            .iter()
            .map(|s| {
                (
                    s.subject_name.clone(),
                    s.session_type,
                    s.group_id.clone(),
                    s.sub_group.clone(),
                )
            })
            .collect();
        wanted.sort();
        got.sort();
        assert_eq!(wanted, got);
        assert!(scheduled.iter().all(|s| s.week_mask == WeekMask::EVERY));
    }
}
