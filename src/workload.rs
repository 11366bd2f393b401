//! Workload generation.
//!
//! Expands the declarative catalog into the concrete list of unplaced
//! [`ClassSession`]s the solver must schedule: for every group and every
//! subject it takes, `ceil(frequency)` meetings per activity kind, fanned
//! out over the group's subgroups for seminars and laboratories.
//!
//! Biweekly activities (frequency in `(0, 0.5]`) on a split group are
//! pre-labelled with alternating week masks: odd subgroups run on odd
//! weeks, even subgroups on even weeks. Two half-group laboratories can
//! then legally share one room and slot on alternating weeks, and the
//! verifier recognizes the pairing as conflict-free.

use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::models::{ClassSession, Group, SessionType, Subject, WeekMask};

/// Frequencies in `(0, 0.5]` denote biweekly meetings. The threshold leaves
/// room for representations like `0.5` stored with rounding noise.
const BIWEEKLY_THRESHOLD: f64 = 0.501;

fn is_biweekly(per_week: f64) -> bool {
    per_week > 0.0 && per_week <= BIWEEKLY_THRESHOLD
}

fn session_count(per_week: f64) -> usize {
    per_week.ceil().max(0.0) as usize
}

/// Generates the full unplaced session list for the catalog.
///
/// Groups iterate in sorted id order and subjects in each group's declared
/// order, so identical catalogs always yield identical workloads. Subjects
/// a group references but the catalog does not define are skipped.
pub fn generate(catalog: &Catalog) -> Vec<ClassSession> {
    let mut sessions = Vec::new();

    for group in catalog.groups() {
        for subject_name in &group.subjects {
            let Some(subject) = catalog.subject(subject_name) else {
                debug!(group = %group.id, subject = %subject_name, "unknown subject skipped");
                continue;
            };
            push_courses(&mut sessions, group, subject);
            push_split_activity(&mut sessions, group, subject, SessionType::Seminary);
            push_split_activity(&mut sessions, group, subject, SessionType::Laboratory);
        }
    }

    info!(sessions = sessions.len(), "workload generated");
    sessions
}

fn push_courses(sessions: &mut Vec<ClassSession>, group: &Group, subject: &Subject) {
    for _ in 0..session_count(subject.courses_per_week) {
        sessions.push(
            ClassSession::new(&subject.name, SessionType::Course, &group.id)
                .with_teacher(&subject.main_teacher),
        );
    }
}

fn push_split_activity(
    sessions: &mut Vec<ClassSession>,
    group: &Group,
    subject: &Subject,
    session_type: SessionType,
) {
    let count = session_count(subject.frequency_for(session_type));
    if count == 0 {
        return;
    }

    let splits = splits_for(group, subject, session_type);
    let biweekly = is_biweekly(subject.frequency_for(session_type));

    for subgroup in 1..=splits {
        let mask = if biweekly && splits >= 2 {
            if subgroup % 2 == 1 {
                WeekMask::ODD
            } else {
                WeekMask::EVEN
            }
        } else if biweekly {
            WeekMask::ODD
        } else {
            WeekMask::EVERY
        };
        let label = if splits == 1 {
            String::new()
        } else {
            subgroup.to_string()
        };

        for _ in 0..count {
            sessions.push(
                ClassSession::new(&subject.name, session_type, &group.id)
                    .with_sub_group(label.clone())
                    .with_teacher(&subject.main_teacher)
                    .with_week_mask(mask),
            );
        }
    }
}

fn splits_for(group: &Group, subject: &Subject, session_type: SessionType) -> u32 {
    match session_type {
        SessionType::Course => 1,
        SessionType::Seminary => group.seminary_split.max(1),
        SessionType::Laboratory => subject
            .lab_split_override
            .filter(|&split| split > 0)
            .unwrap_or(group.laboratory_split)
            .max(1),
    }
}
