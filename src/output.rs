//! Schedule export.
//!
//! Writes the placed schedule as a pretty-printed JSON array. Each record
//! carries the day, times, activity type, group and subgroup, subject,
//! teacher, room, and a human-facing frequency label derived from the
//! week mask.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::models::ClassSession;

/// One exported schedule entry.
#[derive(Debug, Serialize)]
struct ScheduleRecord<'a> {
    day: &'a str,
    start: &'a str,
    end: &'a str,
    #[serde(rename = "type")]
    session_type: &'a str,
    group: &'a str,
    subgroup: &'a str,
    subject: &'a str,
    teacher: &'a str,
    room: &'a str,
    frequency: &'a str,
}

impl<'a> From<&'a ClassSession> for ScheduleRecord<'a> {
    fn from(session: &'a ClassSession) -> Self {
        Self {
            day: &session.day,
            start: &session.start_time,
            end: &session.end_time,
            session_type: session.session_type.label(),
            group: &session.group_id,
            subgroup: &session.sub_group,
            subject: &session.subject_name,
            teacher: &session.teacher_name,
            room: &session.room_name,
            frequency: session.week_mask.label(),
        }
    }
}

/// Writes the schedule to `path` as a JSON array.
pub fn write_schedule(path: &Path, scheduled: &[ClassSession]) -> io::Result<()> {
    let records: Vec<ScheduleRecord> = scheduled.iter().map(ScheduleRecord::from).collect();
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &records)?;
    info!(path = %path.display(), sessions = scheduled.len(), "schedule written");
    Ok(())
}
