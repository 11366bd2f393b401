//! Class session model.
//!
//! A [`ClassSession`] is the unit of scheduling: one concrete meeting of a
//! group (or subgroup) for a subject. Sessions are constructed unplaced by
//! the workload generator, receive their room and time exactly once on
//! successful placement, and are never modified afterwards.

use serde::{Deserialize, Serialize};

/// Teaching days, in search order.
pub const WEEK_DAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// Kind of class meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SessionType {
    /// Whole-group lecture.
    Course,
    /// Discussion session, possibly per subgroup.
    Seminary,
    /// Practical session, possibly per subgroup.
    Laboratory,
}

impl SessionType {
    /// Wire code used by the session codec.
    pub fn code(self) -> u8 {
        match self {
            Self::Course => 0,
            Self::Seminary => 1,
            Self::Laboratory => 2,
        }
    }

    /// Inverse of [`SessionType::code`].
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Course),
            1 => Some(Self::Seminary),
            2 => Some(Self::Laboratory),
            _ => None,
        }
    }

    /// Human-facing label used in exported schedules.
    pub fn label(self) -> &'static str {
        match self {
            Self::Course => "Course",
            Self::Seminary => "Seminar",
            Self::Laboratory => "Laboratory",
        }
    }
}

/// Two-bit week recurrence tag.
///
/// Bit 0 selects odd weeks, bit 1 even weeks. Two sessions with disjoint
/// masks can never conflict, even at identical times. The general AND test
/// is kept rather than special-casing the three emitted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekMask(pub u8);

impl WeekMask {
    /// Odd weeks only.
    pub const ODD: WeekMask = WeekMask(0b01);
    /// Even weeks only.
    pub const EVEN: WeekMask = WeekMask(0b10);
    /// Every week.
    pub const EVERY: WeekMask = WeekMask(0b11);

    /// Whether two masks share a week parity.
    pub fn intersects(self, other: WeekMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Human-facing label used in exported schedules.
    pub fn label(self) -> &'static str {
        match self {
            Self::ODD => "Odd Week",
            Self::EVEN => "Even Week",
            _ => "Weekly",
        }
    }
}

impl Default for WeekMask {
    fn default() -> Self {
        Self::EVERY
    }
}

/// One class meeting to be scheduled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSession {
    /// Subject taught.
    pub subject_name: String,
    /// Kind of meeting.
    pub session_type: SessionType,
    /// Attending group id.
    pub group_id: String,
    /// Attending subgroup: `""` for the whole group, otherwise `"1"`..`"N"`.
    pub sub_group: String,
    /// Assigned teacher; may be empty.
    pub teacher_name: String,
    /// Building, once placed.
    pub building_name: String,
    /// Room, once placed.
    pub room_name: String,
    /// Weekday, once placed.
    pub day: String,
    /// Start time `HH:MM`, once placed.
    pub start_time: String,
    /// End time `HH:MM`, once placed.
    pub end_time: String,
    /// Week recurrence.
    pub week_mask: WeekMask,
}

impl ClassSession {
    /// Creates an unplaced whole-group session running every week.
    pub fn new(
        subject: impl Into<String>,
        session_type: SessionType,
        group_id: impl Into<String>,
    ) -> Self {
        Self {
            subject_name: subject.into(),
            session_type,
            group_id: group_id.into(),
            sub_group: String::new(),
            teacher_name: String::new(),
            building_name: String::new(),
            room_name: String::new(),
            day: String::new(),
            start_time: String::new(),
            end_time: String::new(),
            week_mask: WeekMask::EVERY,
        }
    }

    /// Sets the subgroup label.
    pub fn with_sub_group(mut self, sub_group: impl Into<String>) -> Self {
        self.sub_group = sub_group.into();
        self
    }

    /// Sets the teacher.
    pub fn with_teacher(mut self, teacher: impl Into<String>) -> Self {
        self.teacher_name = teacher.into();
        self
    }

    /// Sets the week recurrence.
    pub fn with_week_mask(mut self, mask: WeekMask) -> Self {
        self.week_mask = mask;
        self
    }

    /// Whether this session has been placed.
    pub fn is_placed(&self) -> bool {
        !self.day.is_empty()
    }

    /// Assigns room and time. Called once by the placer on success.
    pub fn assign(
        &mut self,
        building: impl Into<String>,
        room: impl Into<String>,
        day: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
    ) {
        self.building_name = building.into();
        self.room_name = room.into();
        self.day = day.into();
        self.start_time = start.into();
        self.end_time = end.into();
    }

    /// Reverts to the unplaced state.
    pub fn clear_assignment(&mut self) {
        self.building_name.clear();
        self.room_name.clear();
        self.day.clear();
        self.start_time.clear();
        self.end_time.clear();
    }

    /// Scheduling identity: what the session is, independent of placement.
    pub fn identity(&self) -> (&str, SessionType, &str, &str) {
        (
            &self.subject_name,
            self.session_type,
            &self.group_id,
            &self.sub_group,
        )
    }
}
