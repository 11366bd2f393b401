//! Timetabling domain models.
//!
//! Provides the core data types for describing a university timetabling
//! problem: what is taught ([`Subject`]), by whom ([`Teacher`]), to whom
//! ([`Group`]), where ([`Place`], [`Room`]), and the schedulable unit that
//! ties them together ([`ClassSession`]).
//!
//! All catalog records are immutable after load; only [`ClassSession`]
//! mutates, exactly once, when the solver places it.

mod group;
mod interval;
mod place;
mod session;
mod subject;
mod teacher;

pub use group::{Group, DEFAULT_GROUP_SIZE};
pub use interval::TimeInterval;
pub use place::{Place, Room, RoomFlag};
pub use session::{ClassSession, SessionType, WeekMask, WEEK_DAYS};
pub use subject::Subject;
pub use teacher::{Teacher, TeachingAbility};
