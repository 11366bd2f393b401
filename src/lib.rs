//! Distributed greedy solver for weekly university timetables.
//!
//! Expands a catalog of subjects, teachers, groups, and buildings into the
//! required class sessions, then assigns each one a day, start time, and
//! room such that no hard constraint is violated: room suitability and
//! capacity, teacher availability windows, group/subgroup exclusion, and
//! week-parity overlap.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Subject`, `Teacher`, `Place`, `Group`,
//!   `ClassSession`, `WeekMask`
//! - **`catalog`**: Read-only keyed lookup tables over the loaded records
//! - **`config`**: JSON catalog ingestion from a configuration directory
//! - **`workload`**: Expansion of the catalog into unplaced sessions
//! - **`verifier`**: Static and dynamic placement predicates
//! - **`codec`**: Length-prefixed binary framing of sessions for the wire
//! - **`solver`**: The greedy search: a local single-pass solver and a
//!   coordinator/worker fabric that parallelizes it
//! - **`validation`**: Post-solve integrity checks over a finished schedule
//! - **`output`**: JSON schedule export
//!
//! # Architecture
//!
//! The solve is a greedy first-fit pass with no backtracking: sessions are
//! shuffled into a reproducible order and placed one by one against the
//! growing schedule. The distributed driver keeps those semantics by
//! funnelling all commits through a single coordinator, which re-verifies
//! every incoming placement against the schedule as it stands.

pub mod catalog;
pub mod codec;
pub mod config;
pub mod models;
pub mod output;
pub mod solver;
pub mod time;
pub mod validation;
pub mod verifier;
pub mod workload;
