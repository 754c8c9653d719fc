//! Duty roster domain models.
//!
//! Inputs (`Teacher`, `Lecture`, `DutyType`, `DutyConfig`,
//! `TeacherDutyProfile`) are owned by external stores and captured in a
//! `RosterSnapshot`. Outputs (`DutyAssignment`, `UnfilledSlot`, `Roster`)
//! are produced by a roster run.
//!
//! # Time Model
//! Dates are `chrono::NaiveDate` in school-local time. Intra-day
//! placement is expressed in teaching periods, not clock time.

mod days;
mod duty;
mod duty_config;
mod lecture;
mod profile;
mod roster;
mod snapshot;
mod teacher;

pub use days::{weekday_from_iso, DaySet};
pub use duty::{DutyType, DutyWindow};
pub use duty_config::DutyConfig;
pub use lecture::Lecture;
pub use profile::TeacherDutyProfile;
pub use roster::{
    DutyAssignment, RejectionCounts, Roster, RunPhase, RunSummary, UnfilledSlot, Violation,
    ViolationKind,
};
pub use snapshot::RosterSnapshot;
pub use teacher::{Teacher, TeacherRole};
