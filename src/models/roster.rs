//! Roster (solution) model.
//!
//! A roster is the output of one generation run: a day-by-day list of
//! duty assignments for a date range, the slots that could not be
//! filled, and a summary an operator can act on.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One teacher assigned to one slot of a duty on a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyAssignment {
    pub date: NaiveDate,
    pub duty_type_id: String,
    pub teacher_id: String,
    /// Slot index within the occurrence (0-based).
    pub slot: u32,
    /// Calendar week number used for weekly-cap accounting.
    pub week: i32,
    /// Teacher's burden score at the moment of selection.
    pub burden_before: u32,
}

impl DutyAssignment {
    /// Creates an assignment for slot 0 in week 1.
    pub fn new(
        date: NaiveDate,
        duty_type_id: impl Into<String>,
        teacher_id: impl Into<String>,
    ) -> Self {
        Self {
            date,
            duty_type_id: duty_type_id.into(),
            teacher_id: teacher_id.into(),
            slot: 0,
            week: 1,
            burden_before: 0,
        }
    }

    /// Sets the slot index.
    pub fn with_slot(mut self, slot: u32) -> Self {
        self.slot = slot;
        self
    }

    /// Sets the week number.
    pub fn with_week(mut self, week: i32) -> Self {
        self.week = week;
        self
    }

    /// Sets the burden score recorded at selection time.
    pub fn with_burden(mut self, burden: u32) -> Self {
        self.burden_before = burden;
        self
    }
}

/// Why candidates were turned away for a slot.
///
/// Each candidate is counted once, under the first rule it failed
/// (rules are checked in field order).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectionCounts {
    pub exempt: u32,
    pub day_not_eligible: u32,
    pub weekly_cap: u32,
    pub lecture_conflict: u32,
    pub overlapping_duty: u32,
}

impl RejectionCounts {
    /// Total rejected candidates.
    pub fn total(&self) -> u32 {
        self.exempt
            + self.day_not_eligible
            + self.weekly_cap
            + self.lecture_conflict
            + self.overlapping_duty
    }
}

/// A duty slot no eligible teacher could take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnfilledSlot {
    pub date: NaiveDate,
    pub duty_type_id: String,
    pub slot: u32,
    pub rejections: RejectionCounts,
}

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub total_slots: usize,
    pub filled_slots: usize,
    pub unfilled_slots: Vec<UnfilledSlot>,
    /// Lectures dropped because they reference an unknown teacher.
    pub skipped_lectures: usize,
}

impl RunSummary {
    /// Whether every slot was filled.
    pub fn is_complete(&self) -> bool {
        self.unfilled_slots.is_empty()
    }
}

/// Lifecycle of a roster run.
///
/// ```text
/// Initializing → Resolving → Assigning → Completed { with_unfilled }
/// ```
/// Only `Initializing` may fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunPhase {
    /// Validating the range, year and snapshot.
    Initializing,
    /// Building calendar, loads, conflicts and profiles.
    Resolving,
    /// Walking dates × duty types.
    Assigning,
    /// Terminal.
    Completed { with_unfilled: bool },
}

/// The generated duty roster for one academic year and date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub academic_year: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Assignments in generation order (date, duty order, slot).
    pub assignments: Vec<DutyAssignment>,
    pub summary: RunSummary,
    pub phase: RunPhase,
}

impl Roster {
    /// Number of assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Assignments held by a teacher.
    pub fn assignments_for_teacher(&self, teacher_id: &str) -> Vec<&DutyAssignment> {
        self.assignments
            .iter()
            .filter(|a| a.teacher_id == teacher_id)
            .collect()
    }

    /// Assignments on a date.
    pub fn assignments_on(&self, date: NaiveDate) -> Vec<&DutyAssignment> {
        self.assignments.iter().filter(|a| a.date == date).collect()
    }

    /// Teacher holding a given duty slot, if any.
    pub fn teacher_for(&self, date: NaiveDate, duty_type_id: &str, slot: u32) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| a.date == date && a.duty_type_id == duty_type_id && a.slot == slot)
            .map(|a| a.teacher_id.as_str())
    }

    /// Whether every slot in the range was filled.
    pub fn is_complete(&self) -> bool {
        self.summary.is_complete()
    }
}

/// An invariant broken by a roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub date: NaiveDate,
    pub duty_type_id: String,
    pub teacher_id: String,
    /// Human-readable description.
    pub message: String,
}

/// Classification of roster violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    /// Teacher is exempt from the duty type.
    Exempt,
    /// Date's weekday is outside the teacher's eligible days.
    DayNotEligible,
    /// Teacher exceeds the weekly cap.
    WeeklyCapExceeded,
    /// Duty window overlaps a recurring lecture.
    LectureConflict,
    /// Teacher holds two overlapping duties on one date.
    OverlappingDuty,
    /// More teachers than slots for one occurrence.
    SlotOverfilled,
    /// Assignment references a teacher outside the directory.
    UnknownTeacher,
    /// Assignment references a duty type outside the year.
    UnknownDutyType,
}

impl Violation {
    pub(crate) fn new(
        kind: ViolationKind,
        assignment: &DutyAssignment,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            date: assignment.date,
            duty_type_id: assignment.duty_type_id.clone(),
            teacher_id: assignment.teacher_id.clone(),
            message: message.into(),
        }
    }
}
