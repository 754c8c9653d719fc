//! Duty types and their windows within the school day.
//!
//! # Windows
//! A duty either covers a contiguous range of teaching periods or sits
//! outside the period grid (before school, during a break, after school).
//! Only period-aligned windows can clash with lectures.
//!
//! Two windows overlap iff:
//! - both are period ranges that share at least one period, OR
//! - both are the same off-grid window (breaks must follow the same period).

use serde::{Deserialize, Serialize};

/// Where a duty sits in the school day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DutyWindow {
    /// Before the first period (e.g. gate duty).
    #[default]
    BeforeSchool,
    /// Inclusive range of teaching periods [first, last].
    Periods { first: u8, last: u8 },
    /// The break following `after_period`.
    Break { after_period: u8 },
    /// After the last period (e.g. bus duty).
    AfterSchool,
}

impl DutyWindow {
    /// A window covering a single period.
    pub fn period(period: u8) -> Self {
        Self::Periods {
            first: period,
            last: period,
        }
    }

    /// A window covering periods `first..=last`. Bounds are normalized.
    pub fn periods(first: u8, last: u8) -> Self {
        Self::Periods {
            first: first.min(last),
            last: first.max(last),
        }
    }

    /// Whether this window is on the period grid.
    #[inline]
    pub fn is_period_aligned(&self) -> bool {
        matches!(self, Self::Periods { .. })
    }

    /// Whether a teaching period falls inside this window.
    #[inline]
    pub fn covers_period(&self, period: u8) -> bool {
        self.period_bounds()
            .is_some_and(|(first, last)| period >= first && period <= last)
    }

    /// Ordered `(first, last)` bounds of a period window.
    ///
    /// Windows read from a store may carry swapped bounds; they are
    /// treated as the same range in order.
    #[inline]
    pub fn period_bounds(&self) -> Option<(u8, u8)> {
        match *self {
            Self::Periods { first, last } => Some((first.min(last), first.max(last))),
            _ => None,
        }
    }

    /// Whether two windows overlap on the same date.
    pub fn overlaps(&self, other: &Self) -> bool {
        if let (Some((a1, a2)), Some((b1, b2))) = (self.period_bounds(), other.period_bounds()) {
            return a1 <= b2 && b1 <= a2;
        }
        match (*self, *other) {
            (Self::BeforeSchool, Self::BeforeSchool) => true,
            (Self::AfterSchool, Self::AfterSchool) => true,
            (Self::Break { after_period: a }, Self::Break { after_period: b }) => a == b,
            _ => false,
        }
    }
}

/// A supervisory duty type, scoped to one academic year.
///
/// # Ordering
/// Lower `order` is scheduled first. Orders are unique within a year;
/// should two types still collide, the one inserted first wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyType {
    /// Unique duty type identifier.
    pub id: String,
    /// Human-readable name ("Gate", "Exam Hall").
    pub name: String,
    /// Scheduling order (lower = first).
    pub order: i32,
    /// Relative burden added to a teacher's score per assignment.
    pub weight: u32,
    /// Teachers needed per occurrence (default: 1).
    pub slots: u32,
    /// Position within the school day.
    pub window: DutyWindow,
    pub academic_year: String,
}

impl DutyType {
    /// Creates a duty type with weight 1, one slot, before-school window.
    pub fn new(
        id: impl Into<String>,
        academic_year: impl Into<String>,
        order: i32,
    ) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            order,
            weight: 1,
            slots: 1,
            window: DutyWindow::default(),
            academic_year: academic_year.into(),
        }
    }

    /// Sets the name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the burden weight.
    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    /// Sets the number of slots per occurrence.
    pub fn with_slots(mut self, slots: u32) -> Self {
        self.slots = slots;
        self
    }

    /// Sets the window.
    pub fn with_window(mut self, window: DutyWindow) -> Self {
        self.window = window;
        self
    }
}
