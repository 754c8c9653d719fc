//! Lecture model (read-only input).
//!
//! A lecture occupies one teaching period on one weekday. Only recurring
//! lectures describe the steady weekly pattern; one-off and substitution
//! lectures are carried for completeness but ignored by load aggregation
//! and conflict detection.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// A lecture slot assigned to a teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lecture {
    pub teacher_id: String,
    pub day_of_week: Weekday,
    /// Teaching period within the day (1-based in most timetables).
    pub period: u8,
    pub academic_year: String,
    /// Weekly-repeating lecture. `false` = one-off or substitution.
    pub recurring: bool,
}

impl Lecture {
    /// Creates a recurring lecture.
    pub fn recurring(
        teacher_id: impl Into<String>,
        academic_year: impl Into<String>,
        day_of_week: Weekday,
        period: u8,
    ) -> Self {
        Self {
            teacher_id: teacher_id.into(),
            day_of_week,
            period,
            academic_year: academic_year.into(),
            recurring: true,
        }
    }

    /// Creates a one-off (non-recurring) lecture.
    pub fn one_off(
        teacher_id: impl Into<String>,
        academic_year: impl Into<String>,
        day_of_week: Weekday,
        period: u8,
    ) -> Self {
        Self {
            recurring: false,
            ..Self::recurring(teacher_id, academic_year, day_of_week, period)
        }
    }

    /// Whether this lecture contributes to load and conflicts for `academic_year`.
    #[inline]
    pub fn counts_for(&self, academic_year: &str) -> bool {
        self.recurring && self.academic_year == academic_year
    }
}
