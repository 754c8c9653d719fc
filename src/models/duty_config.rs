//! Per-year duty configuration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::DaySet;

/// Duty calendar settings for one academic year.
///
/// There is exactly one configuration per academic year; writing a new
/// one replaces the old.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyConfig {
    pub academic_year: String,
    /// Weekdays on which duties are rostered.
    pub working_days: DaySet,
    /// Anchor for week numbering when the term starts mid-week.
    pub week_start: Option<NaiveDate>,
}

impl DutyConfig {
    /// Creates a Monday–Friday configuration without a week anchor.
    pub fn new(academic_year: impl Into<String>) -> Self {
        Self {
            academic_year: academic_year.into(),
            working_days: DaySet::WEEKDAYS,
            week_start: None,
        }
    }

    /// Sets the working days.
    pub fn with_working_days(mut self, days: DaySet) -> Self {
        self.working_days = days;
        self
    }

    /// Sets the week-start anchor.
    pub fn with_week_start(mut self, date: NaiveDate) -> Self {
        self.week_start = Some(date);
        self
    }
}
