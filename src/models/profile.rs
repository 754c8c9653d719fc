//! Per-teacher duty overrides.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::DaySet;

/// Stored duty preferences for one teacher in one academic year.
///
/// Every field is optional; missing values fall back to defaults when
/// the profile is resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherDutyProfile {
    pub teacher_id: String,
    pub academic_year: String,
    /// Weekly assignment cap. `None` = unrestricted.
    pub max_duties_per_week: Option<u32>,
    /// Duty type ids this teacher must never receive.
    pub exempt_duty_types: BTreeSet<String>,
    /// Restriction to a subset of working days. `None` = all working days.
    pub eligible_days: Option<DaySet>,
}

impl TeacherDutyProfile {
    /// Creates an empty profile (equivalent to the defaults).
    pub fn new(teacher_id: impl Into<String>, academic_year: impl Into<String>) -> Self {
        Self {
            teacher_id: teacher_id.into(),
            academic_year: academic_year.into(),
            max_duties_per_week: None,
            exempt_duty_types: BTreeSet::new(),
            eligible_days: None,
        }
    }

    /// Caps weekly assignments.
    pub fn with_max_duties_per_week(mut self, max: u32) -> Self {
        self.max_duties_per_week = Some(max);
        self
    }

    /// Exempts the teacher from a duty type.
    pub fn with_exemption(mut self, duty_type_id: impl Into<String>) -> Self {
        self.exempt_duty_types.insert(duty_type_id.into());
        self
    }

    /// Restricts duties to the given days.
    pub fn with_eligible_days(mut self, days: DaySet) -> Self {
        self.eligible_days = Some(days);
        self
    }
}
