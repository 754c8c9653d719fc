//! Duty profile resolution.
//!
//! Merges a teacher's stored profile with the year defaults. Resolution
//! is total: every teacher gets a profile, whether or not one is stored.
//!
//! # Defaults
//! | Field | Default |
//! |-------|---------|
//! | weekly cap | unrestricted, bounded by the configured ceiling |
//! | exemptions | none |
//! | eligible days | all working days |

use std::collections::hash_map::Entry;
use std::collections::{BTreeSet, HashMap};

use chrono::Weekday;
use tracing::warn;

use crate::models::{DaySet, TeacherDutyProfile};

/// Effective duty constraints for one teacher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProfile {
    /// Effective weekly cap. `None` = unbounded.
    pub max_duties_per_week: Option<u32>,
    pub exempt_duty_types: BTreeSet<String>,
    /// Eligible days, always a subset of the working days.
    pub eligible_days: DaySet,
}

impl ResolvedProfile {
    pub fn is_exempt(&self, duty_type_id: &str) -> bool {
        self.exempt_duty_types.contains(duty_type_id)
    }

    pub fn allows_day(&self, weekday: Weekday) -> bool {
        self.eligible_days.contains(weekday)
    }

    /// Whether one more duty fits under the weekly cap.
    pub fn has_weekly_capacity(&self, assigned_this_week: u32) -> bool {
        self.max_duties_per_week
            .map_or(true, |cap| assigned_this_week < cap)
    }
}

/// Resolves profiles for one academic year.
#[derive(Debug, Clone)]
pub struct ProfileResolver {
    profiles: HashMap<String, TeacherDutyProfile>,
    working_days: DaySet,
    ceiling: Option<u32>,
}

impl ProfileResolver {
    /// Creates a resolver over the year's stored profiles.
    ///
    /// Profiles of other years are ignored. If a teacher has several
    /// profiles, the first one wins and the rest are logged and dropped.
    pub fn new<'a>(
        profiles: impl IntoIterator<Item = &'a TeacherDutyProfile>,
        academic_year: &str,
        working_days: DaySet,
    ) -> Self {
        let mut by_teacher = HashMap::new();
        for p in profiles.into_iter().filter(|p| p.academic_year == academic_year) {
            match by_teacher.entry(p.teacher_id.clone()) {
                Entry::Vacant(slot) => {
                    slot.insert(p.clone());
                }
                Entry::Occupied(_) => {
                    warn!(teacher_id = %p.teacher_id, "duplicate duty profile ignored");
                }
            }
        }
        Self {
            profiles: by_teacher,
            working_days,
            ceiling: None,
        }
    }

    /// Sets the operational weekly ceiling applied to every teacher.
    pub fn with_ceiling(mut self, ceiling: Option<u32>) -> Self {
        self.ceiling = ceiling;
        self
    }

    /// Resolves the effective profile of a teacher. Never fails.
    pub fn resolve(&self, teacher_id: &str) -> ResolvedProfile {
        match self.profiles.get(teacher_id) {
            Some(p) => ResolvedProfile {
                max_duties_per_week: min_cap(p.max_duties_per_week, self.ceiling),
                exempt_duty_types: p.exempt_duty_types.clone(),
                eligible_days: p
                    .eligible_days
                    .map_or(self.working_days, |days| days & self.working_days),
            },
            None => self.default_profile(),
        }
    }

    /// The profile of a teacher with nothing stored.
    pub fn default_profile(&self) -> ResolvedProfile {
        ResolvedProfile {
            max_duties_per_week: self.ceiling,
            exempt_duty_types: BTreeSet::new(),
            eligible_days: self.working_days,
        }
    }

    /// Whether a stored profile exists for the teacher.
    pub fn has_profile(&self, teacher_id: &str) -> bool {
        self.profiles.contains_key(teacher_id)
    }
}

fn min_cap(a: Option<u32>, b: Option<u32>) -> Option<u32> {
    match (a, b) {
        (Some(x), Some(y)) => Some(x.min(y)),
        (x, None) => x,
        (None, y) => y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: &str = "2024-2025";

    fn profiles() -> Vec<TeacherDutyProfile> {
        vec![
            TeacherDutyProfile::new("T1", YEAR)
                .with_max_duties_per_week(2)
                .with_exemption("exam")
                .with_eligible_days(DaySet::from_weekdays([Weekday::Mon, Weekday::Sat])),
            TeacherDutyProfile::new("T2", YEAR).with_max_duties_per_week(5),
            TeacherDutyProfile::new("T3", "2023-2024").with_exemption("gate"),
        ]
    }

    #[test]
    fn test_default_profile() {
        let r = ProfileResolver::new(&profiles(), YEAR, DaySet::WEEKDAYS);
        let p = r.resolve("T9");
        assert_eq!(p.max_duties_per_week, None);
        assert!(p.exempt_duty_types.is_empty());
        assert_eq!(p.eligible_days, DaySet::WEEKDAYS);
        assert!(p.has_weekly_capacity(u32::MAX - 1));
    }

    #[test]
    fn test_stored_profile() {
        let r = ProfileResolver::new(&profiles(), YEAR, DaySet::WEEKDAYS);
        let p = r.resolve("T1");
        assert_eq!(p.max_duties_per_week, Some(2));
        assert!(p.is_exempt("exam"));
        assert!(!p.is_exempt("gate"));
        // Saturday is not a working day
        assert_eq!(p.eligible_days, DaySet::new().with(Weekday::Mon));
        assert!(p.allows_day(Weekday::Mon));
        assert!(!p.allows_day(Weekday::Tue));
        assert!(p.has_weekly_capacity(1));
        assert!(!p.has_weekly_capacity(2));
    }

    #[test]
    fn test_other_year_ignored() {
        let r = ProfileResolver::new(&profiles(), YEAR, DaySet::WEEKDAYS);
        assert!(!r.has_profile("T3"));
        assert!(!r.resolve("T3").is_exempt("gate"));
    }

    #[test]
    fn test_ceiling() {
        let r = ProfileResolver::new(&profiles(), YEAR, DaySet::WEEKDAYS).with_ceiling(Some(3));
        assert_eq!(r.resolve("T9").max_duties_per_week, Some(3));
        assert_eq!(r.resolve("T1").max_duties_per_week, Some(2));
        assert_eq!(r.resolve("T2").max_duties_per_week, Some(3));
    }

    #[test]
    fn test_first_profile_wins() {
        let mut ps = profiles();
        ps.push(TeacherDutyProfile::new("T1", YEAR));
        let r = ProfileResolver::new(&ps, YEAR, DaySet::WEEKDAYS);
        assert_eq!(r.resolve("T1").max_duties_per_week, Some(2));
    }
}
