//! Lecture conflict index.
//!
//! Records, per teacher, every (weekday, period) occupied by a recurring
//! lecture. A period-aligned duty is rejected for a teacher when any of
//! its periods is occupied on that weekday. Off-grid duties (before
//! school, breaks, after school) never conflict.

use std::collections::{BTreeSet, HashMap};

use chrono::Weekday;

use crate::models::{DutyWindow, Lecture};

/// Per-teacher occupied lecture slots.
#[derive(Debug, Clone, Default)]
pub struct ConflictIndex {
    occupied: HashMap<String, BTreeSet<(u8, u8)>>,
}

impl ConflictIndex {
    /// Builds the index from the recurring lectures of `academic_year`.
    pub fn build<'a>(
        lectures: impl IntoIterator<Item = &'a Lecture>,
        academic_year: &str,
    ) -> Self {
        let mut occupied: HashMap<String, BTreeSet<(u8, u8)>> = HashMap::new();
        for lecture in lectures {
            if lecture.counts_for(academic_year) {
                occupied
                    .entry(lecture.teacher_id.clone())
                    .or_default()
                    .insert((day_key(lecture.day_of_week), lecture.period));
            }
        }
        Self { occupied }
    }

    /// Whether the teacher teaches `period` on `weekday`.
    pub fn is_occupied(&self, teacher_id: &str, weekday: Weekday, period: u8) -> bool {
        self.occupied
            .get(teacher_id)
            .is_some_and(|slots| slots.contains(&(day_key(weekday), period)))
    }

    /// Whether a duty in `window` on `weekday` clashes with the teacher's lectures.
    pub fn conflicts(&self, teacher_id: &str, weekday: Weekday, window: &DutyWindow) -> bool {
        let Some((first, last)) = window.period_bounds() else {
            return false;
        };
        let Some(slots) = self.occupied.get(teacher_id) else {
            return false;
        };
        let day = day_key(weekday);
        slots.range((day, first)..=(day, last)).next().is_some()
    }

    /// Occupied (weekday, period) pairs for a teacher, Monday first.
    pub fn occupied_slots(&self, teacher_id: &str) -> Vec<(Weekday, u8)> {
        self.occupied
            .get(teacher_id)
            .map(|slots| {
                slots
                    .iter()
                    .filter_map(|&(day, period)| {
                        Weekday::try_from(day).ok().map(|w| (w, period))
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of teachers with at least one occupied slot.
    pub fn teacher_count(&self) -> usize {
        self.occupied.len()
    }
}

/// Monday = 0 so that slots sort by weekday, then period.
#[inline]
fn day_key(weekday: Weekday) -> u8 {
    weekday.num_days_from_monday() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: &str = "2024-2025";

    fn index() -> ConflictIndex {
        let lectures = vec![
            Lecture::recurring("T1", YEAR, Weekday::Mon, 2),
            Lecture::recurring("T1", YEAR, Weekday::Mon, 5),
            Lecture::recurring("T1", YEAR, Weekday::Tue, 1),
            Lecture::one_off("T1", YEAR, Weekday::Wed, 3),
            Lecture::recurring("T2", "2023-2024", Weekday::Mon, 2),
        ];
        ConflictIndex::build(&lectures, YEAR)
    }

    #[test]
    fn test_single_period_conflict() {
        let idx = index();
        assert!(idx.conflicts("T1", Weekday::Mon, &DutyWindow::period(2)));
        assert!(!idx.conflicts("T1", Weekday::Mon, &DutyWindow::period(3)));
        assert!(!idx.conflicts("T1", Weekday::Wed, &DutyWindow::period(2)));
    }

    #[test]
    fn test_swapped_window_bounds() {
        let idx = index();
        let swapped = DutyWindow::Periods { first: 4, last: 2 };
        assert!(idx.conflicts("T1", Weekday::Mon, &swapped));
        assert!(!idx.conflicts("T1", Weekday::Tue, &swapped));
    }

    #[test]
    fn test_period_range_conflict() {
        let idx = index();
        assert!(idx.conflicts("T1", Weekday::Mon, &DutyWindow::periods(3, 5)));
        assert!(!idx.conflicts("T1", Weekday::Mon, &DutyWindow::periods(3, 4)));
        assert!(idx.conflicts("T1", Weekday::Tue, &DutyWindow::periods(1, 8)));
    }

    #[test]
    fn test_off_grid_never_conflicts() {
        let idx = index();
        assert!(!idx.conflicts("T1", Weekday::Mon, &DutyWindow::BeforeSchool));
        assert!(!idx.conflicts("T1", Weekday::Mon, &DutyWindow::Break { after_period: 2 }));
        assert!(!idx.conflicts("T1", Weekday::Mon, &DutyWindow::AfterSchool));
    }

    #[test]
    fn test_non_recurring_and_other_years_excluded() {
        let idx = index();
        assert!(!idx.is_occupied("T1", Weekday::Wed, 3));
        assert!(!idx.is_occupied("T2", Weekday::Mon, 2));
        assert_eq!(idx.teacher_count(), 1);
    }

    #[test]
    fn test_occupied_slots_ordered() {
        let idx = index();
        assert_eq!(
            idx.occupied_slots("T1"),
            vec![(Weekday::Mon, 2), (Weekday::Mon, 5), (Weekday::Tue, 1)]
        );
        assert!(idx.occupied_slots("T9").is_empty());
    }
}
