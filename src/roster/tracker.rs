//! Per-run burden accumulator.
//!
//! Tracks, for every teacher, what the current run has assigned so far:
//! weighted duty burden, duty count, duties per week and the windows
//! held on each date. One tracker belongs to exactly one run and is
//! threaded through the assignment loop by `&mut`.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::load::{load_of, TeachingLoad};
use crate::models::DutyWindow;

#[derive(Debug, Clone, Default)]
struct Tally {
    duty_burden: u32,
    duties: u32,
    per_week: HashMap<i32, u32>,
    windows: HashMap<NaiveDate, Vec<DutyWindow>>,
}

/// Running burden table for one roster run.
#[derive(Debug, Clone, Default)]
pub struct BurdenTracker {
    loads: TeachingLoad,
    tallies: HashMap<String, Tally>,
}

impl BurdenTracker {
    /// Starts a run with the given teaching loads as baseline.
    pub fn new(loads: TeachingLoad) -> Self {
        Self {
            loads,
            tallies: HashMap::new(),
        }
    }

    /// Teaching load of a teacher (0 if absent).
    pub fn teaching_load(&self, teacher_id: &str) -> u32 {
        load_of(&self.loads, teacher_id)
    }

    /// Burden score: teaching load + weighted duties assigned so far.
    pub fn burden(&self, teacher_id: &str) -> u32 {
        let duty = self.tallies.get(teacher_id).map_or(0, |t| t.duty_burden);
        self.teaching_load(teacher_id).saturating_add(duty)
    }

    /// Duties assigned so far in this run.
    pub fn duties(&self, teacher_id: &str) -> u32 {
        self.tallies.get(teacher_id).map_or(0, |t| t.duties)
    }

    /// Duties assigned so far in the given week.
    pub fn duties_in_week(&self, teacher_id: &str, week: i32) -> u32 {
        self.tallies
            .get(teacher_id)
            .and_then(|t| t.per_week.get(&week).copied())
            .unwrap_or(0)
    }

    /// Whether the teacher already holds a duty overlapping `window` on `date`.
    pub fn holds_overlapping(&self, teacher_id: &str, date: NaiveDate, window: &DutyWindow) -> bool {
        self.tallies
            .get(teacher_id)
            .and_then(|t| t.windows.get(&date))
            .is_some_and(|held| held.iter().any(|w| w.overlaps(window)))
    }

    /// Records an assignment.
    pub fn record(
        &mut self,
        teacher_id: &str,
        date: NaiveDate,
        week: i32,
        window: DutyWindow,
        weight: u32,
    ) {
        let tally = self.tallies.entry(teacher_id.to_string()).or_default();
        tally.duty_burden = tally.duty_burden.saturating_add(weight);
        tally.duties += 1;
        *tally.per_week.entry(week).or_insert(0) += 1;
        tally.windows.entry(date).or_default().push(window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, day).unwrap()
    }

    fn loads() -> TeachingLoad {
        let mut l = TeachingLoad::new();
        l.insert("T1".into(), 20);
        l.insert("T2".into(), 10);
        l
    }

    #[test]
    fn test_baseline_is_teaching_load() {
        let t = BurdenTracker::new(loads());
        assert_eq!(t.burden("T1"), 20);
        assert_eq!(t.burden("T3"), 0);
        assert_eq!(t.duties("T1"), 0);
    }

    #[test]
    fn test_record_accumulates() {
        let mut t = BurdenTracker::new(loads());
        t.record("T2", d(2), 1, DutyWindow::BeforeSchool, 2);
        t.record("T2", d(9), 2, DutyWindow::AfterSchool, 1);
        assert_eq!(t.burden("T2"), 13);
        assert_eq!(t.duties("T2"), 2);
        assert_eq!(t.duties_in_week("T2", 1), 1);
        assert_eq!(t.duties_in_week("T2", 2), 1);
        assert_eq!(t.duties_in_week("T2", 3), 0);
    }

    #[test]
    fn test_overlap_is_per_date() {
        let mut t = BurdenTracker::new(loads());
        t.record("T1", d(2), 1, DutyWindow::periods(3, 4), 1);
        assert!(t.holds_overlapping("T1", d(2), &DutyWindow::period(4)));
        assert!(!t.holds_overlapping("T1", d(2), &DutyWindow::period(5)));
        assert!(!t.holds_overlapping("T1", d(3), &DutyWindow::period(4)));
        assert!(!t.holds_overlapping("T2", d(2), &DutyWindow::period(4)));
    }
}
