//! Roster fairness metrics (KPIs).
//!
//! Computes how evenly a roster spreads duty burden over the candidate
//! teachers, on top of their teaching load.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Fill Rate | filled slots / total slots |
//! | Duties | duty count per teacher |
//! | Duty Burden | sum of duty weights per teacher |
//! | Final Burden | teaching load + duty burden |
//! | Burden Spread | max final burden − min final burden |

use std::collections::BTreeMap;

use crate::config::RosterOptions;
use crate::load::{aggregate_load, load_of};
use crate::models::{Roster, RosterSnapshot};

/// Roster fairness indicators.
#[derive(Debug, Clone)]
pub struct RosterKpi {
    /// Fraction of slots filled (0.0..1.0). 1.0 when there were no slots.
    pub fill_rate: f64,
    /// Duty count per candidate teacher.
    pub duties_by_teacher: BTreeMap<String, u32>,
    /// Weighted duty burden per candidate teacher.
    pub duty_burden_by_teacher: BTreeMap<String, u32>,
    /// Teaching load + duty burden per candidate teacher.
    pub final_burden_by_teacher: BTreeMap<String, u32>,
    pub min_burden: u32,
    pub max_burden: u32,
}

impl RosterKpi {
    /// Computes KPIs for a roster generated from `snapshot` with `options`.
    ///
    /// Every candidate teacher is listed, including those with no duties.
    pub fn calculate(roster: &Roster, snapshot: &RosterSnapshot, options: &RosterOptions) -> Self {
        let loads = aggregate_load(&snapshot.lectures, &snapshot.academic_year);

        let mut duties_by_teacher = BTreeMap::new();
        let mut duty_burden_by_teacher = BTreeMap::new();
        for t in snapshot
            .teachers
            .iter()
            .filter(|t| options.is_candidate_role(t.role))
        {
            duties_by_teacher.insert(t.id.clone(), 0u32);
            duty_burden_by_teacher.insert(t.id.clone(), 0u32);
        }

        for a in &roster.assignments {
            let weight = snapshot
                .duty_type(&a.duty_type_id)
                .map_or(0, |d| d.weight);
            let duties = duties_by_teacher.entry(a.teacher_id.clone()).or_insert(0);
            *duties = duties.saturating_add(1);
            let burden = duty_burden_by_teacher
                .entry(a.teacher_id.clone())
                .or_insert(0);
            *burden = burden.saturating_add(weight);
        }

        let final_burden_by_teacher: BTreeMap<String, u32> = duty_burden_by_teacher
            .iter()
            .map(|(id, &duty)| (id.clone(), load_of(&loads, id).saturating_add(duty)))
            .collect();

        let min_burden = final_burden_by_teacher.values().copied().min().unwrap_or(0);
        let max_burden = final_burden_by_teacher.values().copied().max().unwrap_or(0);

        let total = roster.summary.total_slots;
        let fill_rate = if total == 0 {
            1.0
        } else {
            roster.summary.filled_slots as f64 / total as f64
        };

        Self {
            fill_rate,
            duties_by_teacher,
            duty_burden_by_teacher,
            final_burden_by_teacher,
            min_burden,
            max_burden,
        }
    }

    /// Gap between the most and least burdened teacher.
    pub fn burden_spread(&self) -> u32 {
        self.max_burden - self.min_burden
    }

    /// Whether the roster meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_fill_rate: f64, max_spread: u32) -> bool {
        self.fill_rate >= min_fill_rate && self.burden_spread() <= max_spread
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DutyConfig, DutyType, DutyWindow, Lecture, Teacher, TeacherRole};
    use crate::roster::RosterEngine;
    use chrono::{NaiveDate, Weekday};

    const YEAR: &str = "2024-2025";

    fn snapshot() -> RosterSnapshot {
        RosterSnapshot::new(DutyConfig::new(YEAR))
            .with_teachers(["A", "B", "C"].map(Teacher::new))
            .with_teacher(Teacher::new("P").with_role(TeacherRole::Administrator))
            .with_lecture(Lecture::recurring("A", YEAR, Weekday::Mon, 1))
            .with_lecture(Lecture::recurring("A", YEAR, Weekday::Tue, 1))
            .with_duty_type(DutyType::new("gate", YEAR, 1).with_weight(2))
            .with_duty_type(DutyType::new("bus", YEAR, 2).with_window(DutyWindow::AfterSchool))
    }

    #[test]
    fn test_kpi_basic() {
        let s = snapshot();
        let day = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        let roster = RosterEngine::new().generate(&s, day, day).unwrap();
        let kpi = RosterKpi::calculate(&roster, &s, &RosterOptions::default());

        // gate → B (0), bus → C (0)
        assert!((kpi.fill_rate - 1.0).abs() < 1e-10);
        assert_eq!(kpi.duties_by_teacher["A"], 0);
        assert_eq!(kpi.duties_by_teacher["B"], 1);
        assert_eq!(kpi.duty_burden_by_teacher["B"], 2);
        assert_eq!(kpi.final_burden_by_teacher["A"], 2);
        assert_eq!(kpi.final_burden_by_teacher["C"], 1);
        assert!(!kpi.duties_by_teacher.contains_key("P"));
        assert_eq!(kpi.min_burden, 1);
        assert_eq!(kpi.max_burden, 2);
        assert_eq!(kpi.burden_spread(), 1);
    }

    #[test]
    fn test_kpi_partial_fill() {
        let s = snapshot().with_duty_type(DutyType::new("exam", YEAR, 3).with_slots(5));
        let day = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        let roster = RosterEngine::new().generate(&s, day, day).unwrap();
        let kpi = RosterKpi::calculate(&roster, &s, &RosterOptions::default());
        // B already holds gate (before school): exam goes to C then A, 4 of 7 filled
        assert_eq!(roster.summary.total_slots, 7);
        assert_eq!(roster.teacher_for(day, "exam", 0), Some("C"));
        assert_eq!(roster.teacher_for(day, "exam", 1), Some("A"));
        assert!((kpi.fill_rate - 4.0 / 7.0).abs() < 1e-10);
        assert!(!kpi.meets_thresholds(0.9, 10));
        assert!(kpi.meets_thresholds(0.4, 10));
    }

    #[test]
    fn test_kpi_saturates_heavy_weights() {
        let s = RosterSnapshot::new(DutyConfig::new(YEAR))
            .with_teacher(Teacher::new("A"))
            .with_lecture(Lecture::recurring("A", YEAR, Weekday::Mon, 1))
            .with_duty_type(DutyType::new("gate", YEAR, 1).with_weight(u32::MAX));
        let from = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 9, 3).unwrap();
        let roster = RosterEngine::new().generate(&s, from, to).unwrap();
        let kpi = RosterKpi::calculate(&roster, &s, &RosterOptions::default());
        assert_eq!(kpi.duties_by_teacher["A"], 2);
        assert_eq!(kpi.duty_burden_by_teacher["A"], u32::MAX);
        assert_eq!(kpi.final_burden_by_teacher["A"], u32::MAX);
        assert_eq!(kpi.burden_spread(), 0);
    }

    #[test]
    fn test_kpi_empty() {
        let s = snapshot();
        let sat = NaiveDate::from_ymd_opt(2024, 9, 7).unwrap();
        let roster = RosterEngine::new().generate(&s, sat, sat).unwrap();
        let kpi = RosterKpi::calculate(&roster, &s, &RosterOptions::default());
        assert!((kpi.fill_rate - 1.0).abs() < 1e-10);
        assert_eq!(kpi.burden_spread(), 2);
    }
}
