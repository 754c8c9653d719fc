//! Post-hoc roster verification.
//!
//! Re-checks every assignment of a roster against the snapshot it was
//! generated from. Useful for rosters that were edited by hand after
//! generation; rosters produced by the engine always verify clean.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::calendar::WeekNumbering;
use crate::config::RosterOptions;
use crate::conflict::ConflictIndex;
use crate::models::{DutyAssignment, DutyWindow, Roster, RosterSnapshot, Violation, ViolationKind};
use crate::profile::ProfileResolver;

/// Lists every invariant the roster breaks.
///
/// Checks, per assignment:
/// 1. Teacher and duty type exist
/// 2. Teacher is not exempt and the weekday is eligible
/// 3. No recurring lecture overlaps the duty window
/// 4. No other duty of the teacher overlaps on the same date
///
/// and across the roster:
/// 5. Weekly caps hold
/// 6. No occurrence has more teachers than slots
pub fn verify(roster: &Roster, snapshot: &RosterSnapshot, options: &RosterOptions) -> Vec<Violation> {
    let year = snapshot.academic_year.as_str();
    let conflicts = ConflictIndex::build(&snapshot.lectures, year);
    let profiles = ProfileResolver::new(&snapshot.profiles, year, snapshot.config.working_days)
        .with_ceiling(options.max_duties_per_week_ceiling);
    let weeks = WeekNumbering::new(&snapshot.config, roster.from);

    let mut violations = Vec::new();
    let mut held: HashMap<(&str, NaiveDate), Vec<DutyWindow>> = HashMap::new();
    let mut per_week: HashMap<(&str, i32), u32> = HashMap::new();
    let mut per_occurrence: HashMap<(NaiveDate, &str), u32> = HashMap::new();

    for a in &roster.assignments {
        if snapshot.teacher(&a.teacher_id).is_none() {
            violations.push(Violation::new(
                ViolationKind::UnknownTeacher,
                a,
                format!("Teacher '{}' is not in the directory", a.teacher_id),
            ));
        }
        let Some(duty) = snapshot.duty_type(&a.duty_type_id) else {
            violations.push(Violation::new(
                ViolationKind::UnknownDutyType,
                a,
                format!("Duty type '{}' does not exist", a.duty_type_id),
            ));
            continue;
        };

        let profile = profiles.resolve(&a.teacher_id);
        let weekday = a.date.weekday();

        if profile.is_exempt(&duty.id) {
            violations.push(Violation::new(
                ViolationKind::Exempt,
                a,
                format!("'{}' is exempt from '{}'", a.teacher_id, duty.id),
            ));
        }
        if !profile.allows_day(weekday) {
            violations.push(Violation::new(
                ViolationKind::DayNotEligible,
                a,
                format!("'{}' is not eligible on {}", a.teacher_id, weekday),
            ));
        }
        if conflicts.conflicts(&a.teacher_id, weekday, &duty.window) {
            violations.push(Violation::new(
                ViolationKind::LectureConflict,
                a,
                format!("'{}' teaches during '{}' on {}", a.teacher_id, duty.id, weekday),
            ));
        }

        let windows = held.entry((a.teacher_id.as_str(), a.date)).or_default();
        if windows.iter().any(|w| w.overlaps(&duty.window)) {
            violations.push(Violation::new(
                ViolationKind::OverlappingDuty,
                a,
                format!("'{}' already holds an overlapping duty", a.teacher_id),
            ));
        }
        windows.push(duty.window);

        let count = per_week
            .entry((a.teacher_id.as_str(), weeks.week_of(a.date)))
            .or_insert(0);
        *count += 1;
        if !profile.has_weekly_capacity(*count - 1) {
            violations.push(weekly_cap_violation(a, *count));
        }

        let filled = per_occurrence
            .entry((a.date, a.duty_type_id.as_str()))
            .or_insert(0);
        *filled += 1;
        if *filled > duty.slots {
            violations.push(Violation::new(
                ViolationKind::SlotOverfilled,
                a,
                format!("'{}' has more than {} teacher(s)", duty.id, duty.slots),
            ));
        }
    }

    violations
}

fn weekly_cap_violation(a: &DutyAssignment, count: u32) -> Violation {
    Violation::new(
        ViolationKind::WeeklyCapExceeded,
        a,
        format!("'{}' holds {} duties this week", a.teacher_id, count),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DutyConfig, DutyType, Lecture, Teacher, TeacherDutyProfile};
    use crate::roster::RosterEngine;
    use chrono::Weekday;

    const YEAR: &str = "2024-2025";

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, day).unwrap()
    }

    fn snapshot() -> RosterSnapshot {
        RosterSnapshot::new(DutyConfig::new(YEAR))
            .with_teachers(["A", "B", "C"].map(Teacher::new))
            .with_lecture(Lecture::recurring("A", YEAR, Weekday::Mon, 2))
            .with_profile(
                TeacherDutyProfile::new("B", YEAR)
                    .with_exemption("exam")
                    .with_max_duties_per_week(1),
            )
            .with_duty_type(DutyType::new("gate", YEAR, 1))
            .with_duty_type(
                DutyType::new("exam", YEAR, 2).with_window(DutyWindow::periods(1, 3)),
            )
    }

    fn roster_with(assignments: Vec<DutyAssignment>) -> Roster {
        let mut roster = RosterEngine::new().generate(&snapshot(), d(2), d(6)).unwrap();
        roster.assignments = assignments;
        roster
    }

    fn kinds(violations: &[Violation]) -> Vec<ViolationKind> {
        violations.iter().map(|v| v.kind).collect()
    }

    #[test]
    fn test_generated_roster_is_clean() {
        let s = snapshot();
        let roster = RosterEngine::new().generate(&s, d(2), d(27)).unwrap();
        assert!(roster.assignment_count() > 0);
        assert!(verify(&roster, &s, &RosterOptions::default()).is_empty());
    }

    #[test]
    fn test_detects_exemption_and_conflict() {
        let roster = roster_with(vec![
            DutyAssignment::new(d(2), "exam", "B"),
            DutyAssignment::new(d(2), "gate", "C"),
            DutyAssignment::new(d(9), "exam", "A"),
        ]);
        let v = verify(&roster, &snapshot(), &RosterOptions::default());
        assert_eq!(
            kinds(&v),
            vec![ViolationKind::Exempt, ViolationKind::LectureConflict]
        );
    }

    #[test]
    fn test_detects_overlap_and_overfill() {
        let roster = roster_with(vec![
            DutyAssignment::new(d(3), "gate", "A"),
            DutyAssignment::new(d(3), "gate", "A").with_slot(1),
        ]);
        let v = verify(&roster, &snapshot(), &RosterOptions::default());
        assert_eq!(
            kinds(&v),
            vec![ViolationKind::OverlappingDuty, ViolationKind::SlotOverfilled]
        );
    }

    #[test]
    fn test_detects_weekly_cap() {
        let roster = roster_with(vec![
            DutyAssignment::new(d(2), "gate", "B"),
            DutyAssignment::new(d(3), "gate", "B"),
        ]);
        let v = verify(&roster, &snapshot(), &RosterOptions::default());
        assert_eq!(kinds(&v), vec![ViolationKind::WeeklyCapExceeded]);
        assert_eq!(v[0].date, d(3));
    }

    #[test]
    fn test_detects_unknown_references() {
        let roster = roster_with(vec![
            DutyAssignment::new(d(2), "gate", "GHOST"),
            DutyAssignment::new(d(2), "pool", "A"),
        ]);
        let v = verify(&roster, &snapshot(), &RosterOptions::default());
        assert_eq!(
            kinds(&v),
            vec![ViolationKind::UnknownTeacher, ViolationKind::UnknownDutyType]
        );
    }

    #[test]
    fn test_detects_ineligible_day() {
        let s = snapshot().with_profile(
            TeacherDutyProfile::new("C", YEAR)
                .with_eligible_days(crate::models::DaySet::new().with(Weekday::Fri)),
        );
        let mut roster = RosterEngine::new().generate(&s, d(2), d(2)).unwrap();
        roster.assignments = vec![DutyAssignment::new(d(2), "gate", "C")];
        let v = verify(&roster, &s, &RosterOptions::default());
        assert_eq!(kinds(&v), vec![ViolationKind::DayNotEligible]);
    }
}
