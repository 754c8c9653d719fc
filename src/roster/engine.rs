//! Greedy lowest-burden roster engine.
//!
//! # Algorithm
//!
//! 1. Resolve duty dates, teaching loads, lecture conflicts and profiles
//!    from the snapshot.
//! 2. Order duty types by `order` ascending (insertion order on ties).
//! 3. For each date (ascending), each duty type, each slot:
//!    filter eligible teachers, pick the one with the lowest
//!    `(burden, duties so far, teacher id)`, record it.
//! 4. Slots with no eligible teacher are reported as unfilled.
//!
//! A teacher is eligible when they are not exempt, the weekday is one of
//! their eligible days, they are under their weekly cap, no recurring
//! lecture overlaps the duty window, and they hold no overlapping duty
//! on the same date.
//!
//! The pass is single and non-backtracking. It does not minimize the
//! worst-case imbalance or the number of unfilled slots; it is fast,
//! reproducible, and every choice can be explained by the burden score
//! recorded with the assignment. An exact solver (min-cost matching per
//! duty type) would change the tie-break contract and belongs in a
//! separate mode.
//!
//! # Complexity
//! O(d * s * t) where d = duty dates, s = duty slots per day, t = teachers.

use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{debug, info, info_span, warn};

use super::tracker::BurdenTracker;
use crate::calendar::{resolve_dates, DutyDate};
use crate::config::RosterOptions;
use crate::conflict::ConflictIndex;
use crate::error::RosterError;
use crate::load::{aggregate_load, TeachingLoad};
use crate::models::{
    DutyAssignment, DutyType, RejectionCounts, Roster, RosterSnapshot, RunPhase, RunSummary,
    UnfilledSlot,
};
use crate::profile::{ProfileResolver, ResolvedProfile};
use crate::validation::{
    dangling_exemptions, inconsistent_lectures, order_collisions, validate_snapshot,
    ValidationError, ValidationErrorKind,
};

/// Deterministic duty roster generator.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use duty_roster::models::{DutyConfig, DutyType, RosterSnapshot, Teacher};
/// use duty_roster::roster::RosterEngine;
///
/// let year = "2024-2025";
/// let snapshot = RosterSnapshot::new(DutyConfig::new(year))
///     .with_teacher(Teacher::new("T1"))
///     .with_duty_type(DutyType::new("gate", year, 1));
///
/// let monday = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
/// let roster = RosterEngine::new().generate(&snapshot, monday, monday).unwrap();
/// assert_eq!(roster.assignment_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RosterEngine {
    options: RosterOptions,
}

/// Everything the assigning phase reads.
struct Resolved<'a> {
    dates: Vec<DutyDate>,
    duty_types: Vec<&'a DutyType>,
    /// Sorted by teacher id.
    candidates: Vec<Candidate<'a>>,
    conflicts: ConflictIndex,
    loads: TeachingLoad,
    skipped_lectures: usize,
}

struct Candidate<'a> {
    teacher_id: &'a str,
    profile: ResolvedProfile,
}

enum Selection<'a> {
    Chosen { teacher_id: &'a str, burden: u32 },
    Unfilled(RejectionCounts),
}

impl RosterEngine {
    /// Creates an engine with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine with the given options.
    pub fn with_options(options: RosterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RosterOptions {
        &self.options
    }

    /// Generates the roster for `[from, to]` from a snapshot.
    ///
    /// # Errors
    /// Fails only during initialization:
    /// - `InvalidRange` when `from > to`
    /// - `InvalidInput` when the snapshot fails validation
    ///
    /// Slots that cannot be filled are reported in the summary.
    pub fn generate(
        &self,
        snapshot: &RosterSnapshot,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Roster, RosterError> {
        let span = info_span!("roster_run", academic_year = %snapshot.academic_year);
        let _enter = span.enter();

        let mut phase = RunPhase::Initializing;
        let skipped = self.initialize(snapshot, from, to)?;

        advance(&mut phase, RunPhase::Resolving);
        let resolved = self.resolve(snapshot, from, to, &skipped)?;

        advance(&mut phase, RunPhase::Assigning);
        let (assignments, summary) = assign(resolved);

        advance(
            &mut phase,
            RunPhase::Completed {
                with_unfilled: !summary.is_complete(),
            },
        );
        info!(
            total = summary.total_slots,
            filled = summary.filled_slots,
            unfilled = summary.unfilled_slots.len(),
            "roster run completed"
        );

        Ok(Roster {
            academic_year: snapshot.academic_year.clone(),
            from,
            to,
            assignments,
            summary,
            phase,
        })
    }

    /// Validates the request. Returns the indices of lectures to skip.
    fn initialize(
        &self,
        snapshot: &RosterSnapshot,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<HashSet<usize>, RosterError> {
        if from > to {
            return Err(RosterError::InvalidRange { from, to });
        }
        validate_snapshot(snapshot).map_err(RosterError::InvalidInput)?;

        let inconsistent = inconsistent_lectures(snapshot);
        if !inconsistent.is_empty() && !self.options.skip_inconsistent_lectures {
            let errors = inconsistent
                .iter()
                .map(|&i| {
                    ValidationError::new(
                        ValidationErrorKind::UnknownTeacherReference,
                        format!(
                            "Lecture references unknown teacher '{}'",
                            snapshot.lectures[i].teacher_id
                        ),
                    )
                })
                .collect();
            return Err(RosterError::InvalidInput(errors));
        }
        for &i in &inconsistent {
            let lecture = &snapshot.lectures[i];
            warn!(
                teacher_id = %lecture.teacher_id,
                day = %lecture.day_of_week,
                period = lecture.period,
                "skipping lecture of unknown teacher"
            );
        }

        for (teacher_id, duty_type) in dangling_exemptions(snapshot) {
            warn!(teacher_id, duty_type, "profile exempts an unknown duty type; ignored");
        }

        for order in order_collisions(&snapshot.duty_types) {
            warn!(order, "duty types share an order; insertion order decides");
        }

        info!(%from, %to, "roster run initialized");
        Ok(inconsistent.into_iter().collect())
    }

    fn resolve<'a>(
        &self,
        snapshot: &'a RosterSnapshot,
        from: NaiveDate,
        to: NaiveDate,
        skipped: &HashSet<usize>,
    ) -> Result<Resolved<'a>, RosterError> {
        let year = snapshot.academic_year.as_str();
        let dates = resolve_dates(&snapshot.config, from, to)?;

        let lectures: Vec<_> = snapshot
            .lectures
            .iter()
            .enumerate()
            .filter(|(i, _)| !skipped.contains(i))
            .map(|(_, l)| l)
            .collect();
        let conflicts = ConflictIndex::build(lectures.iter().copied(), year);
        let loads = aggregate_load(lectures.iter().copied(), year);

        // Stable: equal orders keep insertion order.
        let mut duty_types: Vec<&DutyType> = snapshot.duty_types.iter().collect();
        duty_types.sort_by_key(|d| d.order);

        let profiles =
            ProfileResolver::new(&snapshot.profiles, year, snapshot.config.working_days)
                .with_ceiling(self.options.max_duties_per_week_ceiling);
        let mut candidates: Vec<Candidate<'a>> = snapshot
            .teachers
            .iter()
            .filter(|t| self.options.is_candidate_role(t.role))
            .map(|t| Candidate {
                teacher_id: t.id.as_str(),
                profile: profiles.resolve(&t.id),
            })
            .collect();
        candidates.sort_by(|a, b| a.teacher_id.cmp(b.teacher_id));

        debug!(
            dates = dates.len(),
            duty_types = duty_types.len(),
            candidates = candidates.len(),
            "resolved roster inputs"
        );

        Ok(Resolved {
            dates,
            duty_types,
            candidates,
            conflicts,
            loads,
            skipped_lectures: skipped.len(),
        })
    }
}

fn advance(phase: &mut RunPhase, next: RunPhase) {
    let current = *phase;
    debug!(from = ?current, to = ?next, "roster run phase");
    *phase = next;
}

/// Walks dates × duty types × slots. No I/O happens here.
fn assign(resolved: Resolved<'_>) -> (Vec<DutyAssignment>, RunSummary) {
    let Resolved {
        dates,
        duty_types,
        candidates,
        conflicts,
        loads,
        skipped_lectures,
    } = resolved;

    let mut tracker = BurdenTracker::new(loads);
    let mut assignments = Vec::new();
    let mut summary = RunSummary {
        skipped_lectures,
        ..Default::default()
    };

    for day in &dates {
        for duty in &duty_types {
            for slot in 0..duty.slots {
                summary.total_slots += 1;
                match select(&candidates, &conflicts, &tracker, day, duty) {
                    Selection::Chosen { teacher_id, burden } => {
                        debug!(
                            date = %day.date,
                            duty_type = %duty.id,
                            slot,
                            teacher_id,
                            burden,
                            "duty assigned"
                        );
                        tracker.record(teacher_id, day.date, day.week, duty.window, duty.weight);
                        assignments.push(
                            DutyAssignment::new(day.date, duty.id.as_str(), teacher_id)
                                .with_slot(slot)
                                .with_week(day.week)
                                .with_burden(burden),
                        );
                        summary.filled_slots += 1;
                    }
                    Selection::Unfilled(rejections) => {
                        warn!(
                            date = %day.date,
                            duty_type = %duty.id,
                            slot,
                            rejected = rejections.total(),
                            "no eligible teacher; slot left unfilled"
                        );
                        summary.unfilled_slots.push(UnfilledSlot {
                            date: day.date,
                            duty_type_id: duty.id.clone(),
                            slot,
                            rejections,
                        });
                    }
                }
            }
        }
    }

    (assignments, summary)
}

/// Picks the eligible candidate with the lowest `(burden, duties, id)`.
fn select<'a>(
    candidates: &[Candidate<'a>],
    conflicts: &ConflictIndex,
    tracker: &BurdenTracker,
    day: &DutyDate,
    duty: &DutyType,
) -> Selection<'a> {
    let mut rejections = RejectionCounts::default();
    let mut best: Option<(u32, u32, &'a str)> = None;

    for c in candidates {
        let id = c.teacher_id;
        if c.profile.is_exempt(&duty.id) {
            rejections.exempt += 1;
        } else if !c.profile.allows_day(day.weekday) {
            rejections.day_not_eligible += 1;
        } else if !c.profile.has_weekly_capacity(tracker.duties_in_week(id, day.week)) {
            rejections.weekly_cap += 1;
        } else if conflicts.conflicts(id, day.weekday, &duty.window) {
            rejections.lecture_conflict += 1;
        } else if tracker.holds_overlapping(id, day.date, &duty.window) {
            rejections.overlapping_duty += 1;
        } else {
            let key = (tracker.burden(id), tracker.duties(id), id);
            if best.map_or(true, |b| key < b) {
                best = Some(key);
            }
        }
    }

    match best {
        Some((burden, _, teacher_id)) => Selection::Chosen { teacher_id, burden },
        None => Selection::Unfilled(rejections),
    }
}
