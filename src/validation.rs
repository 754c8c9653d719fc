//! Input validation for roster runs.
//!
//! Checks structural integrity of a snapshot before any assignment work.
//! Detects:
//! - Duplicate teacher and duty type IDs
//! - Duty types without slots or from another academic year
//! - Lectures referencing teachers outside the directory
//! - Profile exemptions naming duty types the year does not have
//!
//! Lecture and exemption inconsistencies are reported separately because
//! the engine skips them with a warning instead of aborting.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::models::{DutyType, RosterSnapshot};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A duty type needs zero teachers per occurrence.
    ZeroSlots,
    /// An entity belongs to a different academic year than the snapshot.
    WrongAcademicYear,
    /// A lecture references a teacher that isn't in the directory.
    UnknownTeacherReference,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a roster snapshot.
///
/// Checks:
/// 1. Configuration belongs to the snapshot's year
/// 2. No duplicate teacher IDs
/// 3. No duplicate duty type IDs
/// 4. Every duty type has at least one slot and belongs to the year
///
/// Lecture references and profile exemptions are not checked here; see
/// [`inconsistent_lectures`] and [`dangling_exemptions`].
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_snapshot(snapshot: &RosterSnapshot) -> ValidationResult {
    let mut errors = Vec::new();
    let year = snapshot.academic_year.as_str();

    if snapshot.config.academic_year != year {
        errors.push(ValidationError::new(
            ValidationErrorKind::WrongAcademicYear,
            format!(
                "Duty configuration is for '{}', expected '{}'",
                snapshot.config.academic_year, year
            ),
        ));
    }

    let mut teacher_ids = HashSet::new();
    for t in &snapshot.teachers {
        if !teacher_ids.insert(t.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate teacher ID: {}", t.id),
            ));
        }
    }

    let mut duty_ids = HashSet::new();
    for d in &snapshot.duty_types {
        if !duty_ids.insert(d.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate duty type ID: {}", d.id),
            ));
        }
        if d.slots == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroSlots,
                format!("Duty type '{}' has no slots", d.id),
            ));
        }
        if d.academic_year != year {
            errors.push(ValidationError::new(
                ValidationErrorKind::WrongAcademicYear,
                format!(
                    "Duty type '{}' belongs to '{}', expected '{}'",
                    d.id, d.academic_year, year
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Indices of the year's lectures whose teacher is not in the directory.
pub fn inconsistent_lectures(snapshot: &RosterSnapshot) -> Vec<usize> {
    let known: HashSet<&str> = snapshot.teachers.iter().map(|t| t.id.as_str()).collect();
    snapshot
        .lectures
        .iter()
        .enumerate()
        .filter(|(_, l)| {
            l.academic_year == snapshot.academic_year && !known.contains(l.teacher_id.as_str())
        })
        .map(|(i, _)| i)
        .collect()
}

/// `(teacher id, duty type id)` pairs where a profile of the year exempts
/// a duty type the snapshot does not contain.
///
/// Such an exemption has no effect on assignment.
pub fn dangling_exemptions(snapshot: &RosterSnapshot) -> Vec<(&str, &str)> {
    let known: HashSet<&str> = snapshot.duty_types.iter().map(|d| d.id.as_str()).collect();
    let mut dangling = Vec::new();
    for p in snapshot
        .profiles
        .iter()
        .filter(|p| p.academic_year == snapshot.academic_year)
    {
        for id in &p.exempt_duty_types {
            if !known.contains(id.as_str()) {
                dangling.push((p.teacher_id.as_str(), id.as_str()));
            }
        }
    }
    dangling
}

/// Order values shared by more than one duty type, ascending.
pub fn order_collisions(duty_types: &[DutyType]) -> Vec<i32> {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for d in duty_types {
        *counts.entry(d.order).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|&(_, n)| n > 1)
        .map(|(order, _)| order)
        .collect()
}
