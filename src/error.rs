//! Error taxonomy.
//!
//! Only configuration problems are errors. A slot no teacher can take is
//! a normal outcome and is reported in the run summary instead.

use chrono::NaiveDate;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RosterError {
    #[error("invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },

    #[error("unknown academic year: no duty configuration for {0}")]
    UnknownAcademicYear(String),

    #[error("invalid weekday index {0}: expected 1 (Monday) ..= 7 (Sunday)")]
    InvalidWeekday(u8),

    #[error("invalid weekday mask {0:#04x}: only bits 0 (Monday) ..= 6 (Sunday) may be set")]
    InvalidDayMask(u8),

    #[error("duty order {order} is already used in academic year {academic_year}")]
    DuplicateDutyOrder { academic_year: String, order: i32 },

    #[error("duty type already exists: {0}")]
    DuplicateDutyType(String),

    #[error("unknown duty type: {0}")]
    UnknownDutyType(String),

    #[error("invalid roster input ({} problem(s)): {}", .0.len(), summarize(.0))]
    InvalidInput(Vec<ValidationError>),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_display_invalid_range() {
        let err = RosterError::InvalidRange {
            from: NaiveDate::from_ymd_opt(2024, 9, 10).unwrap(),
            to: NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "invalid date range: 2024-09-10 is after 2024-09-01"
        );
    }

    #[test]
    fn test_display_invalid_input() {
        let err = RosterError::InvalidInput(vec![
            ValidationError::new(ValidationErrorKind::DuplicateId, "Duplicate teacher ID: T1"),
            ValidationError::new(ValidationErrorKind::ZeroSlots, "Duty type 'gate' has no slots"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid roster input (2 problem(s)): Duplicate teacher ID: T1; Duty type 'gate' has no slots"
        );
    }
}
