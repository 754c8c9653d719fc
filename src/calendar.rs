//! Calendar resolution.
//!
//! Turns a duty configuration and a date range into the concrete,
//! ascending sequence of duty dates. Each date carries a week number
//! used for weekly-cap accounting.
//!
//! # Week Numbering
//! - With a `week_start` anchor: the first working day on/after the anchor
//!   opens week 1; weeks are consecutive 7-day blocks from that day.
//!   Dates before it get week 0, -1, ...
//! - Without an anchor: weeks run Monday–Sunday and the week containing
//!   the start of the range is week 1.
//!
//! Week numbers never affect which dates are produced.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::RosterError;
use crate::models::DutyConfig;

/// A working day on which duties are rostered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyDate {
    pub date: NaiveDate,
    pub weekday: Weekday,
    /// Week number for weekly-cap accounting.
    pub week: i32,
}

/// Maps dates to week numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekNumbering {
    /// First day of week 1.
    anchor: NaiveDate,
}

impl WeekNumbering {
    /// Week numbering for a run over a range starting at `from`.
    pub fn new(config: &DutyConfig, from: NaiveDate) -> Self {
        let anchor = match config.week_start {
            Some(start) => first_working_day_from(config, start),
            None => monday_of(from),
        };
        Self { anchor }
    }

    /// The first day of week 1.
    pub fn anchor(&self) -> NaiveDate {
        self.anchor
    }

    /// Week number of `date`.
    pub fn week_of(&self, date: NaiveDate) -> i32 {
        let days = (date - self.anchor).num_days();
        (days.div_euclid(7) + 1) as i32
    }
}

/// Resolves the duty dates in `[from, to]`.
///
/// # Errors
/// `RosterError::InvalidRange` when `from > to`.
pub fn resolve_dates(
    config: &DutyConfig,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DutyDate>, RosterError> {
    if from > to {
        return Err(RosterError::InvalidRange { from, to });
    }
    if config.working_days.is_empty() {
        return Ok(Vec::new());
    }

    let weeks = WeekNumbering::new(config, from);
    let dates = from
        .iter_days()
        .take_while(|d| *d <= to)
        .filter(|d| config.working_days.contains(d.weekday()))
        .map(|date| DutyDate {
            date,
            weekday: date.weekday(),
            week: weeks.week_of(date),
        })
        .collect();

    Ok(dates)
}

/// First working day on or after `start`; `start` itself if none within a week.
fn first_working_day_from(config: &DutyConfig, start: NaiveDate) -> NaiveDate {
    start
        .iter_days()
        .take(7)
        .find(|d| config.working_days.contains(d.weekday()))
        .unwrap_or(start)
}

fn monday_of(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DaySet;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_weekdays_only() {
        // 2024-09-02 is a Monday
        let cfg = DutyConfig::new("2024-2025");
        let dates = resolve_dates(&cfg, d(2024, 9, 2), d(2024, 9, 15)).unwrap();
        assert_eq!(dates.len(), 10);
        assert!(dates
            .iter()
            .all(|dd| dd.weekday != Weekday::Sat && dd.weekday != Weekday::Sun));
        assert!(dates.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_invalid_range() {
        let cfg = DutyConfig::new("2024-2025");
        let err = resolve_dates(&cfg, d(2024, 9, 5), d(2024, 9, 4)).unwrap_err();
        assert!(matches!(err, RosterError::InvalidRange { .. }));
    }

    #[test]
    fn test_single_day_range() {
        let cfg = DutyConfig::new("2024-2025");
        let dates = resolve_dates(&cfg, d(2024, 9, 4), d(2024, 9, 4)).unwrap();
        assert_eq!(dates.len(), 1);
        assert_eq!(dates[0].weekday, Weekday::Wed);
        assert_eq!(dates[0].week, 1);

        // Saturday only → nothing
        let none = resolve_dates(&cfg, d(2024, 9, 7), d(2024, 9, 7)).unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_custom_working_days() {
        let cfg = DutyConfig::new("2024-2025")
            .with_working_days(DaySet::from_iso_days(&[1, 3, 6]).unwrap());
        let dates = resolve_dates(&cfg, d(2024, 9, 2), d(2024, 9, 8)).unwrap();
        let days: Vec<Weekday> = dates.iter().map(|dd| dd.weekday).collect();
        assert_eq!(days, vec![Weekday::Mon, Weekday::Wed, Weekday::Sat]);
    }

    #[test]
    fn test_empty_working_days() {
        let cfg = DutyConfig::new("2024-2025").with_working_days(DaySet::NONE);
        let dates = resolve_dates(&cfg, d(2024, 9, 2), d(2025, 6, 30)).unwrap();
        assert!(dates.is_empty());
    }

    #[test]
    fn test_monday_aligned_weeks() {
        // Range starts on a Wednesday; the following Monday opens week 2.
        let cfg = DutyConfig::new("2024-2025");
        let dates = resolve_dates(&cfg, d(2024, 9, 4), d(2024, 9, 10)).unwrap();
        let weeks: Vec<i32> = dates.iter().map(|dd| dd.week).collect();
        // Wed, Thu, Fri | Mon, Tue
        assert_eq!(weeks, vec![1, 1, 1, 2, 2]);
    }

    #[test]
    fn test_anchored_weeks_mid_week_start() {
        // Term starts Wednesday 2024-09-04: weeks run Wed → Tue.
        let cfg = DutyConfig::new("2024-2025").with_week_start(d(2024, 9, 4));
        let dates = resolve_dates(&cfg, d(2024, 9, 4), d(2024, 9, 11)).unwrap();
        let weeks: Vec<(u32, i32)> = dates.iter().map(|dd| (dd.date.day(), dd.week)).collect();
        assert_eq!(
            weeks,
            vec![(4, 1), (5, 1), (6, 1), (9, 1), (10, 1), (11, 2)]
        );
    }

    #[test]
    fn test_anchor_on_weekend_moves_to_working_day() {
        // Anchor Saturday 2024-09-07 → week 1 opens Monday 2024-09-09.
        let cfg = DutyConfig::new("2024-2025").with_week_start(d(2024, 9, 7));
        let weeks = WeekNumbering::new(&cfg, d(2024, 9, 2));
        assert_eq!(weeks.anchor(), d(2024, 9, 9));
        assert_eq!(weeks.week_of(d(2024, 9, 9)), 1);
        assert_eq!(weeks.week_of(d(2024, 9, 6)), 0);
        assert_eq!(weeks.week_of(d(2024, 9, 16)), 2);
    }

    #[test]
    fn test_anchor_does_not_change_membership() {
        let plain = DutyConfig::new("2024-2025");
        let anchored = plain.clone().with_week_start(d(2024, 9, 4));
        let a = resolve_dates(&plain, d(2024, 9, 2), d(2024, 9, 30)).unwrap();
        let b = resolve_dates(&anchored, d(2024, 9, 2), d(2024, 9, 30)).unwrap();
        let da: Vec<NaiveDate> = a.iter().map(|x| x.date).collect();
        let db: Vec<NaiveDate> = b.iter().map(|x| x.date).collect();
        assert_eq!(da, db);
    }
}
