//! Weekday sets.
//!
//! Working days, eligible days and lecture days are all subsets of the
//! seven weekdays. They are stored as a bitmask so that membership,
//! intersection and iteration order are cheap and deterministic.
//!
//! The external store encodes weekdays as ISO indices: 1 = Monday
//! through 7 = Sunday.

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr};

use crate::error::RosterError;

/// A set of weekdays.
///
/// Iteration always yields days Monday → Sunday.
///
/// Serialized as its bitmask (bit 0 = Monday). Masks with bit 7 set are
/// rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DaySet(u8);

const ORDERED: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

impl DaySet {
    pub const NONE: Self = DaySet(0);
    /// Monday through Friday.
    pub const WEEKDAYS: Self = DaySet(0b001_1111);
    pub const ALL: Self = DaySet(0b111_1111);

    /// Creates an empty set.
    pub fn new() -> Self {
        Self::NONE
    }

    /// Builds a set from chrono weekdays.
    pub fn from_weekdays(days: impl IntoIterator<Item = Weekday>) -> Self {
        days.into_iter().fold(Self::NONE, |set, day| set.with(day))
    }

    /// Builds a set from ISO weekday indices (1 = Monday ..= 7 = Sunday).
    ///
    /// # Errors
    /// `RosterError::InvalidWeekday` for any index outside `1..=7`.
    pub fn from_iso_days(days: &[u8]) -> Result<Self, RosterError> {
        let mut set = Self::NONE;
        for &n in days {
            set.insert(weekday_from_iso(n)?);
        }
        Ok(set)
    }

    /// Returns a copy with `day` added.
    pub fn with(mut self, day: Weekday) -> Self {
        self.insert(day);
        self
    }

    pub fn insert(&mut self, day: Weekday) {
        self.0 |= bit(day);
    }

    pub fn remove(&mut self, day: Weekday) {
        self.0 &= !bit(day);
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & bit(day) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Days present in both sets.
    pub fn intersection(self, other: Self) -> Self {
        self & other
    }

    /// Iterates members Monday → Sunday.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        ORDERED.into_iter().filter(move |&d| self.contains(d))
    }

    /// Members as ISO indices, ascending.
    pub fn iso_days(self) -> Vec<u8> {
        self.iter()
            .map(|d| d.number_from_monday() as u8)
            .collect()
    }
}

/// Converts an ISO weekday index (1 = Monday) to a chrono weekday.
pub fn weekday_from_iso(n: u8) -> Result<Weekday, RosterError> {
    match n {
        1..=7 => Ok(ORDERED[usize::from(n - 1)]),
        _ => Err(RosterError::InvalidWeekday(n)),
    }
}

#[inline]
fn bit(day: Weekday) -> u8 {
    1 << day.num_days_from_monday()
}

impl BitAnd for DaySet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        DaySet(self.0 & rhs.0)
    }
}

impl BitOr for DaySet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        DaySet(self.0 | rhs.0)
    }
}

impl FromIterator<Weekday> for DaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        Self::from_weekdays(iter)
    }
}

impl TryFrom<u8> for DaySet {
    type Error = RosterError;

    fn try_from(mask: u8) -> Result<Self, Self::Error> {
        if mask & !Self::ALL.0 != 0 {
            return Err(RosterError::InvalidDayMask(mask));
        }
        Ok(DaySet(mask))
    }
}

impl From<DaySet> for u8 {
    fn from(set: DaySet) -> u8 {
        set.0
    }
}

impl fmt::Display for DaySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.iter().map(|d| d.to_string()).collect();
        write!(f, "{{{}}}", names.join(","))
    }
}
