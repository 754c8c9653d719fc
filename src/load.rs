//! Teaching load aggregation.
//!
//! A teacher's load is the number of recurring lecture periods they teach
//! per week. It is the fairness baseline of the burden score.
//!
//! The result is sparse: teachers without recurring lectures have no
//! entry. Use [`load_of`] to read it with the zero default.

use std::collections::BTreeMap;

use crate::models::Lecture;

/// Teacher id → recurring periods per week.
pub type TeachingLoad = BTreeMap<String, u32>;

/// Counts recurring lectures per teacher for `academic_year`.
///
/// Non-recurring lectures and lectures of other years are ignored.
pub fn aggregate_load<'a>(
    lectures: impl IntoIterator<Item = &'a Lecture>,
    academic_year: &str,
) -> TeachingLoad {
    let mut load = TeachingLoad::new();
    for lecture in lectures {
        if lecture.counts_for(academic_year) {
            *load.entry(lecture.teacher_id.clone()).or_insert(0) += 1;
        }
    }
    load
}

/// Load of a teacher, treating a missing entry as zero.
#[inline]
pub fn load_of(load: &TeachingLoad, teacher_id: &str) -> u32 {
    load.get(teacher_id).copied().unwrap_or(0)
}
