//! Store contracts and an in-memory implementation.
//!
//! The roster core reads its inputs from a [`RosterSource`] and writes
//! generated assignments to an [`AssignmentSink`]. Real deployments back
//! these with the application's database; [`InMemoryStore`] implements
//! both with the same semantics:
//!
//! - one `DutyConfig` per academic year, replaced on upsert
//! - duty type ids and orders unique within a year
//! - at most one profile per (teacher, year), replaced on upsert
//! - generated assignments replaced atomically per date range

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use tracing::debug;

use crate::error::RosterError;
use crate::models::{
    DutyAssignment, DutyConfig, DutyType, Lecture, RosterSnapshot, Teacher, TeacherDutyProfile,
};

/// Read side: consistent inputs for one academic year.
pub trait RosterSource: Send + Sync {
    /// Captures everything a roster run needs for `academic_year`.
    ///
    /// # Errors
    /// `UnknownAcademicYear` when the year has no duty configuration.
    fn snapshot(&self, academic_year: &str) -> Result<RosterSnapshot, RosterError>;
}

/// Write side: generated assignments.
pub trait AssignmentSink: Send + Sync {
    /// Replaces every stored assignment of `academic_year` dated within
    /// `[from, to]` with `assignments`, as one atomic step.
    ///
    /// Returns the number of assignments removed.
    fn replace_assignments(
        &self,
        academic_year: &str,
        from: NaiveDate,
        to: NaiveDate,
        assignments: Vec<DutyAssignment>,
    ) -> Result<usize, RosterError>;

    /// Stored assignments of `academic_year` dated within `[from, to]`,
    /// ordered by date.
    fn assignments_in_range(
        &self,
        academic_year: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DutyAssignment>, RosterError>;
}

#[derive(Debug, Default)]
struct Tables {
    configs: HashMap<String, DutyConfig>,
    teachers: Vec<Teacher>,
    lectures: Vec<Lecture>,
    /// Insertion order is kept; it breaks order ties.
    duty_types: Vec<DutyType>,
    profiles: Vec<TeacherDutyProfile>,
    assignments: HashMap<String, Vec<DutyAssignment>>,
}

/// Thread-safe in-memory store.
///
/// All tables sit behind one lock, so a snapshot never mixes states.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts or replaces the configuration of its academic year.
    ///
    /// Returns the replaced configuration, if any.
    pub fn upsert_config(&self, config: DutyConfig) -> Option<DutyConfig> {
        self.write()
            .configs
            .insert(config.academic_year.clone(), config)
    }

    /// Configuration of an academic year.
    pub fn config(&self, academic_year: &str) -> Option<DutyConfig> {
        self.read().configs.get(academic_year).cloned()
    }

    /// Adds a teacher, replacing any entry with the same id.
    pub fn add_teacher(&self, teacher: Teacher) {
        let mut tables = self.write();
        match tables.teachers.iter_mut().find(|t| t.id == teacher.id) {
            Some(existing) => *existing = teacher,
            None => tables.teachers.push(teacher),
        }
    }

    pub fn add_lecture(&self, lecture: Lecture) {
        self.write().lectures.push(lecture);
    }

    /// Adds a duty type.
    ///
    /// # Errors
    /// - `DuplicateDutyType` if the id already exists in the year
    /// - `DuplicateDutyOrder` if another type of the year uses the order
    pub fn add_duty_type(&self, duty_type: DutyType) -> Result<(), RosterError> {
        let mut tables = self.write();
        let year_types = || {
            tables
                .duty_types
                .iter()
                .filter(|d| d.academic_year == duty_type.academic_year)
        };
        if year_types().any(|d| d.id == duty_type.id) {
            return Err(RosterError::DuplicateDutyType(duty_type.id));
        }
        if year_types().any(|d| d.order == duty_type.order) {
            return Err(RosterError::DuplicateDutyOrder {
                academic_year: duty_type.academic_year,
                order: duty_type.order,
            });
        }
        debug!(duty_type = %duty_type.id, order = duty_type.order, "duty type added");
        tables.duty_types.push(duty_type);
        Ok(())
    }

    /// Replaces an existing duty type in place.
    ///
    /// # Errors
    /// - `UnknownDutyType` if no type with that id exists in the year
    /// - `DuplicateDutyOrder` if another type of the year uses the new order
    pub fn update_duty_type(&self, duty_type: DutyType) -> Result<(), RosterError> {
        let mut tables = self.write();
        let same_year = |d: &DutyType| d.academic_year == duty_type.academic_year;

        if tables
            .duty_types
            .iter()
            .any(|d| same_year(d) && d.id != duty_type.id && d.order == duty_type.order)
        {
            return Err(RosterError::DuplicateDutyOrder {
                academic_year: duty_type.academic_year,
                order: duty_type.order,
            });
        }
        match tables
            .duty_types
            .iter_mut()
            .find(|d| same_year(d) && d.id == duty_type.id)
        {
            Some(existing) => {
                *existing = duty_type;
                Ok(())
            }
            None => Err(RosterError::UnknownDutyType(duty_type.id)),
        }
    }

    /// Duty types of a year, ordered by `order`.
    pub fn duty_types(&self, academic_year: &str) -> Vec<DutyType> {
        let mut types: Vec<DutyType> = self
            .read()
            .duty_types
            .iter()
            .filter(|d| d.academic_year == academic_year)
            .cloned()
            .collect();
        types.sort_by_key(|d| d.order);
        types
    }

    /// Inserts a profile, or replaces the teacher's profile for that year.
    ///
    /// Returns `true` if an existing profile was replaced.
    pub fn upsert_profile(&self, profile: TeacherDutyProfile) -> bool {
        let mut tables = self.write();
        let existing = tables.profiles.iter_mut().find(|p| {
            p.teacher_id == profile.teacher_id && p.academic_year == profile.academic_year
        });
        match existing {
            Some(p) => {
                *p = profile;
                true
            }
            None => {
                tables.profiles.push(profile);
                false
            }
        }
    }

    /// A teacher's stored profile for a year.
    pub fn profile(&self, teacher_id: &str, academic_year: &str) -> Option<TeacherDutyProfile> {
        self.read()
            .profiles
            .iter()
            .find(|p| p.teacher_id == teacher_id && p.academic_year == academic_year)
            .cloned()
    }
}

impl RosterSource for InMemoryStore {
    fn snapshot(&self, academic_year: &str) -> Result<RosterSnapshot, RosterError> {
        let tables = self.read();
        let config = tables
            .configs
            .get(academic_year)
            .cloned()
            .ok_or_else(|| RosterError::UnknownAcademicYear(academic_year.to_string()))?;

        let mut snapshot = RosterSnapshot::new(config)
            .with_teachers(tables.teachers.iter().cloned())
            .with_lectures(
                tables
                    .lectures
                    .iter()
                    .filter(|l| l.academic_year == academic_year)
                    .cloned(),
            );
        snapshot.duty_types = tables
            .duty_types
            .iter()
            .filter(|d| d.academic_year == academic_year)
            .cloned()
            .collect();
        snapshot.profiles = tables
            .profiles
            .iter()
            .filter(|p| p.academic_year == academic_year)
            .cloned()
            .collect();
        Ok(snapshot)
    }
}

impl AssignmentSink for InMemoryStore {
    fn replace_assignments(
        &self,
        academic_year: &str,
        from: NaiveDate,
        to: NaiveDate,
        assignments: Vec<DutyAssignment>,
    ) -> Result<usize, RosterError> {
        if from > to {
            return Err(RosterError::InvalidRange { from, to });
        }
        let mut tables = self.write();
        let stored = tables
            .assignments
            .entry(academic_year.to_string())
            .or_default();
        let before = stored.len();
        stored.retain(|a| a.date < from || a.date > to);
        let removed = before - stored.len();
        stored.extend(assignments);
        stored.sort_by_key(|a| a.date);
        debug!(academic_year, %from, %to, removed, stored = stored.len(), "assignments replaced");
        Ok(removed)
    }

    fn assignments_in_range(
        &self,
        academic_year: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DutyAssignment>, RosterError> {
        if from > to {
            return Err(RosterError::InvalidRange { from, to });
        }
        Ok(self
            .read()
            .assignments
            .get(academic_year)
            .map(|stored| {
                stored
                    .iter()
                    .filter(|a| a.date >= from && a.date <= to)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
