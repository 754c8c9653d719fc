//! Input snapshot for one roster run.

use serde::{Deserialize, Serialize};

use super::{DutyConfig, DutyType, Lecture, Teacher, TeacherDutyProfile};

/// Everything a roster run reads, captured once.
///
/// A run never reads the store again after taking the snapshot, so
/// concurrent edits cannot skew a run halfway through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterSnapshot {
    pub academic_year: String,
    pub config: DutyConfig,
    /// Teacher directory.
    pub teachers: Vec<Teacher>,
    pub lectures: Vec<Lecture>,
    /// Duty types in insertion order.
    pub duty_types: Vec<DutyType>,
    pub profiles: Vec<TeacherDutyProfile>,
}

impl RosterSnapshot {
    /// Creates a snapshot around a configuration.
    pub fn new(config: DutyConfig) -> Self {
        Self {
            academic_year: config.academic_year.clone(),
            config,
            teachers: Vec::new(),
            lectures: Vec::new(),
            duty_types: Vec::new(),
            profiles: Vec::new(),
        }
    }

    /// Adds a teacher.
    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    /// Adds several teachers.
    pub fn with_teachers(mut self, teachers: impl IntoIterator<Item = Teacher>) -> Self {
        self.teachers.extend(teachers);
        self
    }

    /// Adds a lecture.
    pub fn with_lecture(mut self, lecture: Lecture) -> Self {
        self.lectures.push(lecture);
        self
    }

    /// Adds several lectures.
    pub fn with_lectures(mut self, lectures: impl IntoIterator<Item = Lecture>) -> Self {
        self.lectures.extend(lectures);
        self
    }

    /// Adds a duty type.
    pub fn with_duty_type(mut self, duty_type: DutyType) -> Self {
        self.duty_types.push(duty_type);
        self
    }

    /// Adds a teacher profile.
    pub fn with_profile(mut self, profile: TeacherDutyProfile) -> Self {
        self.profiles.push(profile);
        self
    }

    /// Looks up a duty type by id.
    pub fn duty_type(&self, id: &str) -> Option<&DutyType> {
        self.duty_types.iter().find(|d| d.id == id)
    }

    /// Looks up a teacher by id.
    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }
}
