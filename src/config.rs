//! Roster run options.
//!
//! Options are plain data so the enclosing application can load them
//! from whatever configuration source it uses (all fields default).

use serde::{Deserialize, Serialize};

use crate::models::TeacherRole;

/// Options controlling a roster run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterOptions {
    /// Weekly cap applied to every teacher, including unrestricted ones.
    /// `None` = no operational ceiling.
    pub max_duties_per_week_ceiling: Option<u32>,
    /// Directory roles that may receive duties.
    pub candidate_roles: Vec<TeacherRole>,
    /// Skip lectures of unknown teachers with a warning (default).
    /// When `false`, they fail the run during initialization.
    pub skip_inconsistent_lectures: bool,
}

impl RosterOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the weekly ceiling.
    pub fn with_weekly_ceiling(mut self, ceiling: u32) -> Self {
        self.max_duties_per_week_ceiling = Some(ceiling);
        self
    }

    /// Sets the roles eligible for duty.
    pub fn with_candidate_roles(mut self, roles: Vec<TeacherRole>) -> Self {
        self.candidate_roles = roles;
        self
    }

    /// Rejects snapshots containing lectures of unknown teachers.
    pub fn strict_lectures(mut self) -> Self {
        self.skip_inconsistent_lectures = false;
        self
    }

    /// Whether a role may receive duties.
    pub fn is_candidate_role(&self, role: TeacherRole) -> bool {
        self.candidate_roles.contains(&role)
    }
}

impl Default for RosterOptions {
    fn default() -> Self {
        Self {
            max_duties_per_week_ceiling: None,
            candidate_roles: vec![TeacherRole::Teacher],
            skip_inconsistent_lectures: true,
        }
    }
}
