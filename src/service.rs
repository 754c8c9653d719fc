//! Roster generation against a store.
//!
//! A run has three steps. It reads a snapshot, runs the engine in memory,
//! then replaces the stored assignments for the range in one write. No
//! store access happens while the engine runs.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use crate::error::RosterError;
use crate::models::{DutyAssignment, Roster};
use crate::roster::RosterEngine;
use crate::store::{AssignmentSink, RosterSource};

/// Generates and persists rosters for a shared store.
///
/// Cloning is cheap; clones share the store.
#[derive(Debug)]
pub struct RosterService<S> {
    store: Arc<S>,
    engine: RosterEngine,
}

impl<S> Clone for RosterService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            engine: self.engine.clone(),
        }
    }
}

impl<S: RosterSource + AssignmentSink> RosterService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            engine: RosterEngine::new(),
        }
    }

    /// Uses a configured engine.
    pub fn with_engine(mut self, engine: RosterEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generates the roster for `[from, to]` and stores its assignments,
    /// replacing whatever the range held before.
    ///
    /// Nothing is written when generation fails.
    pub fn generate(
        &self,
        academic_year: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Roster, RosterError> {
        if from > to {
            return Err(RosterError::InvalidRange { from, to });
        }
        let snapshot = self.store.snapshot(academic_year)?;
        let roster = self.engine.generate(&snapshot, from, to)?;
        let replaced =
            self.store
                .replace_assignments(academic_year, from, to, roster.assignments.clone())?;
        info!(
            academic_year,
            %from,
            %to,
            stored = roster.assignments.len(),
            replaced,
            "roster stored"
        );
        Ok(roster)
    }

    /// Stored assignments for `[from, to]`, ordered by date.
    pub fn fetch_roster(
        &self,
        academic_year: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DutyAssignment>, RosterError> {
        self.store.assignments_in_range(academic_year, from, to)
    }
}
