//! Roster generation, fairness metrics and verification.
//!
//! # Algorithm
//!
//! `RosterEngine` uses a greedy, lowest-burden-first heuristic over a
//! fixed iteration order (dates ascending, duty types by order, slots).
//! It is not optimal, but it is deterministic and explainable.
//!
//! # KPI
//!
//! `RosterKpi` reports fill rate and the spread of teaching load plus
//! duty burden across candidate teachers.
//!
//! # Audit
//!
//! [`audit::verify`] re-checks a roster against its snapshot.

pub mod audit;
mod engine;
mod kpi;
mod tracker;

pub use engine::RosterEngine;
pub use kpi::RosterKpi;
pub use tracker::BurdenTracker;
