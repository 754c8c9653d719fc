//! Fair, deterministic duty rosters for school teachers.
//!
//! Assigns non-teaching duties (gate, hallway, exam supervision, ...) to
//! teachers over a date range. Each slot goes to the eligible teacher with
//! the lowest combined burden of teaching load and duties already assigned
//! in the run.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Teacher`, `Lecture`, `DutyType`,
//!   `DutyConfig`, `TeacherDutyProfile`, `RosterSnapshot`, `Roster`
//! - **`calendar`**: Working-day expansion and week numbering
//! - **`load`**: Teaching load per teacher
//! - **`conflict`**: Lecture occupancy lookup
//! - **`profile`**: Effective duty constraints per teacher
//! - **`roster`**: Greedy engine, fairness KPIs, audit
//! - **`config`**: Run options
//! - **`validation`**: Snapshot integrity checks
//! - **`store`**: Persistence contracts and an in-memory store
//! - **`service`**: Snapshot, run and store in one call
//!
//! # Logging
//!
//! The crate emits `tracing` events and never installs a subscriber.
//!
//! # References
//!
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", ch. 13
//!   (workforce scheduling)
//! - Burke et al. (2004), "The State of the Art of Nurse Rostering"

pub mod calendar;
pub mod config;
pub mod conflict;
pub mod error;
pub mod load;
pub mod models;
pub mod profile;
pub mod roster;
pub mod service;
pub mod store;
pub mod validation;

pub use error::RosterError;
