//! Pure domain logic for the GrindTracker vehicle research planner.
//!
//! No I/O and no async: every function here works against an in-memory
//! [`catalog::Catalog`] snapshot and caller-supplied progress, so the API
//! crate and tests can share the exact same computations.

pub mod bonus;
pub mod catalog;
pub mod error;
pub mod estimation;
pub mod importer;
pub mod prerequisites;
pub mod progress;
pub mod types;
pub mod vehicle;
