//! End-to-end smoke scenario
//!
//! Logs in, bumps one record's year through the API and reads it back.
//! The run is destructive by intent: each pass moves the year forward.

mod report;
mod runner;

pub use report::{Failure, ScenarioReport, Step};
pub use runner::{run_scenario, STEP_COUNT};
