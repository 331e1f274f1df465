//! Records API smoke test
//!
//! Logs into a records service, patches one record's year and checks the
//! change persisted. The library exposes the runner so it can be driven
//! against any target from tests.

pub mod api;
pub mod cli;
pub mod common;
pub mod scenario;

// Re-export commonly used types for tests
pub use common::config::{Config, Target};
pub use common::{Error, Result};
pub use scenario::{run_scenario, ScenarioReport};
