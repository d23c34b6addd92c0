//! Ocelli CLI
//!
//! Headless tooling around the face engine: `ocelli.toml` loading, scenario
//! files, the dialogue controller and JSON run reports.

pub mod assert;
pub mod config;
pub mod controller;
pub mod report;
pub mod runner;
pub mod scenario;

pub use config::OcelliConfig;
pub use controller::{DialogueController, DialogueState, Relay};
pub use report::{FaceReport, ReportStatus};
pub use runner::{run_scenario, run_scenario_json, ScenarioRunner};
pub use scenario::{Scenario, ScenarioStep};
