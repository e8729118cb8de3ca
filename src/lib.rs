//! StepCapture command-line front end
//!
//! Exposes the scenario runner and configuration for integration testing

pub mod cli;
pub mod config;
pub mod errors;
pub mod scenario;

pub use config::RecorderConfig;
pub use errors::ScenarioError;
pub use scenario::{run as run_scenario, Scenario, ScenarioEvent, ScenarioReport};
