//! Health check system for validating startup and core behaviour
//!
//! Useful for validating startup, CI health checks and debugging
//! initialization issues.
//!
//! # Example
//!
//! ```no_run
//! use hyperzoom::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(SceneCheck::new())
//!     .add_check(ControllerCheck::new())
//!     .add_check(BuildInfoCheck::new())
//!     .run();
//!
//! if report.is_healthy() {
//!     println!("All systems operational!");
//! }
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, Probes, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

use crate::config::HyperzoomConfig;

/// Runs all default health checks and returns a report
pub fn run_all_checks() -> HealthCheckReport {
    run_checks_with(HyperzoomConfig::default())
}

/// Runs all default health checks, driving the controller with `config`
pub fn run_checks_with(config: HyperzoomConfig) -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::SceneCheck::new())
        .add_check(checks::ControllerCheck::with_config(config))
        .add_check(checks::BuildInfoCheck::new())
        .run()
}
