//! Runs health checks and tallies their results

use std::time::Instant;

use tracing::{debug, warn};

use super::check::{CheckResult, CheckStatus, SystemCheck};

/// Results from running a health check suite
#[derive(Debug)]
pub struct HealthCheckReport {
    /// Individual check results with their system names
    pub results: Vec<(String, CheckResult)>,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
}

impl HealthCheckReport {
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Returns true if no check failed
    pub fn is_healthy(&self) -> bool {
        self.failed == 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warned > 0
    }

    /// 0 = all pass, 1 = any fail, 2 = any warn (but no fail)
    pub fn exit_code(&self) -> i32 {
        if self.failed > 0 {
            1
        } else if self.warned > 0 {
            2
        } else {
            0
        }
    }

    /// Result of the check named `name`
    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.results
            .iter()
            .find(|(check, _)| check == name)
            .map(|(_, result)| result)
    }
}

/// Orchestrates running health checks and collecting results
#[derive(Default)]
pub struct HealthCheckRunner {
    checks: Vec<Box<dyn SystemCheck>>,
}

impl HealthCheckRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a check to the runner
    pub fn add_check<C: SystemCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Runs every check in registration order
    pub fn run(self) -> HealthCheckReport {
        let mut report = HealthCheckReport {
            results: Vec::with_capacity(self.checks.len()),
            passed: 0,
            warned: 0,
            failed: 0,
        };

        for check in self.checks {
            let name = check.name();
            let start = Instant::now();
            let result = check.check().with_duration(start.elapsed());

            match result.status {
                CheckStatus::Pass => {
                    debug!(check = name, duration = ?result.duration, "Health check passed");
                    report.passed += 1;
                }
                CheckStatus::Warn => {
                    warn!(check = name, message = %result.message, "Health check warned");
                    report.warned += 1;
                }
                CheckStatus::Fail => {
                    warn!(check = name, message = %result.message, "Health check failed");
                    report.failed += 1;
                }
            }

            report.results.push((name.to_string(), result));
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(CheckStatus);

    impl SystemCheck for Fixed {
        fn name(&self) -> &'static str {
            match self.0 {
                CheckStatus::Pass => "pass",
                CheckStatus::Warn => "warn",
                CheckStatus::Fail => "fail",
            }
        }

        fn check(&self) -> CheckResult {
            match self.0 {
                CheckStatus::Pass => CheckResult::pass("ok"),
                CheckStatus::Warn => CheckResult::warn("meh"),
                CheckStatus::Fail => CheckResult::fail("no"),
            }
        }
    }

    #[test]
    fn test_exit_codes() {
        let report = HealthCheckRunner::new()
            .add_check(Fixed(CheckStatus::Pass))
            .run();
        assert_eq!(report.exit_code(), 0);

        let report = HealthCheckRunner::new()
            .add_check(Fixed(CheckStatus::Pass))
            .add_check(Fixed(CheckStatus::Warn))
            .run();
        assert_eq!(report.exit_code(), 2);
        assert!(report.is_healthy());

        let report = HealthCheckRunner::new()
            .add_check(Fixed(CheckStatus::Warn))
            .add_check(Fixed(CheckStatus::Fail))
            .run();
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.total(), 2);
        assert_eq!(report.get("fail").map(|r| r.message.as_str()), Some("no"));
    }
}
