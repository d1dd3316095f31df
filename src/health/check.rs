//! Core health check trait and types

use std::time::Duration;

/// Status of a system check
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckStatus {
    /// Check passed successfully
    Pass,
    /// Check passed with warnings
    Warn,
    /// Check failed
    Fail,
}

impl CheckStatus {
    /// Returns true if the check passed (Pass or Warn)
    pub fn is_ok(&self) -> bool {
        matches!(self, CheckStatus::Pass | CheckStatus::Warn)
    }

    /// Returns true if the check failed
    pub fn is_fail(&self) -> bool {
        matches!(self, CheckStatus::Fail)
    }

    /// Returns the status as a colored string
    pub fn as_colored_str(&self) -> String {
        use colored::Colorize;
        match self {
            CheckStatus::Pass => "PASS".green().to_string(),
            CheckStatus::Warn => "WARN".yellow().to_string(),
            CheckStatus::Fail => "FAIL".red().to_string(),
        }
    }
}

/// Result of a system check
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub status: CheckStatus,
    /// Brief message describing the result
    pub message: String,
    /// One line per probe the check ran
    pub details: Vec<String>,
    /// How long the check took
    pub duration: Duration,
}

impl CheckResult {
    fn new(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Pass, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Warn, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::new(CheckStatus::Fail, message)
    }

    /// Attaches probe lines
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    /// Sets the duration for this check
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Accumulates probe outcomes while a check runs
///
/// The worst outcome recorded decides the final status.
#[derive(Debug, Default)]
pub struct Probes {
    lines: Vec<String>,
    worst: Option<CheckStatus>,
}

impl Probes {
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&mut self, status: CheckStatus, mark: &str, line: String) {
        self.lines.push(format!("  {mark} {line}"));
        self.worst = self.worst.max(Some(status));
    }

    pub fn ok(&mut self, line: impl Into<String>) {
        self.record(CheckStatus::Pass, "✓", line.into());
    }

    pub fn warn(&mut self, line: impl Into<String>) {
        self.record(CheckStatus::Warn, "⚠", line.into());
    }

    pub fn fail(&mut self, line: impl Into<String>) {
        self.record(CheckStatus::Fail, "✗", line.into());
    }

    /// Records `ok` when `condition` holds, `fail` otherwise
    pub fn expect(&mut self, condition: bool, ok: impl Into<String>, fail: impl Into<String>) -> bool {
        if condition {
            self.ok(ok);
        } else {
            self.fail(fail);
        }
        condition
    }

    pub fn has_failed(&self) -> bool {
        self.worst == Some(CheckStatus::Fail)
    }

    /// Builds the result, choosing the message matching the worst outcome
    pub fn finish(self, pass: &str, warn: &str, fail: &str) -> CheckResult {
        let result = match self.worst.unwrap_or(CheckStatus::Pass) {
            CheckStatus::Pass => CheckResult::pass(pass),
            CheckStatus::Warn => CheckResult::warn(warn),
            CheckStatus::Fail => CheckResult::fail(fail),
        };
        result.with_details(self.lines)
    }
}

/// Trait for system health checks
pub trait SystemCheck {
    /// Name of the system being checked
    fn name(&self) -> &'static str;

    /// Perform the health check
    fn check(&self) -> CheckResult;

    /// Optional description of what this check validates
    fn description(&self) -> Option<&'static str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worst_probe_wins() {
        let mut probes = Probes::new();
        probes.ok("first");
        probes.warn("second");
        assert!(!probes.has_failed());
        let result = probes.finish("p", "w", "f");
        assert_eq!(result.status, CheckStatus::Warn);
        assert_eq!(result.message, "w");
        assert_eq!(result.details, vec!["  ✓ first", "  ⚠ second"]);
    }

    #[test]
    fn test_expect_records_failure() {
        let mut probes = Probes::new();
        assert!(!probes.expect(false, "fine", "broken"));
        assert!(probes.has_failed());
        assert_eq!(probes.finish("p", "w", "f").status, CheckStatus::Fail);
    }

    #[test]
    fn test_no_probes_is_a_pass() {
        assert_eq!(Probes::new().finish("p", "w", "f").status, CheckStatus::Pass);
    }
}
