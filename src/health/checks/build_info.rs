//! Build information health check

use crate::build_info;
use crate::health::check::{CheckResult, Probes, SystemCheck};

/// Checks that build metadata was captured
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates build metadata (rustc, target, timestamp)")
    }

    fn check(&self) -> CheckResult {
        let mut probes = Probes::new();
        for (label, value) in [
            ("Build time", build_info::BUILD_TIMESTAMP),
            ("Rustc", build_info::RUSTC_SEMVER),
            ("Channel", build_info::RUSTC_CHANNEL),
            ("Target", build_info::CARGO_TARGET_TRIPLE),
            ("Opt level", build_info::CARGO_OPT_LEVEL),
        ] {
            if value.is_empty() {
                probes.warn(format!("{label}: missing"));
            } else {
                probes.ok(format!("{label}: {value}"));
            }
        }

        probes.finish(
            &build_info::version_string(),
            "Build metadata incomplete",
            "Build metadata unavailable",
        )
    }
}
