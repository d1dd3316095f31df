//! Configuration health check

use crate::config::HyperzoomConfig;
use crate::health::check::{CheckResult, Probes, SystemCheck};

/// Checks that every profile loads and validates
pub struct ConfigCheck {
    profiles: Vec<String>,
}

impl ConfigCheck {
    /// Checks the debug and release profiles
    pub fn new() -> Self {
        Self::with_profiles(["debug", "release"])
    }

    pub fn with_profiles<I, S>(profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            profiles: profiles.into_iter().map(Into::into).collect(),
        }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Loads every profile from files and environment and validates it")
    }

    fn check(&self) -> CheckResult {
        let mut probes = Probes::new();

        for profile in &self.profiles {
            match HyperzoomConfig::load(profile) {
                Ok(config) => probes.ok(format!(
                    "Profile '{profile}': fade margin {}, projection {:?}",
                    config.zoom.fade_margin, config.camera.projection
                )),
                Err(e) => probes.fail(format!("Profile '{profile}': {e}")),
            }
        }

        match HyperzoomConfig::load_from_env() {
            Ok(config) => probes.ok(format!("Environment profile '{}' loaded", config.profile)),
            Err(e) => probes.warn(format!("Environment profile: {e}")),
        }

        probes.finish(
            &format!("{} profiles validated", self.profiles.len()),
            "Config loaded with warnings",
            "Failed to load one or more config profiles",
        )
    }
}
