//! Integration tests for the health check system

use hyperzoom::HyperzoomConfig;
use hyperzoom::health::{self, CheckStatus, HealthCheckRunner, SystemCheck, checks::*};

#[test]
fn test_all_health_checks() {
    let report = health::run_all_checks();

    // Print report for debugging if tests fail
    if !report.is_healthy() {
        eprintln!("\n{}", health::format_report(&report));
    }

    assert!(
        report.is_healthy(),
        "Health checks failed: {} failures, {} warnings",
        report.failed,
        report.warned
    );
}

#[test]
fn test_config_check() {
    let result = ConfigCheck::new().check();
    assert!(
        result.status.is_ok(),
        "Config check failed: {}\n{}",
        result.message,
        result.details.join("\n")
    );
}

#[test]
fn test_unknown_profile_falls_back_to_defaults() {
    let result = ConfigCheck::with_profiles(["no-such-profile"]).check();
    assert!(result.status.is_ok(), "{}", result.message);
}

#[test]
fn test_scene_check() {
    let result = SceneCheck::new().check();
    assert_eq!(result.status, CheckStatus::Pass, "{}", result.message);

    let empty = SceneCheck::with_targets(0).check();
    assert_eq!(empty.status, CheckStatus::Warn);
}

#[test]
fn test_controller_check() {
    let result = ControllerCheck::new().check();
    assert_eq!(
        result.status,
        CheckStatus::Pass,
        "{}\n{}",
        result.message,
        result.details.join("\n")
    );
}

#[test]
fn test_controller_check_reports_bad_curves() {
    let mut config = HyperzoomConfig::default();
    config.curves.focusable.clear();
    let result = ControllerCheck::with_config(config).check();
    assert!(result.status.is_fail());
}

#[test]
fn test_build_info_check() {
    let result = BuildInfoCheck::new().check();
    assert!(
        result.status.is_ok(),
        "Build info check failed: {}",
        result.message
    );
}

#[test]
fn test_runner_collects_all_checks() {
    let report = HealthCheckRunner::new()
        .add_check(ConfigCheck::new())
        .add_check(SceneCheck::new())
        .run();

    assert_eq!(report.total(), 2, "Expected 2 checks in report");
    assert_eq!(report.passed + report.warned + report.failed, report.total());
}

#[test]
fn test_report_exit_codes() {
    let report = HealthCheckRunner::new().add_check(SceneCheck::new()).run();
    assert_eq!(report.exit_code(), 0);

    let report = HealthCheckRunner::new()
        .add_check(SceneCheck::with_targets(0))
        .run();
    assert_eq!(report.exit_code(), 2);
}
