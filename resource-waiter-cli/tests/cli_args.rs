use assert_cmd::Command as AssertCommand;
use predicates::prelude::*;
use std::process::Command;

fn resource_waiter() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_resource-waiter"));
    cmd.env_remove("RESOURCE_WAITER_MAX_WAIT")
        .env_remove("RESOURCE_WAITER_MIN_DELAY")
        .env_remove("RESOURCE_WAITER_MAX_DELAY");
    cmd
}

#[test]
fn help_lists_waiters_and_exit_codes() {
    let out = resource_waiter()
        .arg("--help")
        .output()
        .expect("failed to run --help");
    let s = String::from_utf8_lossy(&out.stdout);
    assert_eq!(out.status.code(), Some(0));
    for waiter in [
        "endpoint-in-service",
        "endpoint-deleted",
        "notebook-instance-stopped",
        "training-job-completed-or-stopped",
        "transform-job-completed-or-stopped",
    ] {
        assert!(s.contains(waiter), "help should list {waiter}: {s}");
    }
    assert!(s.contains("4 timeout"), "help should list exit codes: {s}");
}

#[test]
fn test_unknown_waiter_is_usage_error() {
    let output = resource_waiter()
        .args(["endpoint-exploded", "my-endpoint"])
        .output()
        .expect("failed to run with unknown waiter");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(2));
    assert!(
        stderr.contains("unknown waiter 'endpoint-exploded'"),
        "stderr was: {}",
        stderr
    );
}

#[test]
fn test_missing_name_is_usage_error() {
    let output = resource_waiter()
        .arg("endpoint-in-service")
        .output()
        .expect("failed to run without a name");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_max_delay_below_min_delay_is_rejected() {
    let output = resource_waiter()
        .args([
            "endpoint-in-service",
            "my-endpoint",
            "--min-delay",
            "60",
            "--max-delay",
            "30",
        ])
        .output()
        .expect("failed to run with inverted delays");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(3));
    assert!(
        stderr.contains("Invalid waiter configuration"),
        "stderr was: {}",
        stderr
    );
}

#[test]
fn test_zero_max_wait_is_rejected() {
    let output = resource_waiter()
        .args(["notebook-instance-in-service", "nb", "--max-wait", "0"])
        .output()
        .expect("failed to run with zero max wait");

    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_max_wait_from_environment() {
    // 20s cannot exceed the endpoint waiter's 30s default min delay
    AssertCommand::cargo_bin("resource-waiter")
        .expect("binary should be built")
        .env("RESOURCE_WAITER_MAX_WAIT", "20")
        .env_remove("RESOURCE_WAITER_MIN_DELAY")
        .env_remove("RESOURCE_WAITER_MAX_DELAY")
        .args(["endpoint-in-service", "my-endpoint"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("max_wait"));
}
