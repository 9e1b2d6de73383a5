//! End-to-end test for the deliberate warm-instance kill switch.

use std::io;
use std::process::Command;

#[test]
fn instance_dies_with_status_one_after_the_threshold() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_faasmark"))
        .args([
            "--output",
            "ndjson",
            "run",
            "gemm",
            "--parameter",
            "2",
            "--invocations",
            "5",
            "--max-invocations",
            "2",
        ])
        .output()?;

    // Deliberate termination, not a crash: exit status 1 with both reports
    // fully flushed before death.
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.trim().lines().collect();
    assert_eq!(lines.len(), 2, "the reply being sent is never truncated");

    for (index, line) in lines.iter().enumerate() {
        let report: serde_json::Value = serde_json::from_str(line).map_err(io::Error::other)?;
        assert_eq!(
            report.get("invocationCount"),
            Some(&serde_json::json!(index + 1))
        );
    }
    Ok(())
}

#[test]
fn instance_survives_below_the_threshold() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_faasmark"))
        .args([
            "--output",
            "ndjson",
            "run",
            "gemm",
            "--parameter",
            "2",
            "--invocations",
            "3",
            "--max-invocations",
            "4",
        ])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim().lines().count(), 3);
    Ok(())
}

#[test]
fn threshold_override_via_environment_is_honored() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_faasmark"))
        .args([
            "--output",
            "ndjson",
            "run",
            "gemm",
            "--parameter",
            "2",
            "--invocations",
            "2",
        ])
        .env("FBM_MAX_INVOCATIONS", "1")
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim().lines().count(), 1);
    Ok(())
}

#[test]
fn invalid_environment_threshold_fails_fast() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_faasmark"))
        .args(["run", "gemm", "--parameter", "2"])
        .env("FBM_MAX_INVOCATIONS", "four")
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("FBM_MAX_INVOCATIONS"));
    Ok(())
}
