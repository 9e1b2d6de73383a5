//! End-to-end smoke tests for the faasmark binary.

use std::io;
use std::process::Command;

fn run_workload_json(args: &[&str]) -> io::Result<serde_json::Value> {
    let output = Command::new(env!("CARGO_BIN_EXE_faasmark"))
        .args(args)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(io::Error::other(format!("run failed: {stderr}")));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).map_err(io::Error::other)
}

#[test]
fn gemm_report_carries_the_reserved_fields() -> io::Result<()> {
    let report = run_workload_json(&["run", "gemm", "--parameter", "4"])?;

    assert_eq!(report.get("provider"), Some(&serde_json::json!("local")));
    assert_eq!(report.get("invocationCount"), Some(&serde_json::json!(1)));
    assert!(
        report
            .get("instanceId")
            .and_then(serde_json::Value::as_str)
            .is_some_and(|id| !id.is_empty())
    );
    assert_eq!(
        report.pointer("/benchmark/type"),
        Some(&serde_json::json!("gemm"))
    );
    assert_eq!(
        report.pointer("/benchmark/matrixSize"),
        Some(&serde_json::json!(4))
    );
    assert!(
        report
            .get("deltas")
            .is_some_and(serde_json::Value::is_object)
    );
    Ok(())
}

#[test]
fn malformed_parameter_substitutes_the_documented_default() -> io::Result<()> {
    let report = run_workload_json(&["run", "gemm", "--parameter", "not-a-number"])?;

    // gemm's documented default parameter is 100
    assert_eq!(
        report.pointer("/benchmark/matrixSize"),
        Some(&serde_json::json!(100))
    );
    Ok(())
}

#[test]
fn sha256_result_fields_are_idempotent_apart_from_timing() -> io::Result<()> {
    let first = run_workload_json(&["run", "sha256", "--parameter", "1", "--seed", "7"])?;
    let second = run_workload_json(&["run", "sha256", "--parameter", "1", "--seed", "7"])?;

    for pointer in ["/benchmark/type", "/benchmark/hashSizeMB", "/benchmark/iterations"] {
        assert_eq!(first.pointer(pointer), second.pointer(pointer));
    }
    Ok(())
}

#[test]
fn fresh_processes_mint_fresh_instance_identities() -> io::Result<()> {
    let first = run_workload_json(&["run", "gemm", "--parameter", "2"])?;
    let second = run_workload_json(&["run", "gemm", "--parameter", "2"])?;

    assert_ne!(first.get("instanceId"), second.get("instanceId"));
    Ok(())
}

#[test]
fn unsupported_key_size_fails_with_invalid_input() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_faasmark"))
        .args(["run", "aes-ctr", "--parameter", "1", "--key-size", "64"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    Ok(())
}

#[test]
fn info_reports_the_build() -> io::Result<()> {
    let output = Command::new(env!("CARGO_BIN_EXE_faasmark"))
        .args(["info"])
        .output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let value: serde_json::Value = serde_json::from_str(stdout.trim()).map_err(io::Error::other)?;
    assert!(value.get("version").is_some());
    assert!(value.get("target").is_some());
    Ok(())
}
