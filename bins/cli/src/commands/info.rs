//! `info` command: build and runtime identification.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use faasmark_core::build_info;

pub fn run_info(mode: OutputMode) -> Result<CliOutput, CliError> {
    let build = build_info();
    let payload = serde_json::json!({
        "name": build.name,
        "version": build.version,
        "rustcVersion": build.rustc_version,
        "target": build.target,
        "profile": build.profile,
        "runtime": build.runtime_identifier(),
    });

    let mut stdout = if mode.is_ndjson() {
        serde_json::to_string(&payload)?
    } else {
        serde_json::to_string_pretty(&payload)?
    };
    stdout.push('\n');

    Ok(CliOutput {
        stdout,
        exit_code: ExitCode::Ok,
    })
}
