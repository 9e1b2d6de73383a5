//! `run` command: the local adapter around the measurement harness.
//!
//! Mirrors the adapter sequence every platform uses: baseline snapshot,
//! count the invocation, decide termination, stamp reserved attributes, run
//! the workload, record deltas, seal the report. The returned
//! [`Termination`] token is executed by `main` only after the serialized
//! reports are flushed.

use crate::CliOutput;
use crate::error::{CliError, ExitCode};
use crate::format::OutputMode;
use faasmark_core::build_info;
use faasmark_domain::{
    ATTR_BENCHMARK, ATTR_INSTANCE_ID, ATTR_INVOCATION_COUNT, ATTR_PROVIDER, KeySize,
    MetricsReport, WorkloadKind,
};
use faasmark_harness::{
    HarnessConfig, InstanceContext, MetricsInspector, Termination, WorkloadRequest,
    run_workload, terminate_instance_after,
};

/// Report attribute: runtime package name.
const ATTR_RUNTIME_NAME: &str = "runtimeName";
/// Report attribute: runtime package version.
const ATTR_RUNTIME_VERSION: &str = "runtimeVersion";

/// Inputs for the `run` command.
#[derive(Debug)]
pub struct RunCommandInput<'a> {
    /// Which workload to serve.
    pub kind: WorkloadKind,
    /// Raw parameter text; malformed or missing input substitutes the
    /// workload's documented default.
    pub raw_parameter: Option<&'a str>,
    /// Cipher key width (aesCtr only).
    pub key_size: KeySize,
    /// Number of sequential invocations to serve from this process.
    pub invocations: u32,
    /// Resolved harness configuration.
    pub config: HarnessConfig,
}

/// Lenient adapter-side parameter extraction.
///
/// Parse failure is recovered locally by substituting the documented
/// default; it is never surfaced as an error.
#[must_use]
pub fn extract_parameter(raw: Option<&str>, kind: WorkloadKind) -> i64 {
    raw.and_then(|text| text.trim().parse::<i64>().ok())
        .unwrap_or_else(|| kind.default_parameter())
}

/// Serve `invocations` sequential invocations and buffer their reports.
///
/// Stops early when the lifecycle controller schedules termination: a dead
/// instance serves no further invocations. The termination token is
/// returned for the caller to execute after the output is flushed.
pub fn run_benchmark(
    mode: OutputMode,
    input: &RunCommandInput<'_>,
    context: &mut InstanceContext,
) -> Result<(CliOutput, Termination), CliError> {
    let mut reports: Vec<MetricsReport> = Vec::new();
    let mut termination = Termination::Continue;

    for _ in 0..input.invocations {
        let (report, decision) = serve_invocation(input, context)?;
        reports.push(report);
        termination = decision;
        if termination.is_scheduled() {
            break;
        }
    }

    let stdout = render_reports(mode, &reports)?;
    Ok((
        CliOutput {
            stdout,
            exit_code: ExitCode::Ok,
        },
        termination,
    ))
}

fn serve_invocation(
    input: &RunCommandInput<'_>,
    context: &mut InstanceContext,
) -> Result<(MetricsReport, Termination), CliError> {
    let mut inspector = MetricsInspector::new();
    inspector.inspect_all()?;

    let count = context.next_invocation();
    let termination = terminate_instance_after(count, input.config.max_invocations);

    let build = build_info();
    inspector.add_attribute(ATTR_PROVIDER, &*input.config.provider)?;
    inspector.add_attribute(ATTR_INSTANCE_ID, context.instance_id().as_str())?;
    inspector.add_attribute(ATTR_INVOCATION_COUNT, count)?;
    inspector.add_attribute(ATTR_RUNTIME_NAME, build.name)?;
    inspector.add_attribute(ATTR_RUNTIME_VERSION, build.version)?;

    let parameter = extract_parameter(input.raw_parameter, input.kind);
    let request = WorkloadRequest::new(input.kind, parameter).with_key_size(input.key_size);
    let result = run_workload(&request, &input.config)?;

    inspector.add_attribute(ATTR_BENCHMARK, result)?;
    inspector.inspect_all_deltas()?;
    let report = inspector.finish()?;

    tracing::info!(
        workload = %input.kind,
        parameter,
        invocation_count = count,
        "invocation served"
    );

    Ok((report, termination))
}

fn render_reports(mode: OutputMode, reports: &[MetricsReport]) -> Result<String, CliError> {
    let mut stdout = String::new();

    if mode.is_ndjson() {
        for report in reports {
            stdout.push_str(&serde_json::to_string(report)?);
            stdout.push('\n');
        }
    } else if let [report] = reports {
        stdout.push_str(&serde_json::to_string_pretty(report)?);
        stdout.push('\n');
    } else {
        stdout.push_str(&serde_json::to_string_pretty(reports)?);
        stdout.push('\n');
    }

    Ok(stdout)
}
