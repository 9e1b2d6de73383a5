//! CLI binary entrypoint.
//!
//! Plays the adapter role on a developer machine: parameter extraction with
//! documented defaults, reserved report fields, JSON response emission, and
//! the response-then-terminate two-phase handoff.

mod commands;
mod error;
mod format;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{RunCommandInput, run_benchmark, run_info};
use error::{CliError, ExitCode};
use faasmark_domain::{KeySize, PrimitiveError, WorkloadKind};
use faasmark_harness::{HarnessConfig, InstanceContext, Termination};
use format::{OutputArgs, OutputMode};
use std::io::{self, Write};

#[derive(Debug, Parser)]
#[command(
    name = "faasmark",
    version,
    about = "Compute-benchmark measurement harness for hosted execution environments",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    output: OutputArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve benchmark invocations locally and print their reports.
    Run {
        /// Workload to serve.
        #[arg(value_enum)]
        workload: WorkloadArg,
        /// Raw workload parameter (size or iteration count); malformed or
        /// missing input falls back to the workload's documented default.
        #[arg(long)]
        parameter: Option<String>,
        /// Cipher key size in bits (aes-ctr only; 128, 192, or 256).
        #[arg(long)]
        key_size: Option<u32>,
        /// Sequential invocations served from this process.
        #[arg(long, default_value_t = 1)]
        invocations: u32,
        /// Invocation threshold before deliberate termination.
        #[arg(long)]
        max_invocations: Option<u32>,
        /// Seed for workload input buffers.
        #[arg(long)]
        seed: Option<u32>,
        /// Provider label stamped on every report.
        #[arg(long)]
        provider: Option<String>,
    },
    /// Show build and version details.
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum WorkloadArg {
    Gemm,
    Sha256,
    AesCtr,
    Gzip,
    Json,
}

impl From<WorkloadArg> for WorkloadKind {
    fn from(value: WorkloadArg) -> Self {
        match value {
            WorkloadArg::Gemm => Self::Gemm,
            WorkloadArg::Sha256 => Self::Sha256,
            WorkloadArg::AesCtr => Self::AesCtr,
            WorkloadArg::Gzip => Self::Gzip,
            WorkloadArg::Json => Self::Json,
        }
    }
}

pub(crate) struct CliOutput {
    stdout: String,
    exit_code: ExitCode,
}

fn main() -> std::process::ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let mode = OutputMode::from_args(&cli.output);
    let mut context = InstanceContext::new();

    match run(&cli.command, mode, &mut context) {
        Ok((output, termination)) => match write_output(&output) {
            Ok(()) => {
                // Output is flushed; the deferred lifecycle effect may fire.
                termination.execute();
                std::process::ExitCode::from(output.exit_code.as_u8())
            },
            Err(error) => exit_with_error(&error),
        },
        Err(error) => exit_with_error(&error),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init();
}

fn exit_with_error(error: &CliError) -> std::process::ExitCode {
    let _ = writeln!(io::stderr(), "error: {error}");
    std::process::ExitCode::from(error.exit_code().as_u8())
}

fn run(
    command: &Commands,
    mode: OutputMode,
    context: &mut InstanceContext,
) -> Result<(CliOutput, Termination), CliError> {
    match command {
        Commands::Run {
            workload,
            parameter,
            key_size,
            invocations,
            max_invocations,
            seed,
            provider,
        } => {
            let kind = WorkloadKind::from(*workload);
            let config = resolve_config(
                *max_invocations,
                *seed,
                provider.as_deref(),
            )?;
            let key_size = resolve_key_size(kind, *key_size)?;

            let input = RunCommandInput {
                kind,
                raw_parameter: parameter.as_deref(),
                key_size,
                invocations: *invocations,
                config,
            };
            run_benchmark(mode, &input, context)
        },
        Commands::Info => run_info(mode).map(|output| (output, Termination::Continue)),
    }
}

/// Resolve harness configuration: environment first, flags override.
fn resolve_config(
    max_invocations: Option<u32>,
    seed: Option<u32>,
    provider: Option<&str>,
) -> Result<HarnessConfig, CliError> {
    let mut config = HarnessConfig::from_process_env().map_err(CliError::from)?;

    if let Some(max_invocations) = max_invocations {
        config.max_invocations = max_invocations;
    }
    if let Some(seed) = seed {
        config.seed = seed;
    }
    if let Some(provider) = provider {
        let trimmed = provider.trim();
        if trimmed.is_empty() {
            return Err(CliError::InvalidInput("provider cannot be empty".to_owned()));
        }
        config.provider = trimmed.into();
    }

    Ok(config)
}

/// Validate the key-size flag: only meaningful for the cipher workload.
fn resolve_key_size(kind: WorkloadKind, bits: Option<u32>) -> Result<KeySize, CliError> {
    let Some(bits) = bits else {
        return Ok(KeySize::default());
    };

    if kind != WorkloadKind::AesCtr {
        return Err(CliError::InvalidInput(format!(
            "--key-size only applies to aes-ctr, not {kind}"
        )));
    }

    KeySize::from_bits(bits).map_err(|error: PrimitiveError| CliError::Harness(error.into()))
}

fn write_output(output: &CliOutput) -> Result<(), CliError> {
    let mut stdout = io::stdout();
    stdout.write_all(output.stdout.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
