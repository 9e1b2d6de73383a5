//! Workload dispatch: one integer parameter in, one typed result out.

use crate::config::HarnessConfig;
use crate::workloads::{aes_ctr, gemm, gzip, json, sha256};
use faasmark_domain::{BenchmarkResult, KeySize, WorkloadKind};
use faasmark_shared::Result;

/// One workload invocation request.
///
/// The parameter keeps the adapter's signedness: the matrix workload
/// interprets non-positive sizes as a short-circuit, the iteration-scaled
/// workloads clamp negatives to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadRequest {
    /// Which workload to run.
    pub kind: WorkloadKind,
    /// Size or iteration count, depending on the workload.
    pub parameter: i64,
    /// Cipher key width; only the aesCtr workload reads it.
    pub key_size: KeySize,
}

impl WorkloadRequest {
    /// Build a request with the default key size.
    #[must_use]
    pub fn new(kind: WorkloadKind, parameter: i64) -> Self {
        Self {
            kind,
            parameter,
            key_size: KeySize::default(),
        }
    }

    /// Override the cipher key width.
    #[must_use]
    pub const fn with_key_size(mut self, key_size: KeySize) -> Self {
        self.key_size = key_size;
        self
    }
}

/// Run one workload to completion and return its typed result.
pub fn run_workload(request: &WorkloadRequest, config: &HarnessConfig) -> Result<BenchmarkResult> {
    tracing::debug!(
        workload = %request.kind,
        parameter = request.parameter,
        "workload dispatch"
    );

    match request.kind {
        WorkloadKind::Gemm => Ok(gemm::run(request.parameter)),
        WorkloadKind::Sha256 => Ok(sha256::run(
            clamp_iterations(request.parameter),
            config.seed,
        )),
        WorkloadKind::AesCtr => aes_ctr::run(
            clamp_iterations(request.parameter),
            request.key_size,
            config.seed,
        ),
        WorkloadKind::Gzip => gzip::run(clamp_iterations(request.parameter), config.seed),
        WorkloadKind::Json => json::run(clamp_iterations(request.parameter), config.seed),
    }
}

fn clamp_iterations(parameter: i64) -> u32 {
    u32::try_from(parameter.max(0)).unwrap_or(u32::MAX)
}
