//! Benchmark workload kinds and their typed result records.

use faasmark_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five compute workloads served by the harness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkloadKind {
    /// Dense square matrix multiplication.
    Gemm,
    /// Repeated SHA-256 digests over a fixed buffer.
    Sha256,
    /// Repeated AES-CTR keystream application over a fixed buffer.
    AesCtr,
    /// Repeated gzip compression of a fixed buffer.
    Gzip,
    /// JSON serialize/parse round trips over a nested value.
    Json,
}

impl WorkloadKind {
    /// Canonical wire tag, matching the `type` discriminator of the result.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gemm => "gemm",
            Self::Sha256 => "sha256",
            Self::AesCtr => "aesCtr",
            Self::Gzip => "gzip",
            Self::Json => "json",
        }
    }

    /// Documented default parameter, substituted by adapters when the
    /// request carries no usable value.
    #[must_use]
    pub const fn default_parameter(self) -> i64 {
        match self {
            Self::Gemm => 100,
            Self::Sha256 | Self::AesCtr | Self::Gzip => 2,
            Self::Json => 500,
        }
    }

    /// All workload kinds, in registry order.
    #[must_use]
    pub const fn all() -> [Self; 5] {
        [Self::Gemm, Self::Sha256, Self::AesCtr, Self::Gzip, Self::Json]
    }
}

impl fmt::Display for WorkloadKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Parse failure for workload names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownWorkload {
    /// The unrecognized input.
    pub input: String,
}

impl fmt::Display for UnknownWorkload {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "unknown workload (expected gemm, sha256, aesCtr, gzip, or json)"
        )
    }
}

impl std::error::Error for UnknownWorkload {}

impl From<UnknownWorkload> for ErrorEnvelope {
    fn from(error: UnknownWorkload) -> Self {
        Self::expected(ErrorCode::invalid_input(), error.to_string())
            .with_metadata("input", error.input)
    }
}

impl FromStr for WorkloadKind {
    type Err = UnknownWorkload;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "gemm" => Ok(Self::Gemm),
            "sha256" => Ok(Self::Sha256),
            "aesctr" | "aes-ctr" => Ok(Self::AesCtr),
            "gzip" => Ok(Self::Gzip),
            "json" => Ok(Self::Json),
            _ => Err(UnknownWorkload {
                input: input.to_owned(),
            }),
        }
    }
}

/// Typed result record produced by exactly one workload invocation.
///
/// Serializes with a `type` discriminator and the workload's wire field
/// names; embedded verbatim as the `benchmark` attribute of a report.
/// The `compressTimeMS` spelling is part of the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BenchmarkResult {
    /// Dense matrix multiply result.
    #[serde(rename = "gemm", rename_all = "camelCase")]
    Gemm {
        /// Square matrix side length.
        matrix_size: u32,
        /// Time spent in the multiply, milliseconds.
        multiplication_time_ms: f64,
    },
    /// SHA-256 digest result.
    #[serde(rename = "sha256", rename_all = "camelCase")]
    Sha256 {
        /// Input buffer size in MiB.
        #[serde(rename = "hashSizeMB")]
        hash_size_mb: u32,
        /// Time spent hashing, milliseconds.
        hash_time_ms: f64,
        /// Number of digests computed.
        iterations: u32,
    },
    /// AES-CTR encryption result.
    #[serde(rename = "aesCtr", rename_all = "camelCase")]
    AesCtr {
        /// Input buffer size in MiB.
        #[serde(rename = "encryptSizeMB")]
        encrypt_size_mb: u32,
        /// Time spent encrypting, milliseconds.
        encrypt_time_ms: f64,
        /// Key size in bits.
        key_size: u32,
        /// Number of encryption passes.
        iterations: u32,
    },
    /// Gzip compression result.
    #[serde(rename = "gzip", rename_all = "camelCase")]
    Gzip {
        /// Input buffer size in MiB.
        #[serde(rename = "compressSizeMB")]
        compress_size_mb: u32,
        /// Time spent compressing, milliseconds.
        #[serde(rename = "compressTimeMS")]
        compress_time_ms: f64,
        /// Number of compression passes.
        iterations: u32,
    },
    /// JSON round-trip result.
    #[serde(rename = "json", rename_all = "camelCase")]
    Json {
        /// Serialized bytes per elapsed second, in MB/s.
        #[serde(rename = "throughputMBps")]
        throughput_mbps: f64,
        /// Time spent in round trips, milliseconds.
        json_time_ms: f64,
        /// Number of round trips.
        iterations: u32,
    },
}

impl BenchmarkResult {
    /// The workload that produced this result.
    #[must_use]
    pub const fn kind(&self) -> WorkloadKind {
        match self {
            Self::Gemm { .. } => WorkloadKind::Gemm,
            Self::Sha256 { .. } => WorkloadKind::Sha256,
            Self::AesCtr { .. } => WorkloadKind::AesCtr,
            Self::Gzip { .. } => WorkloadKind::Gzip,
            Self::Json { .. } => WorkloadKind::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workload_kind_parses_wire_tags() -> Result<(), UnknownWorkload> {
        assert_eq!(WorkloadKind::from_str("gemm")?, WorkloadKind::Gemm);
        assert_eq!(WorkloadKind::from_str("aesCtr")?, WorkloadKind::AesCtr);
        assert_eq!(WorkloadKind::from_str("aes-ctr")?, WorkloadKind::AesCtr);
        assert_eq!(WorkloadKind::from_str(" json ")?, WorkloadKind::Json);
        Ok(())
    }

    #[test]
    fn workload_kind_rejects_unknown_names() {
        let error = WorkloadKind::from_str("bcrypt").err();
        assert!(matches!(error, Some(UnknownWorkload { .. })));
    }

    #[test]
    fn default_parameters_match_documented_values() {
        assert_eq!(WorkloadKind::Gemm.default_parameter(), 100);
        assert_eq!(WorkloadKind::Sha256.default_parameter(), 2);
        assert_eq!(WorkloadKind::AesCtr.default_parameter(), 2);
        assert_eq!(WorkloadKind::Gzip.default_parameter(), 2);
        assert_eq!(WorkloadKind::Json.default_parameter(), 500);
    }

    #[test]
    fn gemm_serialization_shape() -> Result<(), serde_json::Error> {
        let result = BenchmarkResult::Gemm {
            matrix_size: 128,
            multiplication_time_ms: 4.25,
        };

        let value = serde_json::to_value(&result)?;
        let expected = serde_json::json!({
            "type": "gemm",
            "matrixSize": 128,
            "multiplicationTimeMs": 4.25,
        });
        assert_eq!(value, expected);
        Ok(())
    }

    #[test]
    fn gzip_serialization_keeps_wire_spelling() -> Result<(), serde_json::Error> {
        let result = BenchmarkResult::Gzip {
            compress_size_mb: 4,
            compress_time_ms: 12.0,
            iterations: 2,
        };

        let value = serde_json::to_value(&result)?;
        let expected = serde_json::json!({
            "type": "gzip",
            "compressSizeMB": 4,
            "compressTimeMS": 12.0,
            "iterations": 2,
        });
        assert_eq!(value, expected);
        Ok(())
    }

    #[test]
    fn json_serialization_shape() -> Result<(), serde_json::Error> {
        let result = BenchmarkResult::Json {
            throughput_mbps: 310.5,
            json_time_ms: 8.0,
            iterations: 500,
        };

        let value = serde_json::to_value(&result)?;
        let expected = serde_json::json!({
            "type": "json",
            "throughputMBps": 310.5,
            "jsonTimeMs": 8.0,
            "iterations": 500,
        });
        assert_eq!(value, expected);
        Ok(())
    }

    #[test]
    fn result_kind_matches_variant() {
        let result = BenchmarkResult::AesCtr {
            encrypt_size_mb: 8,
            encrypt_time_ms: 1.0,
            key_size: 128,
            iterations: 2,
        };
        assert_eq!(result.kind(), WorkloadKind::AesCtr);
        assert_eq!(result.kind().as_str(), "aesCtr");
    }
}
