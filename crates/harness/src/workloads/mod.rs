//! The five deterministic, parameter-scaled compute workloads.
//!
//! Shared contract: pure with respect to external state, timed strictly
//! around the compute region with a monotonic clock (buffer construction
//! and teardown excluded), work volume controlled by exactly one integer
//! parameter. Workloads that allocate a sensitive byte buffer scrub it
//! after use.

pub mod aes_ctr;
pub mod gemm;
pub mod gzip;
pub mod json;
pub mod sha256;

use std::time::Duration;

/// Bytes per mebibyte, the unit workload buffer sizes are specified in.
pub(crate) const BYTES_PER_MIB: usize = 1024 * 1024;

/// Milliseconds with fractional precision, as reported in result records.
pub(crate) fn elapsed_ms(elapsed: Duration) -> f64 {
    elapsed.as_secs_f64() * 1000.0
}
