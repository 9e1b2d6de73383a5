//! Repeated SHA-256 digests over a fixed seeded buffer.

use crate::bytes::{SeededByteSource, scrub};
use crate::workloads::{BYTES_PER_MIB, elapsed_ms};
use faasmark_domain::BenchmarkResult;
use sha2::{Digest, Sha256};
use std::hint::black_box;
use std::time::Instant;

const BUFFER_MIB: usize = 8;

/// Compute `iterations` SHA-256 digests of one 8 MiB seeded buffer,
/// discarding each digest.
#[must_use]
pub fn run(iterations: u32, seed: u32) -> BenchmarkResult {
    let mut source = SeededByteSource::new(seed);
    let mut buffer = source.bytes(BUFFER_MIB * BYTES_PER_MIB);

    let start = Instant::now();
    for _ in 0..iterations {
        black_box(Sha256::digest(&buffer));
    }
    let elapsed = start.elapsed();

    scrub(&mut buffer);

    BenchmarkResult::Sha256 {
        hash_size_mb: BUFFER_MIB as u32,
        hash_time_ms: elapsed_ms(elapsed),
        iterations,
    }
}
