//! Repeated gzip compression of a fixed seeded buffer.

use crate::bytes::{SeededByteSource, scrub};
use crate::workloads::{BYTES_PER_MIB, elapsed_ms};
use faasmark_domain::BenchmarkResult;
use faasmark_shared::{ErrorEnvelope, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::hint::black_box;
use std::io::Write;
use std::time::Instant;

const BUFFER_MIB: usize = 4;

/// Compress one 4 MiB seeded buffer with gzip, `iterations` times,
/// discarding each compressed output.
pub fn run(iterations: u32, seed: u32) -> Result<BenchmarkResult> {
    let mut source = SeededByteSource::new(seed);
    let mut buffer = source.bytes(BUFFER_MIB * BYTES_PER_MIB);

    let start = Instant::now();
    for _ in 0..iterations {
        let compressed = compress_once(&buffer)?;
        black_box(compressed.len());
    }
    let elapsed = start.elapsed();

    scrub(&mut buffer);

    Ok(BenchmarkResult::Gzip {
        compress_size_mb: BUFFER_MIB as u32,
        compress_time_ms: elapsed_ms(elapsed),
        iterations,
    })
}

fn compress_once(input: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(
        Vec::with_capacity(input.len() / 2),
        Compression::default(),
    );
    encoder.write_all(input).map_err(ErrorEnvelope::from)?;
    encoder.finish().map_err(ErrorEnvelope::from)
}
