//! Dense square matrix multiplication workload.

use crate::workloads::elapsed_ms;
use faasmark_domain::BenchmarkResult;
use std::hint::black_box;
use std::time::Instant;

const SEED_A: f64 = 42.0;
const SEED_B: f64 = 99.0;

/// Run one dense O(N³) multiply of two seeded N×N matrices.
///
/// A non-positive size short-circuits to a zero-cost result without
/// constructing any matrix.
#[must_use]
pub fn run(matrix_size: i64) -> BenchmarkResult {
    if matrix_size <= 0 {
        return BenchmarkResult::Gemm {
            matrix_size: 0,
            multiplication_time_ms: 0.0,
        };
    }

    let size = usize::try_from(matrix_size).unwrap_or(0);
    let a = build_matrix(size, SEED_A);
    let b = build_matrix(size, SEED_B);

    let start = Instant::now();
    let product = multiply(&a, &b);
    let elapsed = start.elapsed();
    black_box(product);

    BenchmarkResult::Gemm {
        matrix_size: u32::try_from(matrix_size).unwrap_or(u32::MAX),
        multiplication_time_ms: elapsed_ms(elapsed),
    }
}

/// Build an N×N matrix from the deterministic formula `(i+1)*(j+1)+seed`.
fn build_matrix(size: usize, seed: f64) -> Vec<Vec<f64>> {
    (0..size)
        .map(|i| {
            (0..size)
                .map(|j| ((i + 1) * (j + 1)) as f64 + seed)
                .collect()
        })
        .collect()
}

fn multiply(a: &[Vec<f64>], b: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let size = a.len();
    let mut result = vec![vec![0.0; size]; size];
    for (i, row) in a.iter().enumerate() {
        for j in 0..size {
            let mut sum = 0.0;
            for (k, value) in row.iter().enumerate() {
                sum += value * b.get(k).and_then(|row| row.get(j)).copied().unwrap_or(0.0);
            }
            if let Some(slot) = result.get_mut(i).and_then(|row| row.get_mut(j)) {
                *slot = sum;
            }
        }
    }
    result
}
