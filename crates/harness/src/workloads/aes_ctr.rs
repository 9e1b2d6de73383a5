//! Repeated AES-CTR encryption of a fixed seeded buffer.
//!
//! A load generator, not a crypto library: the key is freshly random per
//! run (OS RNG, never the seeded source) and the ciphertext is discarded.

use crate::bytes::{SeededByteSource, scrub};
use crate::workloads::{BYTES_PER_MIB, elapsed_ms};
use aes::cipher::{KeyIvInit, StreamCipher};
use faasmark_domain::{BenchmarkResult, KeySize};
use faasmark_shared::{ErrorCode, ErrorEnvelope, Result};
use rand::RngCore;
use rand::rngs::OsRng;
use std::time::Instant;

type Aes128Ctr = ctr::Ctr128BE<aes::Aes128>;
type Aes192Ctr = ctr::Ctr128BE<aes::Aes192>;
type Aes256Ctr = ctr::Ctr128BE<aes::Aes256>;

const BUFFER_MIB: usize = 8;
const IV_BYTES: usize = 16;

/// Encrypt one 8 MiB seeded buffer in counter mode, `iterations` times.
///
/// Each pass uses a fresh cipher over the same key and a zero
/// initialization vector, writing into a scratch buffer allocated outside
/// the measured region. Key, input, and scratch are scrubbed afterwards.
pub fn run(iterations: u32, key_size: KeySize, seed: u32) -> Result<BenchmarkResult> {
    let mut source = SeededByteSource::new(seed);
    let mut buffer = source.bytes(BUFFER_MIB * BYTES_PER_MIB);

    let mut key = vec![0_u8; key_size.bytes()];
    OsRng.fill_bytes(&mut key);
    let iv = [0_u8; IV_BYTES];
    let mut scratch = vec![0_u8; buffer.len()];

    let start = Instant::now();
    for _ in 0..iterations {
        encrypt_once(key_size, &key, &iv, &buffer, &mut scratch)?;
    }
    let elapsed = start.elapsed();

    scrub(&mut buffer);
    scrub(&mut scratch);
    scrub(&mut key);

    Ok(BenchmarkResult::AesCtr {
        encrypt_size_mb: BUFFER_MIB as u32,
        encrypt_time_ms: elapsed_ms(elapsed),
        key_size: key_size.bits(),
        iterations,
    })
}

fn encrypt_once(
    key_size: KeySize,
    key: &[u8],
    iv: &[u8],
    input: &[u8],
    output: &mut [u8],
) -> Result<()> {
    match key_size {
        KeySize::Bits128 => apply_keystream(Aes128Ctr::new_from_slices(key, iv), input, output),
        KeySize::Bits192 => apply_keystream(Aes192Ctr::new_from_slices(key, iv), input, output),
        KeySize::Bits256 => apply_keystream(Aes256Ctr::new_from_slices(key, iv), input, output),
    }
}

fn apply_keystream<C>(
    cipher: std::result::Result<C, aes::cipher::InvalidLength>,
    input: &[u8],
    output: &mut [u8],
) -> Result<()>
where
    C: StreamCipher,
{
    let mut cipher = cipher.map_err(|error| cipher_error(&error.to_string()))?;
    cipher
        .apply_keystream_b2b(input, output)
        .map_err(|error| cipher_error(&error.to_string()))
}

fn cipher_error(message: &str) -> ErrorEnvelope {
    ErrorEnvelope::unexpected(ErrorCode::new("workload", "cipher"), message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytes::DEFAULT_SEED;

    #[test]
    fn zero_iterations_reports_zero_work() -> Result<()> {
        let result = run(0, KeySize::default(), DEFAULT_SEED)?;

        assert!(matches!(
            result,
            BenchmarkResult::AesCtr {
                encrypt_size_mb: 8,
                key_size: 128,
                iterations: 0,
                ..
            }
        ));
        Ok(())
    }

    #[test]
    fn key_size_is_reported_in_bits() -> Result<()> {
        let result = run(1, KeySize::Bits256, DEFAULT_SEED)?;
        assert!(matches!(
            result,
            BenchmarkResult::AesCtr { key_size: 256, .. }
        ));
        Ok(())
    }

    #[test]
    fn keystream_round_trips_under_the_same_key() -> Result<()> {
        // CTR mode is its own inverse: applying the keystream twice with
        // the same key and IV restores the plaintext.
        let input = SeededByteSource::new(5).bytes(1024);
        let key = [7_u8; 16];
        let iv = [0_u8; IV_BYTES];

        let mut ciphertext = vec![0_u8; input.len()];
        encrypt_once(KeySize::Bits128, &key, &iv, &input, &mut ciphertext)?;
        assert_ne!(ciphertext, input);

        let mut plaintext = vec![0_u8; input.len()];
        encrypt_once(KeySize::Bits128, &key, &iv, &ciphertext, &mut plaintext)?;
        assert_eq!(plaintext, input);
        Ok(())
    }

    #[test]
    fn mismatched_key_length_is_rejected() {
        let input = [0_u8; 16];
        let mut output = [0_u8; 16];
        let short_key = [0_u8; 4];
        let iv = [0_u8; IV_BYTES];

        let error = encrypt_once(KeySize::Bits128, &short_key, &iv, &input, &mut output).err();
        assert!(error.is_some());
    }
}
