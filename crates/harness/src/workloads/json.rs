//! JSON serialize/parse round trips over a deterministic nested value.

use crate::bytes::SeededByteSource;
use crate::workloads::{BYTES_PER_MIB, elapsed_ms};
use faasmark_domain::BenchmarkResult;
use faasmark_shared::{ErrorCode, ErrorEnvelope, Result};
use serde_json::{Map, Value, json};
use std::hint::black_box;
use std::time::Instant;

const DEPTH: usize = 5;
const BREADTH: usize = 4;

/// Serialize a deterministic deeply nested value to text and parse it back,
/// `iterations` times, verifying after each parse that the root `id`
/// survived the round trip.
///
/// Losing `id` is not a recoverable, per-iteration condition: it indicates
/// a serialization-layer defect, so the whole invocation aborts.
pub fn run(iterations: u32, seed: u32) -> Result<BenchmarkResult> {
    let mut source = SeededByteSource::new(seed);
    let data = build_value(DEPTH, BREADTH, &mut source);

    let start = Instant::now();
    let mut total_bytes: u64 = 0;
    for _ in 0..iterations {
        let text = serde_json::to_string(&data).map_err(serialization_error)?;
        total_bytes += text.len() as u64;
        black_box(parse_and_verify(&text)?);
    }
    let elapsed = start.elapsed();

    let seconds = elapsed.as_secs_f64();
    let throughput_mbps = if total_bytes == 0 || seconds <= 0.0 {
        0.0
    } else {
        (total_bytes as f64 / BYTES_PER_MIB as f64) / seconds
    };

    Ok(BenchmarkResult::Json {
        throughput_mbps,
        json_time_ms: elapsed_ms(elapsed),
        iterations,
    })
}

/// Parse serialized text back and verify the root `id` field survived.
pub(crate) fn parse_and_verify(text: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(text).map_err(serialization_error)?;
    if value.get("id").is_none() {
        return Err(ErrorEnvelope::invariant(
            ErrorCode::roundtrip_integrity(),
            "round trip lost the id field",
        ));
    }
    Ok(value)
}

/// Build the nested benchmark value: `breadth` children per object node
/// down to `depth`, each leaf a seeded string, each object node carrying an
/// `id`, a boolean flag, and a fixed tag array.
fn build_value(depth: usize, breadth: usize, source: &mut SeededByteSource) -> Value {
    if depth == 0 {
        return Value::String(format!("Leaf string data {}", next_fraction(source)));
    }

    let mut node = Map::new();
    for index in 0..breadth {
        node.insert(format!("key_{index}"), build_value(depth - 1, breadth, source));
    }
    node.insert("id".to_owned(), json!(next_fraction(source)));
    node.insert("isActive".to_owned(), json!(true));
    node.insert("tags".to_owned(), json!([1, 2, 3, "tag"]));
    Value::Object(node)
}

/// Deterministic fraction in [0, 1) derived from the byte source.
fn next_fraction(source: &mut SeededByteSource) -> f64 {
    let mut bytes = [0_u8; 8];
    source.fill(&mut bytes);
    let numerator = u64::from_le_bytes(bytes) >> 11;
    numerator as f64 / (1_u64 << 53) as f64
}

fn serialization_error(error: serde_json::Error) -> ErrorEnvelope {
    ErrorEnvelope::unexpected(ErrorCode::serialization(), error.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bytes::DEFAULT_SEED;

    #[test]
    fn zero_iterations_reports_zero_throughput() -> Result<()> {
        let result = run(0, DEFAULT_SEED)?;

        assert!(matches!(
            result,
            BenchmarkResult::Json {
                iterations: 0,
                throughput_mbps,
                ..
            } if throughput_mbps == 0.0
        ));
        Ok(())
    }

    #[test]
    fn nested_value_is_deterministic_per_seed() {
        let first = build_value(DEPTH, BREADTH, &mut SeededByteSource::new(9));
        let second = build_value(DEPTH, BREADTH, &mut SeededByteSource::new(9));

        assert_eq!(first, second);
    }

    #[test]
    fn object_nodes_carry_id_flag_and_tags() {
        let value = build_value(2, 2, &mut SeededByteSource::default());

        assert!(value.get("id").is_some_and(Value::is_f64));
        assert_eq!(value.get("isActive"), Some(&json!(true)));
        assert_eq!(value.get("tags"), Some(&json!([1, 2, 3, "tag"])));
        assert!(value.get("key_0").is_some_and(Value::is_object));
    }

    #[test]
    fn leaves_are_seeded_strings_at_full_depth() {
        let value = build_value(1, 1, &mut SeededByteSource::default());
        let leaf = value.get("key_0").and_then(Value::as_str);

        assert!(leaf.is_some_and(|text| text.starts_with("Leaf string data ")));
    }

    #[test]
    fn losing_the_id_field_is_fatal() {
        // Corrupt the serialized form: drop the root id before parsing.
        let mut source = SeededByteSource::default();
        let data = build_value(2, 2, &mut source);
        let Value::Object(mut node) = data else {
            unreachable!("build_value returns an object above depth 0");
        };
        node.remove("id");
        let corrupted =
            serde_json::to_string(&Value::Object(node)).map_err(serialization_error);

        let Ok(corrupted) = corrupted else {
            unreachable!("serialization of a plain object succeeds");
        };
        let error = parse_and_verify(&corrupted).err();
        let Some(error) = error else {
            unreachable!("missing id must be rejected");
        };
        assert!(error.is_invariant());
        assert_eq!(error.code, ErrorCode::roundtrip_integrity());
    }

    #[test]
    fn intact_round_trip_preserves_the_id() -> Result<()> {
        let data = build_value(2, 2, &mut SeededByteSource::default());
        let text = serde_json::to_string(&data).map_err(serialization_error)?;

        let parsed = parse_and_verify(&text)?;
        assert_eq!(parsed.get("id"), data.get("id"));
        Ok(())
    }

    #[test]
    fn fractions_stay_in_unit_interval() {
        let mut source = SeededByteSource::default();
        for _ in 0..64 {
            let fraction = next_fraction(&mut source);
            assert!((0.0..1.0).contains(&fraction));
        }
    }
}
