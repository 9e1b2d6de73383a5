//! Static host fingerprint, gathered once per process.

use std::fs;
use std::sync::OnceLock;

const CPUINFO_PATH: &str = "/proc/cpuinfo";

static CPU_FINGERPRINT: OnceLock<Vec<(Box<str>, Box<str>)>> = OnceLock::new();

/// Key/value fingerprint of the first processor block in `/proc/cpuinfo`.
///
/// Gathered once per process lifetime and cached. An unreadable source is a
/// non-fatal omission: the fingerprint is simply empty and reports carry no
/// host fields.
pub fn cpu_fingerprint() -> &'static [(Box<str>, Box<str>)] {
    CPU_FINGERPRINT.get_or_init(|| {
        fs::read_to_string(CPUINFO_PATH)
            .map(|data| parse_first_processor(&data))
            .unwrap_or_default()
    })
}

fn parse_first_processor(data: &str) -> Vec<(Box<str>, Box<str>)> {
    let first_block = data.split("\n\n").next().unwrap_or_default();
    first_block
        .lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            let value = value.trim();
            if key.is_empty() || value.is_empty() {
                return None;
            }
            Some((fingerprint_key(key).into_boxed_str(), Box::from(value)))
        })
        .collect()
}

/// Normalize a cpuinfo key into a camelCase attribute name with a `cpu`
/// prefix: `model name` → `cpuModelName`, `vendor_id` → `cpuVendorId`.
fn fingerprint_key(raw: &str) -> String {
    let mut tokens = raw
        .split(|ch: char| ch.is_whitespace() || ch == '_')
        .filter(|token| !token.is_empty());

    let mut key = String::from("cpu");
    for token in tokens.by_ref() {
        if key == "cpu" && token.eq_ignore_ascii_case("cpu") {
            continue;
        }
        let mut chars = token.chars();
        if let Some(first) = chars.next() {
            key.extend(first.to_uppercase());
            key.push_str(chars.as_str());
        }
    }
    key
}
