//! Process resource probes and snapshot capture.
//!
//! Every probe returns `Option`: an unreadable metrics source is a
//! non-fatal omission and the affected field is simply absent from the
//! snapshot. Partial telemetry is still useful.

use crate::fingerprint::cpu_fingerprint;
use faasmark_domain::{MetricValue, ResourceSnapshot};
use std::fs;
use std::time::{SystemTime, UNIX_EPOCH};

/// Snapshot metric: wall-clock timestamp, milliseconds since the epoch.
pub const METRIC_TIMESTAMP_MS: &str = "timestampMs";
/// Snapshot metric: process CPU time (user + system), milliseconds.
pub const METRIC_CPU_TIME_MS: &str = "cpuTimeMs";
/// Snapshot metric: resident set size, kilobytes.
pub const METRIC_RESIDENT_MEMORY_KB: &str = "residentMemoryKb";

/// Capture a resource snapshot: wall clock, CPU time, resident memory, and
/// the static host fingerprint.
#[must_use]
pub fn capture_snapshot() -> ResourceSnapshot {
    let mut entries: Vec<(Box<str>, MetricValue)> = Vec::new();

    if let Some(timestamp) = wall_clock_ms() {
        entries.push((METRIC_TIMESTAMP_MS.into(), MetricValue::Unsigned(timestamp)));
    }
    if let Some(cpu) = cpu_time_ms() {
        entries.push((METRIC_CPU_TIME_MS.into(), MetricValue::Float(cpu)));
    }
    if let Some(resident) = resident_memory_kb() {
        entries.push((
            METRIC_RESIDENT_MEMORY_KB.into(),
            MetricValue::Unsigned(resident),
        ));
    }
    for (key, value) in cpu_fingerprint() {
        entries.push((key.clone(), MetricValue::Text(value.clone())));
    }

    ResourceSnapshot::from_entries(entries)
}

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn wall_clock_ms() -> Option<u64> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|elapsed| u64::try_from(elapsed.as_millis()).ok())
}

/// CPU time consumed by this process (user + system), in milliseconds.
///
/// Read from `/proc/self/stat`; `None` off Linux or when the file cannot be
/// parsed.
#[must_use]
pub fn cpu_time_ms() -> Option<f64> {
    let stat = fs::read_to_string("/proc/self/stat").ok()?;
    parse_cpu_ticks(&stat).map(|ticks| ticks * 1000.0 / clock_ticks_per_second())
}

/// Resident set size of this process, in kilobytes.
///
/// Read from `/proc/self/status` (`VmRSS`); `None` off Linux or when the
/// field is missing.
#[must_use]
pub fn resident_memory_kb() -> Option<u64> {
    let status = fs::read_to_string("/proc/self/status").ok()?;
    parse_vm_rss_kb(&status)
}

/// Sum utime + stime (clock ticks) from `/proc/<pid>/stat` content.
///
/// The command name can contain spaces and parentheses, so fields are
/// counted from the last `)`: state is field 0 of the remainder, utime and
/// stime are fields 11 and 12.
fn parse_cpu_ticks(stat: &str) -> Option<f64> {
    let after_comm = stat.rsplit_once(')')?.1;
    let mut fields = after_comm.split_whitespace();
    let utime: u64 = fields.nth(11)?.parse().ok()?;
    let stime: u64 = fields.next()?.parse().ok()?;
    Some((utime + stime) as f64)
}

fn parse_vm_rss_kb(status: &str) -> Option<u64> {
    status
        .lines()
        .find(|line| line.starts_with("VmRSS:"))?
        .split_whitespace()
        .nth(1)?
        .parse()
        .ok()
}

#[cfg(unix)]
#[allow(
    unsafe_code,
    reason = "sysconf is the portable way to read the kernel tick rate"
)]
fn clock_ticks_per_second() -> f64 {
    // SAFETY: sysconf has no memory-safety preconditions.
    let ticks = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    if ticks > 0 { ticks as f64 } else { 100.0 }
}

#[cfg(not(unix))]
fn clock_ticks_per_second() -> f64 {
    100.0
}
