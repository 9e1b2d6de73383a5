//! Resource snapshots and snapshot deltas.

use crate::value::{AttributeMap, MetricValue};
use serde::Serialize;

/// Numeric differences between two snapshots, keyed by metric name.
pub type DeltaMap = AttributeMap<f64>;

/// Immutable point-in-time capture of process resource metrics.
///
/// Holds both numeric quantities (wall clock, CPU time, resident memory)
/// and static text fields (host fingerprint). Created at well-defined
/// instants by the inspector; never mutated after construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResourceSnapshot {
    metrics: AttributeMap<MetricValue>,
}

impl ResourceSnapshot {
    /// Build a snapshot from probe output, preserving probe order.
    ///
    /// Duplicate keys collapse last-write-wins, matching the attribute map
    /// contract.
    #[must_use]
    pub fn from_entries(entries: Vec<(Box<str>, MetricValue)>) -> Self {
        let mut metrics = AttributeMap::new();
        for (key, value) in entries {
            metrics.insert(key, value);
        }
        Self { metrics }
    }

    /// Look up a metric by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&MetricValue> {
        self.metrics.get(key)
    }

    /// Iterate metrics in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetricValue)> {
        self.metrics.iter()
    }

    /// Number of captured metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Returns true when the snapshot captured nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

/// Compute `latest - baseline` for every metric that is numeric in both
/// snapshots.
///
/// Non-numeric fields (host fingerprint strings) are excluded: deltas only
/// make sense for quantities that change. Keys follow the baseline's
/// capture order.
#[must_use]
pub fn compute_deltas(baseline: &ResourceSnapshot, latest: &ResourceSnapshot) -> DeltaMap {
    let mut deltas = DeltaMap::new();
    for (key, value) in baseline.iter() {
        let Some(base) = value.as_f64() else {
            continue;
        };
        let Some(end) = latest.get(key).and_then(MetricValue::as_f64) else {
            continue;
        };
        deltas.insert(key, end - base);
    }
    deltas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(entries: Vec<(&str, MetricValue)>) -> ResourceSnapshot {
        ResourceSnapshot::from_entries(
            entries
                .into_iter()
                .map(|(key, value)| (Box::from(key), value))
                .collect(),
        )
    }

    #[test]
    fn deltas_cover_numeric_fields_only() {
        let baseline = snapshot(vec![
            ("a", MetricValue::Unsigned(10)),
            ("b", MetricValue::from("x")),
        ]);
        let latest = snapshot(vec![
            ("a", MetricValue::Unsigned(15)),
            ("b", MetricValue::from("y")),
        ]);

        let deltas = compute_deltas(&baseline, &latest);
        assert_eq!(deltas.len(), 1);
        assert_eq!(deltas.get("a"), Some(&5.0));
        assert!(deltas.get("b").is_none());
    }

    #[test]
    fn deltas_skip_keys_missing_from_latest() {
        let baseline = snapshot(vec![
            ("cpuTimeMs", MetricValue::Float(12.5)),
            ("residentMemoryKb", MetricValue::Unsigned(2048)),
        ]);
        let latest = snapshot(vec![("cpuTimeMs", MetricValue::Float(20.0))]);

        let deltas = compute_deltas(&baseline, &latest);
        assert_eq!(deltas.get("cpuTimeMs"), Some(&7.5));
        assert!(deltas.get("residentMemoryKb").is_none());
    }

    #[test]
    fn deltas_can_be_negative() {
        let baseline = snapshot(vec![("residentMemoryKb", MetricValue::Unsigned(4096))]);
        let latest = snapshot(vec![("residentMemoryKb", MetricValue::Unsigned(1024))]);

        let deltas = compute_deltas(&baseline, &latest);
        assert_eq!(deltas.get("residentMemoryKb"), Some(&-3072.0));
    }

    #[test]
    fn delta_order_follows_baseline_capture_order() {
        let baseline = snapshot(vec![
            ("timestampMs", MetricValue::Unsigned(100)),
            ("cpuTimeMs", MetricValue::Float(1.0)),
        ]);
        let latest = snapshot(vec![
            ("cpuTimeMs", MetricValue::Float(2.0)),
            ("timestampMs", MetricValue::Unsigned(150)),
        ]);

        let deltas = compute_deltas(&baseline, &latest);
        let keys: Vec<&str> = deltas.keys().collect();
        assert_eq!(keys, vec!["timestampMs", "cpuTimeMs"]);
    }

    #[test]
    fn snapshot_collapses_duplicate_probe_keys() {
        let captured = snapshot(vec![
            ("timestampMs", MetricValue::Unsigned(1)),
            ("timestampMs", MetricValue::Unsigned(2)),
        ]);
        assert_eq!(captured.len(), 1);
        assert_eq!(captured.get("timestampMs"), Some(&MetricValue::Unsigned(2)));
    }
}
