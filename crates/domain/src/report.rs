//! The per-invocation metrics report.

use crate::benchmark::BenchmarkResult;
use crate::snapshot::DeltaMap;
use crate::value::AttributeMap;
use serde::Serialize;

/// Reserved attribute: platform name, set by the adapter.
pub const ATTR_PROVIDER: &str = "provider";
/// Reserved attribute: instance identity, minted once per process.
pub const ATTR_INSTANCE_ID: &str = "instanceId";
/// Reserved attribute: current invocation counter value.
pub const ATTR_INVOCATION_COUNT: &str = "invocationCount";
/// Reserved attribute: the embedded benchmark result.
pub const ATTR_BENCHMARK: &str = "benchmark";
/// Reserved attribute: numeric snapshot differences.
pub const ATTR_DELTAS: &str = "deltas";

/// A value held in the report's attribute mapping.
///
/// Serializes untagged, so reports render as plain JSON objects: scalars
/// stay scalars, the benchmark result and the delta map nest as objects.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Unsigned integer attribute (invocation count).
    Unsigned(u64),
    /// Floating-point attribute.
    Float(f64),
    /// Text attribute (provider, instance id, fingerprint fields).
    Text(Box<str>),
    /// The embedded benchmark result.
    Benchmark(BenchmarkResult),
    /// The nested delta mapping.
    Deltas(DeltaMap),
}

impl From<u32> for AttributeValue {
    fn from(value: u32) -> Self {
        Self::Unsigned(u64::from(value))
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        Self::Text(value.into_boxed_str())
    }
}

impl From<Box<str>> for AttributeValue {
    fn from(value: Box<str>) -> Self {
        Self::Text(value)
    }
}

impl From<BenchmarkResult> for AttributeValue {
    fn from(value: BenchmarkResult) -> Self {
        Self::Benchmark(value)
    }
}

impl From<DeltaMap> for AttributeValue {
    fn from(value: DeltaMap) -> Self {
        Self::Deltas(value)
    }
}

/// The single artifact returned per invocation.
///
/// An insertion-ordered attribute mapping, sealed exactly once by the
/// inspector's `finish`. Always embeds exactly one benchmark result plus
/// the reserved `deltas` field; everything else is caller bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MetricsReport {
    attributes: AttributeMap<AttributeValue>,
}

impl MetricsReport {
    /// Seal an attribute mapping into a finished report.
    #[must_use]
    pub const fn seal(attributes: AttributeMap<AttributeValue>) -> Self {
        Self { attributes }
    }

    /// Look up an attribute by name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }

    /// Iterate attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter()
    }

    /// Number of attributes, reserved fields included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns true when the report carries no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
