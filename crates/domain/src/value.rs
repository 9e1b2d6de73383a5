//! Metric values and the insertion-ordered attribute map.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A single metric value captured from the host or supplied by a caller.
///
/// Serializes untagged: numbers stay numbers, text stays text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    /// Unsigned integer metric (timestamps, byte counts).
    Unsigned(u64),
    /// Floating-point metric (CPU time, elapsed milliseconds).
    Float(f64),
    /// Textual metric (host fingerprint fields).
    Text(Box<str>),
}

impl MetricValue {
    /// Returns true for numeric variants.
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Unsigned(_) | Self::Float(_))
    }

    /// Numeric view of the value; `None` for text.
    ///
    /// Deltas only make sense for quantities that change, so text fields
    /// are invisible to delta computation.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Unsigned(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Text(_) => None,
        }
    }
}

impl From<u64> for MetricValue {
    fn from(value: u64) -> Self {
        Self::Unsigned(value)
    }
}

impl From<f64> for MetricValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for MetricValue {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl From<Box<str>> for MetricValue {
    fn from(value: Box<str>) -> Self {
        Self::Text(value)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsigned(value) => write!(formatter, "{value}"),
            Self::Float(value) => write!(formatter, "{value}"),
            Self::Text(value) => formatter.write_str(value),
        }
    }
}

/// Insertion-ordered string-keyed map with last-write-wins semantics.
///
/// Reports and snapshots both guarantee that attributes serialize in the
/// order they were first inserted; overwriting a key updates the value in
/// place and keeps the original position. A `BTreeMap` would re-sort keys,
/// so this is a small purpose-built container instead.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeMap<V> {
    entries: Vec<(Box<str>, V)>,
}

impl<V> Default for AttributeMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> AttributeMap<V> {
    /// Create an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or overwrite a value; the first insertion fixes the position.
    pub fn insert(&mut self, key: impl AsRef<str>, value: impl Into<V>) {
        let key = key.as_ref();
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| &**name == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key.into(), value)),
        }
    }

    /// Look up a value by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(name, _)| &**name == key)
            .map(|(_, value)| value)
    }

    /// Returns true when the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the map holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(key, value)| (&**key, value))
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| &**key)
    }
}

impl<V: Serialize> Serialize for AttributeMap<V> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(&**key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_preserved() {
        let mut map: AttributeMap<MetricValue> = AttributeMap::new();
        map.insert("zebra", 1_u64);
        map.insert("alpha", 2_u64);
        map.insert("mango", 3_u64);

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["zebra", "alpha", "mango"]);
    }

    #[test]
    fn last_write_wins_keeps_position() {
        let mut map: AttributeMap<MetricValue> = AttributeMap::new();
        map.insert("first", 1_u64);
        map.insert("second", 2_u64);
        map.insert("first", 9_u64);

        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["first", "second"]);
        assert_eq!(map.get("first"), Some(&MetricValue::Unsigned(9)));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn serializes_as_ordered_object() -> Result<(), serde_json::Error> {
        let mut map: AttributeMap<MetricValue> = AttributeMap::new();
        map.insert("b", 1_u64);
        map.insert("a", "text");

        let rendered = serde_json::to_string(&map)?;
        assert_eq!(rendered, r#"{"b":1,"a":"text"}"#);
        Ok(())
    }

    #[test]
    fn metric_value_numeric_view() {
        assert_eq!(MetricValue::Unsigned(4).as_f64(), Some(4.0));
        assert_eq!(MetricValue::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(MetricValue::from("cpu").as_f64(), None);
        assert!(!MetricValue::from("cpu").is_numeric());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn insert_sequence_keeps_first_position_per_key(
                writes in prop::collection::vec(("[a-d]", 0_u64..100), 1..32)
            ) {
                let mut map: AttributeMap<MetricValue> = AttributeMap::new();
                for (key, value) in &writes {
                    map.insert(key, *value);
                }

                // Positions follow first occurrence, values follow last.
                let mut expected_keys: Vec<&str> = Vec::new();
                for (key, _) in &writes {
                    if !expected_keys.contains(&key.as_str()) {
                        expected_keys.push(key);
                    }
                }
                let actual_keys: Vec<&str> = map.keys().collect();
                prop_assert_eq!(actual_keys, expected_keys);

                if let Some((key, value)) = writes.last() {
                    prop_assert_eq!(map.get(key), Some(&MetricValue::Unsigned(*value)));
                }
            }
        }
    }
}
