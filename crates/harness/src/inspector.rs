//! The single-use snapshot/delta metrics inspector.

use crate::probes::capture_snapshot;
use faasmark_domain::{
    ATTR_DELTAS, AttributeMap, AttributeValue, MetricsReport, ResourceSnapshot, compute_deltas,
};
use faasmark_shared::{ErrorCode, ErrorEnvelope, Result};

/// Inspector lifecycle states.
///
/// Operations are validated against the current state so the "call in
/// order, use once" contract is explicit instead of relying on caller
/// discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InspectorState {
    /// Constructed; no baseline captured yet.
    Idle,
    /// Baseline captured; attributes and deltas may be recorded.
    BaselineCaptured,
    /// Report produced; every further operation is a contract violation.
    Sealed,
}

impl InspectorState {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::BaselineCaptured => "baseline_captured",
            Self::Sealed => "sealed",
        }
    }
}

/// Wraps one workload invocation: baseline snapshot, caller attributes,
/// final snapshot deltas, sealed report.
///
/// Single-use. A fresh inspector must be constructed per invocation; the
/// correct call order is `inspect_all` → (workload + `add_attribute`
/// calls) → `inspect_all_deltas` → `finish`.
#[derive(Debug)]
pub struct MetricsInspector {
    state: InspectorState,
    attributes: AttributeMap<AttributeValue>,
    baseline: Option<ResourceSnapshot>,
}

impl MetricsInspector {
    /// Create an inspector for a single invocation.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: InspectorState::Idle,
            attributes: AttributeMap::new(),
            baseline: None,
        }
    }

    /// Capture the baseline resource snapshot.
    ///
    /// Must be the first operation. The static host fingerprint fields
    /// captured with the snapshot are recorded as report attributes right
    /// away; being text, they can never appear in the delta set.
    pub fn inspect_all(&mut self) -> Result<()> {
        if self.state != InspectorState::Idle {
            return Err(self.invalid_state("inspect_all"));
        }

        let baseline = capture_snapshot();
        for (key, value) in baseline.iter() {
            if !value.is_numeric() {
                self.attributes
                    .insert(key, AttributeValue::Text(value.to_string().into_boxed_str()));
            }
        }
        tracing::debug!(metrics = baseline.len(), "baseline snapshot captured");

        self.baseline = Some(baseline);
        self.state = InspectorState::BaselineCaptured;
        Ok(())
    }

    /// Insert or overwrite a named report attribute.
    ///
    /// Pure bookkeeping with no snapshot side effects; legal any time
    /// before `finish`.
    pub fn add_attribute(
        &mut self,
        key: impl AsRef<str>,
        value: impl Into<AttributeValue>,
    ) -> Result<()> {
        if self.state == InspectorState::Sealed {
            return Err(self.invalid_state("add_attribute"));
        }

        self.attributes.insert(key.as_ref(), value);
        Ok(())
    }

    /// Capture the final snapshot and record the numeric deltas under the
    /// reserved `deltas` attribute.
    pub fn inspect_all_deltas(&mut self) -> Result<()> {
        if self.state != InspectorState::BaselineCaptured {
            return Err(self.invalid_state("inspect_all_deltas"));
        }
        let Some(baseline) = self.baseline.as_ref() else {
            return Err(self.invalid_state("inspect_all_deltas"));
        };

        let latest = capture_snapshot();
        let deltas = compute_deltas(baseline, &latest);
        tracing::debug!(deltas = deltas.len(), "final snapshot captured");

        self.attributes.insert(ATTR_DELTAS, deltas);
        Ok(())
    }

    /// Seal the inspector and return the immutable report.
    ///
    /// The inspector is not reusable afterwards: every further call,
    /// including a second `finish`, fails with an invalid-state error.
    pub fn finish(&mut self) -> Result<MetricsReport> {
        if self.state != InspectorState::BaselineCaptured {
            return Err(self.invalid_state("finish"));
        }

        self.state = InspectorState::Sealed;
        let attributes = std::mem::take(&mut self.attributes);
        self.baseline = None;
        Ok(MetricsReport::seal(attributes))
    }

    fn invalid_state(&self, operation: &str) -> ErrorEnvelope {
        ErrorEnvelope::invariant(
            ErrorCode::invalid_state(),
            format!("{operation} is not legal in the current inspector state"),
        )
        .with_metadata("operation", operation)
        .with_metadata("state", self.state.as_str())
    }
}

impl Default for MetricsInspector {
    fn default() -> Self {
        Self::new()
    }
}
