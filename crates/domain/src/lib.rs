//! # faasmark-domain
//!
//! Domain entities, value objects, and report types for the faasmark
//! workspace: metric values and ordered attribute maps, resource snapshots
//! and their deltas, the sealed per-invocation metrics report, the tagged
//! benchmark result sum type, and process-identity primitives.
//!
//! Everything here is plain data: construction and serialization, no
//! measurement. Capturing snapshots and producing reports is the harness
//! crate's job.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod benchmark;
pub mod primitives;
pub mod report;
pub mod snapshot;
pub mod value;

pub use benchmark::{BenchmarkResult, UnknownWorkload, WorkloadKind};
pub use primitives::{InstanceId, KeySize, PrimitiveError};
pub use report::{
    ATTR_BENCHMARK, ATTR_DELTAS, ATTR_INSTANCE_ID, ATTR_INVOCATION_COUNT, ATTR_PROVIDER,
    AttributeValue, MetricsReport,
};
pub use snapshot::{DeltaMap, ResourceSnapshot, compute_deltas};
pub use value::{AttributeMap, MetricValue};
