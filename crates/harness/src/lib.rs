//! # faasmark-harness
//!
//! The measurement harness: everything that runs between an adapter
//! receiving a request and the adapter serializing a report.
//!
//! - [`bytes`] — deterministic seeded byte source for workload inputs
//! - [`probes`] + [`fingerprint`] — resource snapshots and the static host
//!   fingerprint
//! - [`inspector`] — the single-use snapshot/delta report builder
//! - [`lifecycle`] — instance identity, the invocation counter, and the
//!   deliberate warm-instance kill switch
//! - [`workloads`] + [`registry`] — the five compute workloads and their
//!   dispatch
//! - [`config`] — environment-driven harness configuration
//!
//! Execution is single-threaded and synchronous: one invocation runs one
//! workload to completion. Nothing here blocks on I/O or supports
//! cancellation; deadline enforcement belongs to the hosting platform.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod bytes;
pub mod config;
pub mod fingerprint;
pub mod inspector;
pub mod lifecycle;
pub mod probes;
pub mod registry;
pub mod workloads;

pub use bytes::{DEFAULT_SEED, SeededByteSource, scrub};
pub use config::{HarnessConfig, DEFAULT_MAX_INVOCATIONS};
pub use inspector::MetricsInspector;
pub use lifecycle::{InstanceContext, Termination, should_terminate, terminate_instance_after};
pub use registry::{WorkloadRequest, run_workload};
