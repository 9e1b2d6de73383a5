//! # faasmark-shared
//!
//! Shared result types and error handling for the faasmark workspace.
//!
//! The error taxonomy mirrors how the measurement harness can fail:
//!
//! - `Expected` — malformed user input (bad key size, bad env value)
//! - `Invariant` — contract violations that make a report unreliable
//!   (inspector misuse, a JSON round trip that loses its `id`)
//! - `Unexpected` — I/O and serialization failures from below
//!
//! ## Design Principles
//!
//! 1. **No workspace dependencies** - This crate only depends on external crates
//! 2. **Serde-compatible** - Error envelopes serialize into error responses

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod errors;
pub mod result;

pub use errors::{ErrorCode, ErrorEnvelope, ErrorKind, ErrorMetadata};
pub use result::{Result, ResultExt};

/// Returns the shared crate version.
#[must_use]
pub const fn shared_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

// =============================================================================
// TESTS
// =============================================================================
