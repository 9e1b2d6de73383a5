//! # faasmark-core
//!
//! Core utilities and build information for the faasmark workspace.
//!
//! This crate provides foundational functionality that has no dependencies on
//! other workspace crates, making it safe to import anywhere.
//!
//! Benchmark samples are only comparable when the runtime that produced them
//! is identified, so the build metadata captured here flows into every
//! [`MetricsReport`] as the `runtimeName`/`runtimeVersion` attributes and is
//! printed by `faasmark info`.
//!
//! [`MetricsReport`]: https://docs.rs/faasmark-domain

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

/// Build-time information about the binary.
///
/// Captured at compile time; constant for the lifetime of the running
/// process, which is exactly the lifetime of one benchmark instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    /// Package name from Cargo.toml
    pub name: &'static str,

    /// Package version from Cargo.toml (semver)
    pub version: &'static str,

    /// Minimum Rust toolchain the workspace declares
    pub rustc_version: &'static str,

    /// Target triple (e.g., "x86_64-unknown-linux-gnu")
    pub target: &'static str,

    /// Build profile ("debug" or "release")
    pub profile: &'static str,
}

impl BuildInfo {
    /// Returns the runtime identifier attached to benchmark reports.
    ///
    /// Format: `name/version (target, profile)`.
    #[must_use]
    pub fn runtime_identifier(&self) -> String {
        format!(
            "{}/{} ({}, {})",
            self.name, self.version, self.target, self.profile
        )
    }

    /// Returns true if this is a debug build.
    #[must_use]
    pub const fn is_debug(&self) -> bool {
        matches!(self.profile.as_bytes(), b"debug")
    }

    /// Returns true if this is a release build.
    #[must_use]
    pub const fn is_release(&self) -> bool {
        matches!(self.profile.as_bytes(), b"release")
    }
}

/// Returns build-time information about the binary.
///
/// The values are deterministic and will not change during the lifetime of
/// the running process.
#[must_use]
pub const fn build_info() -> BuildInfo {
    BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        rustc_version: env!("CARGO_PKG_RUST_VERSION"),
        target: target_triple(),
        profile: if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        },
    }
}

/// Returns the target triple at compile time.
///
/// This uses cfg! macros to determine the target platform since
/// env!("TARGET") is only available in build scripts.
const fn target_triple() -> &'static str {
    #[cfg(all(target_arch = "x86_64", target_os = "macos"))]
    {
        "x86_64-apple-darwin"
    }

    #[cfg(all(target_arch = "aarch64", target_os = "macos"))]
    {
        "aarch64-apple-darwin"
    }

    #[cfg(all(target_arch = "x86_64", target_os = "linux", target_env = "gnu"))]
    {
        "x86_64-unknown-linux-gnu"
    }

    #[cfg(all(target_arch = "aarch64", target_os = "linux", target_env = "gnu"))]
    {
        "aarch64-unknown-linux-gnu"
    }

    #[cfg(all(target_arch = "x86_64", target_os = "windows", target_env = "msvc"))]
    {
        "x86_64-pc-windows-msvc"
    }

    #[cfg(not(any(
        all(target_arch = "x86_64", target_os = "macos"),
        all(target_arch = "aarch64", target_os = "macos"),
        all(target_arch = "x86_64", target_os = "linux", target_env = "gnu"),
        all(target_arch = "aarch64", target_os = "linux", target_env = "gnu"),
        all(target_arch = "x86_64", target_os = "windows", target_env = "msvc"),
    )))]
    {
        "unknown"
    }
}

// =============================================================================
// TESTS
// =============================================================================
