//! Environment-driven harness configuration.
//!
//! Parsing is strict: an invalid value fails fast instead of silently
//! falling back, since a misconfigured campaign produces samples that look
//! valid but are not comparable.

use crate::bytes::DEFAULT_SEED;
use faasmark_shared::{ErrorCode, ErrorEnvelope, Result};
use std::collections::BTreeMap;

/// Env var: invocation threshold before deliberate termination.
pub const ENV_MAX_INVOCATIONS: &str = "FBM_MAX_INVOCATIONS";
/// Env var: seed for workload input buffers.
pub const ENV_SEED: &str = "FBM_SEED";
/// Env var: provider label stamped on every report.
pub const ENV_PROVIDER: &str = "FBM_PROVIDER";

/// Default invocation threshold before deliberate termination.
///
/// A tuning constant, not an invariant: four invocations per instance keeps
/// a usable cold/warm mix across a campaign.
pub const DEFAULT_MAX_INVOCATIONS: u32 = 4;

const DEFAULT_PROVIDER: &str = "local";

/// Resolved harness configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarnessConfig {
    /// Invocations served before the instance is deliberately killed.
    pub max_invocations: u32,
    /// Seed for deterministic workload input buffers.
    pub seed: u32,
    /// Provider label stamped on every report.
    pub provider: Box<str>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            max_invocations: DEFAULT_MAX_INVOCATIONS,
            seed: DEFAULT_SEED,
            provider: DEFAULT_PROVIDER.into(),
        }
    }
}

impl HarnessConfig {
    /// Build configuration from an environment map (`FBM_*` keys).
    ///
    /// Missing keys take defaults; present-but-invalid values fail with an
    /// `config:invalid_env` error naming the offending key.
    pub fn from_env_map(env: &BTreeMap<String, String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(raw) = env.get(ENV_MAX_INVOCATIONS) {
            config.max_invocations = parse_env_u32(ENV_MAX_INVOCATIONS, raw)?;
        }
        if let Some(raw) = env.get(ENV_SEED) {
            config.seed = parse_env_u32(ENV_SEED, raw)?;
        }
        if let Some(raw) = env.get(ENV_PROVIDER) {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(invalid_env(ENV_PROVIDER, raw, "must be non-empty"));
            }
            config.provider = trimmed.into();
        }

        Ok(config)
    }

    /// Build configuration from the process environment.
    pub fn from_process_env() -> Result<Self> {
        let env: BTreeMap<String, String> = std::env::vars()
            .filter(|(key, _)| key.starts_with("FBM_"))
            .collect();
        Self::from_env_map(&env)
    }
}

fn parse_env_u32(key: &str, raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| invalid_env(key, raw, "must be an unsigned integer"))
}

fn invalid_env(key: &str, value: &str, reason: &str) -> ErrorEnvelope {
    ErrorEnvelope::expected(ErrorCode::invalid_env(), format!("{key} {reason}"))
        .with_metadata("key", key)
        .with_metadata("value", value)
}
