//! Domain primitives with validated constructors.

use faasmark_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Validation failures for domain primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// Cipher key size is not one of the supported widths.
    InvalidKeySize {
        /// Requested key size in bits.
        bits: u32,
    },
}

impl fmt::Display for PrimitiveError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidKeySize { .. } => {
                formatter.write_str("key size must be 128, 192, or 256 bits")
            },
        }
    }
}

impl std::error::Error for PrimitiveError {}

impl From<PrimitiveError> for ErrorEnvelope {
    fn from(error: PrimitiveError) -> Self {
        let envelope = Self::expected(
            ErrorCode::new("domain", "invalid_key_size"),
            error.to_string(),
        );
        match error {
            PrimitiveError::InvalidKeySize { bits } => {
                envelope.with_metadata("bits", bits.to_string())
            },
        }
    }
}

/// Random identifier minted once per process lifetime.
///
/// Attached to every report so samples from the same warm instance can be
/// grouped; a fresh id therefore marks a cold start.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstanceId(Box<str>);

impl InstanceId {
    /// Mint a new random identifier (UUID v4).
    #[must_use]
    pub fn mint() -> Self {
        Self(Uuid::new_v4().to_string().into_boxed_str())
    }

    /// Access the underlying string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for InstanceId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// AES key width for the cipher workload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum KeySize {
    /// 128-bit key (the documented default).
    #[default]
    Bits128,
    /// 192-bit key.
    Bits192,
    /// 256-bit key.
    Bits256,
}

impl KeySize {
    /// Key width in bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Bits128 => 128,
            Self::Bits192 => 192,
            Self::Bits256 => 256,
        }
    }

    /// Key width in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        (self.bits() / 8) as usize
    }

    /// Validate a key width given in bits.
    pub const fn from_bits(bits: u32) -> Result<Self, PrimitiveError> {
        match bits {
            128 => Ok(Self::Bits128),
            192 => Ok(Self::Bits192),
            256 => Ok(Self::Bits256),
            _ => Err(PrimitiveError::InvalidKeySize { bits }),
        }
    }
}

impl fmt::Display for KeySize {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.bits())
    }
}
