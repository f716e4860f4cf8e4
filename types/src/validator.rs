//! Validator identity and descriptive metadata.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A validator's identity key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityKey([u8; 32]);

impl IdentityKey {
    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse the hex form produced by `Display`.
    pub fn parse(s: &str) -> Option<Self> {
        crate::hexstr::decode32(s).map(Self)
    }
}

impl fmt::Debug for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentityKey({})", crate::hexstr::encode(&self.0[..4]))
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::hexstr::encode(&self.0))
    }
}

/// Descriptive information about one validator, as streamed from the chain.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValidatorInfo {
    pub identity_key: IdentityKey,
    pub name: String,
    /// Whether the validator is in the active set.
    pub active: bool,
}
