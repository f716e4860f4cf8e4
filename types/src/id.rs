//! Opaque record identifiers.
//!
//! A `Commitment` is published when a note or swap is created and is the only
//! handle to the record before its nullifier is revealed. A `Nullifier` is the
//! one-time value revealed when the record is spent or claimed. A
//! `TransactionId` is the content hash of a transaction's binary encoding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Binding published at note/swap creation time.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Commitment([u8; 32]);

impl Commitment {
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

impl fmt::Debug for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Commitment({})", crate::hexstr::encode(&self.0[..4]))
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::hexstr::encode(&self.0))
    }
}

/// One-time marker revealed when a note or swap is consumed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Nullifier([u8; 32]);

impl Nullifier {
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

impl fmt::Debug for Nullifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nullifier({})", crate::hexstr::encode(&self.0[..4]))
    }
}

impl fmt::Display for Nullifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::hexstr::encode(&self.0))
    }
}

/// Content hash of a transaction's exact binary encoding.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId([u8; 32]);

impl TransactionId {
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

impl fmt::Debug for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TransactionId({})", crate::hexstr::encode(&self.0[..4]))
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::hexstr::encode(&self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_full_hex() {
        let id = TransactionId::new([0xab; 32]);
        assert_eq!(id.to_string().len(), 64);
        assert!(id.to_string().starts_with("abab"));
    }

    #[test]
    fn debug_is_short() {
        let n = Nullifier::new([0x01; 32]);
        assert_eq!(format!("{n:?}"), "Nullifier(01010101)");
    }
}
