//! Asset identifiers and display metadata.

use crate::amount::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque fixed-length asset identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId([u8; 32]);

impl AssetId {
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

impl fmt::Debug for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AssetId({})", crate::hexstr::encode(&self.0[..4]))
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::hexstr::encode(&self.0))
    }
}

/// Display metadata for a known asset.
///
/// A balance bucket either has full metadata (known asset) or only the asset
/// id (unknown asset); the two are never mixed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub asset_id: AssetId,
    /// Human-readable asset name.
    pub name: String,
    /// Short ticker-style symbol.
    pub symbol: String,
    /// Display denomination, e.g. `shade` or `delegation_<identity>`.
    pub display: String,
    /// Power of ten between the base unit and the display unit.
    pub denom_exponent: u8,
    /// Ordering score used by callers when listing assets.
    pub priority_score: u64,
}

/// An asset id together with an amount of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Value {
    pub asset_id: AssetId,
    pub amount: Amount,
}
