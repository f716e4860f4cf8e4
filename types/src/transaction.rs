//! Opaque transaction payload.

use serde::{Deserialize, Serialize};

/// A fully built and authorized transaction, carried as its exact binary
/// encoding. The view layer treats the contents as opaque; the id is the
/// content hash of these bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction(Vec<u8>);

impl Transaction {
    pub fn new(encoded: Vec<u8>) -> Self {
        Self(encoded)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
