//! Record types held by the local store.

use serde::{Deserialize, Serialize};
use shade_types::{AddressIndex, Commitment, Nullifier, TransactionId, Value};

/// An owned value record decrypted during block scanning.
///
/// Belongs to exactly one account; carries one asset id and amount. The
/// nullifier is derived at scan time, but the record is only locatable by it
/// once the containing spend is seen on chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteRecord {
    pub commitment: Commitment,
    pub nullifier: Nullifier,
    pub address_index: AddressIndex,
    pub value: Value,
    pub height_created: u64,
    /// Height the note was consumed at; zero while unspent.
    #[serde(default)]
    pub height_spent: u64,
}

impl NoteRecord {
    pub fn is_spent(&self) -> bool {
        self.height_spent != 0
    }
}

/// A pending or claimed swap record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapRecord {
    pub commitment: Commitment,
    pub nullifier: Nullifier,
    pub address_index: AddressIndex,
    /// Height the swap output was claimed at; zero while unclaimed.
    #[serde(default)]
    pub height_claimed: u64,
}

impl SwapRecord {
    pub fn is_claimed(&self) -> bool {
        self.height_claimed != 0
    }
}

/// A transaction involving this wallet, recorded once detected on chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub height: u64,
}

/// Chain app parameters mirrored into the store during sync.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppParams {
    /// Blocks per epoch; bounds price-observation relevance.
    pub epoch_duration: u64,
}
