//! Shared fixtures for the view integration tests.

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use shade_store::{MemStore, NoteRecord, TransactionRecord};
use shade_types::{
    Address, AddressIndex, Amount, AssetId, Commitment, Metadata, Nullifier, TransactionId,
    ValidatorInfo, Value,
};
use shade_view::{AddressProvider, ChainQuerier, ViewError, ViewService};
use std::collections::HashMap;
use std::sync::Arc;

/// Derives a stable fake address per account index.
pub struct FixedAddressProvider;

impl AddressProvider for FixedAddressProvider {
    fn address_by_index(&self, index: AddressIndex) -> Result<Address, ViewError> {
        Ok(Address::new(format!("shade1account{}", index.account)))
    }
}

/// In-memory chain querier. Configure the fields, then hand it to the
/// service; all lookups are served from them.
#[derive(Default)]
pub struct MockQuerier {
    pub metadata: HashMap<AssetId, Metadata>,
    pub validators: Vec<ValidatorInfo>,
    pub chain_tip: Option<u64>,
    /// Id to return from submission instead of echoing the content hash.
    pub submit_response: Option<TransactionId>,
    pub transactions: HashMap<TransactionId, TransactionRecord>,
}

#[async_trait]
impl ChainQuerier for MockQuerier {
    async fn asset_metadata_by_id(&self, id: &AssetId) -> Result<Option<Metadata>, ViewError> {
        Ok(self.metadata.get(id).cloned())
    }

    async fn validator_info(
        &self,
        show_inactive: bool,
    ) -> Result<BoxStream<'static, Result<ValidatorInfo, ViewError>>, ViewError> {
        let validators: Vec<Result<ValidatorInfo, ViewError>> = self
            .validators
            .iter()
            .filter(|v| show_inactive || v.active)
            .cloned()
            .map(Ok)
            .collect();
        Ok(futures_util::stream::iter(validators).boxed())
    }

    async fn latest_block_height(&self) -> Result<u64, ViewError> {
        self.chain_tip
            .ok_or_else(|| ViewError::Querier("chain tip unavailable".into()))
    }

    async fn submit_transaction(
        &self,
        transaction: &shade_types::Transaction,
    ) -> Result<TransactionId, ViewError> {
        Ok(self
            .submit_response
            .unwrap_or_else(|| shade_view::transaction_id(transaction)))
    }

    async fn get_transaction_by_id(
        &self,
        id: &TransactionId,
    ) -> Result<Option<TransactionRecord>, ViewError> {
        Ok(self.transactions.get(id).cloned())
    }
}

pub fn asset(byte: u8) -> AssetId {
    AssetId::new([byte; 32])
}

pub fn metadata(asset_id: AssetId, display: &str) -> Metadata {
    Metadata {
        asset_id,
        name: display.to_string(),
        symbol: display.to_uppercase(),
        display: display.to_string(),
        denom_exponent: 6,
        priority_score: 10,
    }
}

/// An unspent note. `tag` makes the commitment and nullifier unique.
pub fn note(account: u32, asset_id: AssetId, amount: u128, tag: u8) -> NoteRecord {
    NoteRecord {
        commitment: Commitment::new([tag; 32]),
        nullifier: Nullifier::new([tag ^ 0xff; 32]),
        address_index: AddressIndex::new(account),
        value: Value {
            asset_id,
            amount: Amount::from_u128(amount),
        },
        height_created: 1,
        height_spent: 0,
    }
}

pub fn service(
    store: Arc<MemStore>,
    querier: Arc<MockQuerier>,
) -> ViewService<MemStore, MockQuerier> {
    ViewService::new(store, querier, Arc::new(FixedAddressProvider))
}
