//! In-memory record store.
//!
//! Backend for tests and for embedders that do not persist. The write path
//! here stands in for the external sync process: each append updates the
//! tables and notifies every open subscription under the same lock, so a
//! subscription opened before an append always observes it.

use crate::error::StoreError;
use crate::records::{AppParams, NoteRecord, SwapRecord, TransactionRecord};
use crate::store::RecordStore;
use crate::subscription::{subscription_channel, Subscription, SubscriptionSender};
use async_trait::async_trait;
use shade_types::{
    parse_delegation, AssetId, Commitment, EstimatedPrice, Metadata, Nullifier, TransactionId,
};
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Default)]
struct Inner {
    notes: Vec<NoteRecord>,
    swaps: Vec<SwapRecord>,
    transactions: Vec<TransactionRecord>,
    assets: HashMap<AssetId, Metadata>,
    prices: Vec<EstimatedPrice>,
    sync_height: Option<u64>,
    app_params: Option<AppParams>,
    note_subs: Vec<SubscriptionSender<NoteRecord>>,
    swap_subs: Vec<SubscriptionSender<SwapRecord>>,
    tx_subs: Vec<SubscriptionSender<TransactionRecord>>,
}

#[derive(Default)]
pub struct MemStore {
    inner: Mutex<Inner>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a note record (keyed by commitment) and notify
    /// note subscribers.
    pub async fn put_note(&self, record: NoteRecord) {
        let mut inner = self.inner.lock().await;
        match inner
            .notes
            .iter()
            .position(|n| n.commitment == record.commitment)
        {
            Some(i) => inner.notes[i] = record.clone(),
            None => inner.notes.push(record.clone()),
        }
        inner.note_subs.retain(|tx| tx.send(record.clone()).is_ok());
    }

    /// Insert or replace a swap record (keyed by commitment) and notify
    /// swap subscribers.
    pub async fn put_swap(&self, record: SwapRecord) {
        let mut inner = self.inner.lock().await;
        match inner
            .swaps
            .iter()
            .position(|s| s.commitment == record.commitment)
        {
            Some(i) => inner.swaps[i] = record.clone(),
            None => inner.swaps.push(record.clone()),
        }
        inner.swap_subs.retain(|tx| tx.send(record.clone()).is_ok());
    }

    /// Insert or replace a transaction record and notify subscribers.
    pub async fn put_transaction(&self, record: TransactionRecord) {
        let mut inner = self.inner.lock().await;
        match inner.transactions.iter().position(|t| t.id == record.id) {
            Some(i) => inner.transactions[i] = record.clone(),
            None => inner.transactions.push(record.clone()),
        }
        inner.tx_subs.retain(|tx| tx.send(record.clone()).is_ok());
    }

    /// Record a price observation, replacing any previous observation for
    /// the same (priced asset, numeraire) pair.
    pub async fn update_price(&self, price: EstimatedPrice) {
        let mut inner = self.inner.lock().await;
        match inner
            .prices
            .iter()
            .position(|p| p.priced_asset == price.priced_asset && p.numeraire == price.numeraire)
        {
            Some(i) => inner.prices[i] = price,
            None => inner.prices.push(price),
        }
    }

    pub async fn set_sync_height(&self, height: u64) {
        self.inner.lock().await.sync_height = Some(height);
    }

    pub async fn set_app_params(&self, params: AppParams) {
        self.inner.lock().await.app_params = Some(params);
    }
}

/// Delegation prices stay meaningful longer than spot prices for ordinary
/// assets, so they get a wider relevance window.
fn price_relevance_window(metadata: &Metadata, epoch_duration: u64) -> u64 {
    if parse_delegation(&metadata.display).is_some() {
        epoch_duration.saturating_mul(2)
    } else {
        epoch_duration
    }
}

#[async_trait]
impl RecordStore for MemStore {
    async fn iterate_unspent_notes(&self) -> Result<Vec<NoteRecord>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .notes
            .iter()
            .filter(|n| !n.is_spent())
            .cloned()
            .collect())
    }

    async fn get_note_by_commitment(
        &self,
        commitment: &Commitment,
    ) -> Result<Option<NoteRecord>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .notes
            .iter()
            .find(|n| n.commitment == *commitment)
            .cloned())
    }

    async fn get_note_by_nullifier(
        &self,
        nullifier: &Nullifier,
    ) -> Result<Option<NoteRecord>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .notes
            .iter()
            .find(|n| n.nullifier == *nullifier)
            .cloned())
    }

    async fn get_swap_by_commitment(
        &self,
        commitment: &Commitment,
    ) -> Result<Option<SwapRecord>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .swaps
            .iter()
            .find(|s| s.commitment == *commitment)
            .cloned())
    }

    async fn get_swap_by_nullifier(
        &self,
        nullifier: &Nullifier,
    ) -> Result<Option<SwapRecord>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .swaps
            .iter()
            .find(|s| s.nullifier == *nullifier)
            .cloned())
    }

    async fn get_transaction_by_id(
        &self,
        id: &TransactionId,
    ) -> Result<Option<TransactionRecord>, StoreError> {
        let inner = self.inner.lock().await;
        Ok(inner.transactions.iter().find(|t| t.id == *id).cloned())
    }

    async fn subscribe_notes(&self) -> Subscription<NoteRecord> {
        let (tx, sub) = subscription_channel();
        self.inner.lock().await.note_subs.push(tx);
        sub
    }

    async fn subscribe_swaps(&self) -> Subscription<SwapRecord> {
        let (tx, sub) = subscription_channel();
        self.inner.lock().await.swap_subs.push(tx);
        sub
    }

    async fn subscribe_transactions(&self) -> Subscription<TransactionRecord> {
        let (tx, sub) = subscription_channel();
        self.inner.lock().await.tx_subs.push(tx);
        sub
    }

    async fn get_asset_metadata(&self, id: &AssetId) -> Result<Option<Metadata>, StoreError> {
        Ok(self.inner.lock().await.assets.get(id).cloned())
    }

    async fn save_asset_metadata(&self, metadata: Metadata) -> Result<(), StoreError> {
        self.inner
            .lock()
            .await
            .assets
            .insert(metadata.asset_id, metadata);
        Ok(())
    }

    async fn get_prices_for_asset(
        &self,
        metadata: &Metadata,
        latest_height: u64,
        epoch_duration: u64,
    ) -> Result<Vec<EstimatedPrice>, StoreError> {
        let window = price_relevance_window(metadata, epoch_duration);
        let min_height = latest_height.saturating_sub(window);
        let inner = self.inner.lock().await;
        Ok(inner
            .prices
            .iter()
            .filter(|p| p.priced_asset == metadata.asset_id && p.as_of_height >= min_height)
            .cloned()
            .collect())
    }

    async fn get_sync_height(&self) -> Result<Option<u64>, StoreError> {
        Ok(self.inner.lock().await.sync_height)
    }

    async fn get_app_params(&self) -> Result<Option<AppParams>, StoreError> {
        Ok(self.inner.lock().await.app_params.clone())
    }
}
