//! The record store trait.

use crate::error::StoreError;
use crate::records::{AppParams, NoteRecord, SwapRecord, TransactionRecord};
use crate::subscription::Subscription;
use async_trait::async_trait;
use shade_types::{AssetId, Commitment, EstimatedPrice, Metadata, Nullifier, TransactionId};

/// Read/subscribe interface over the wallet's local record store.
///
/// Point-in-time reads are snapshot-consistent; subscriptions deliver
/// appends in order and without gaps from the moment they are opened. Both
/// guarantees are the backend's contract.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All notes not yet consumed, in backend-defined order.
    async fn iterate_unspent_notes(&self) -> Result<Vec<NoteRecord>, StoreError>;

    async fn get_note_by_commitment(
        &self,
        commitment: &Commitment,
    ) -> Result<Option<NoteRecord>, StoreError>;

    async fn get_note_by_nullifier(
        &self,
        nullifier: &Nullifier,
    ) -> Result<Option<NoteRecord>, StoreError>;

    async fn get_swap_by_commitment(
        &self,
        commitment: &Commitment,
    ) -> Result<Option<SwapRecord>, StoreError>;

    async fn get_swap_by_nullifier(
        &self,
        nullifier: &Nullifier,
    ) -> Result<Option<SwapRecord>, StoreError>;

    async fn get_transaction_by_id(
        &self,
        id: &TransactionId,
    ) -> Result<Option<TransactionRecord>, StoreError>;

    /// Open a note-category subscription. Captures all note updates appended
    /// after this call returns.
    async fn subscribe_notes(&self) -> Subscription<NoteRecord>;

    async fn subscribe_swaps(&self) -> Subscription<SwapRecord>;

    async fn subscribe_transactions(&self) -> Subscription<TransactionRecord>;

    async fn get_asset_metadata(&self, id: &AssetId) -> Result<Option<Metadata>, StoreError>;

    /// Cache resolved metadata. Idempotent; safe to race with other writers.
    async fn save_asset_metadata(&self, metadata: Metadata) -> Result<(), StoreError>;

    /// Price observations for the asset that are still relevant at
    /// `latest_height`. The relevance window is derived from the epoch
    /// duration and is wider for delegation tokens.
    async fn get_prices_for_asset(
        &self,
        metadata: &Metadata,
        latest_height: u64,
        epoch_duration: u64,
    ) -> Result<Vec<EstimatedPrice>, StoreError>;

    async fn get_sync_height(&self) -> Result<Option<u64>, StoreError>;

    async fn get_app_params(&self) -> Result<Option<AppParams>, StoreError>;
}
