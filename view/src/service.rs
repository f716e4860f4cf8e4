//! The view service facade.
//!
//! A `ViewService` is built from explicit store, querier, and address
//! handles; tests and embedders construct as many isolated instances as they
//! need. It exposes the read-model operations callers (RPC/UI) drive.

use crate::balances::{BalancesAggregator, BalancesFilter};
use crate::detect::watch_subscription;
use crate::error::ViewError;
use crate::querier::ChainQuerier;
use shade_store::{NoteRecord, RecordStore, SwapRecord, TransactionRecord};
use shade_types::{Address, AddressIndex, BalanceView, Commitment, Nullifier, TransactionId};
use std::sync::Arc;

/// Address-by-index collaborator: derives the address for one sub-wallet.
/// Key material lives with the custody layer, behind this seam.
pub trait AddressProvider: Send + Sync {
    fn address_by_index(&self, index: AddressIndex) -> Result<Address, ViewError>;
}

/// The view core's entry point.
pub struct ViewService<S, Q> {
    store: Arc<S>,
    querier: Arc<Q>,
    addresses: Arc<dyn AddressProvider>,
}

impl<S, Q> ViewService<S, Q>
where
    S: RecordStore,
    Q: ChainQuerier,
{
    pub fn new(store: Arc<S>, querier: Arc<Q>, addresses: Arc<dyn AddressProvider>) -> Self {
        Self {
            store,
            querier,
            addresses,
        }
    }

    pub(crate) fn store(&self) -> &S {
        &self.store
    }

    pub(crate) fn querier(&self) -> &Q {
        &self.querier
    }

    pub(crate) fn addresses(&self) -> &dyn AddressProvider {
        &*self.addresses
    }

    // ── Balances ────────────────────────────────────────────────────────

    /// Aggregate all unspent, nonzero notes into per-(account, asset)
    /// balance views, then apply the filters.
    pub async fn balances(&self, filter: BalancesFilter) -> Result<Vec<BalanceView>, ViewError> {
        // The chain tip is preferred over the local sync height for the
        // price-relevance anchor, so stale prices are not surfaced while a
        // sync is still catching up.
        let latest_known_height = match self.querier.latest_block_height().await {
            Ok(height) => height,
            Err(err) => {
                tracing::debug!(%err, "chain tip unavailable, using local sync height");
                self.store.get_sync_height().await?.unwrap_or(0)
            }
        };
        let epoch_duration = self
            .store
            .get_app_params()
            .await?
            .map(|params| params.epoch_duration);

        let mut aggregator = BalancesAggregator::new(
            &*self.store,
            &*self.querier,
            &*self.addresses,
            latest_known_height,
            epoch_duration,
        );

        for record in self.store.iterate_unspent_notes().await? {
            if record.is_spent() || record.value.amount.is_zero() {
                continue;
            }
            aggregator.add(&record).await?;
        }

        Ok(aggregator.into_filtered(filter))
    }

    // ── Detection ───────────────────────────────────────────────────────

    /// Look up a note by its commitment, optionally waiting for it to be
    /// detected.
    pub async fn note_by_commitment(
        &self,
        commitment: Commitment,
        await_detection: bool,
    ) -> Result<NoteRecord, ViewError> {
        // Subscribe before checking: a note landing between the check and
        // the wait is captured by the already-open subscription.
        let subscription = self.store.subscribe_notes().await;

        if let Some(note) = self.store.get_note_by_commitment(&commitment).await? {
            return Ok(note);
        }
        if !await_detection {
            return Err(ViewError::NotFound("note"));
        }

        watch_subscription(subscription, "note", |note: &NoteRecord| {
            (note.commitment == commitment).then(|| note.clone())
        })
        .await
    }

    /// Look up a swap by its commitment, optionally waiting for it to be
    /// detected.
    pub async fn swap_by_commitment(
        &self,
        commitment: Commitment,
        await_detection: bool,
    ) -> Result<SwapRecord, ViewError> {
        let subscription = self.store.subscribe_swaps().await;

        if let Some(swap) = self.store.get_swap_by_commitment(&commitment).await? {
            return Ok(swap);
        }
        if !await_detection {
            return Err(ViewError::NotFound("swap"));
        }

        watch_subscription(subscription, "swap", |swap: &SwapRecord| {
            (swap.commitment == commitment).then(|| swap.clone())
        })
        .await
    }

    /// Whether the nullifier has been used. With `await_detection`, an
    /// unspent result waits until the spend (or claim) is detected in
    /// either record category.
    pub async fn nullifier_status(
        &self,
        nullifier: Nullifier,
        await_detection: bool,
    ) -> Result<bool, ViewError> {
        let note_subscription = self.store.subscribe_notes().await;
        let swap_subscription = self.store.subscribe_swaps().await;

        let note = self.store.get_note_by_nullifier(&nullifier).await?;
        let swap = self.store.get_swap_by_nullifier(&nullifier).await?;
        let spent = swap.map_or(false, |s| s.is_claimed()) || note.map_or(false, |n| n.is_spent());

        if spent || !await_detection {
            return Ok(spent);
        }

        // Race both categories; whichever detects the nullifier first wins.
        // A record merely carrying the nullifier is not enough: the spend
        // (or claim) height must be set.
        let note_watch = watch_subscription(note_subscription, "note", |note: &NoteRecord| {
            (note.is_spent() && note.nullifier == nullifier).then_some(())
        });
        let swap_watch = watch_subscription(swap_subscription, "swap", |swap: &SwapRecord| {
            (swap.is_claimed() && swap.nullifier == nullifier).then_some(())
        });

        futures_util::future::select_ok([
            Box::pin(note_watch) as futures_util::future::BoxFuture<'_, Result<(), ViewError>>,
            Box::pin(swap_watch),
        ])
        .await?;
        Ok(true)
    }

    // ── Transactions ────────────────────────────────────────────────────

    /// Look up a transaction record, falling back to the remote querier
    /// when the local store has not detected it yet.
    pub async fn transaction_by_id(
        &self,
        id: &TransactionId,
    ) -> Result<Option<TransactionRecord>, ViewError> {
        if let Some(record) = self.store.get_transaction_by_id(id).await? {
            return Ok(Some(record));
        }
        self.querier.get_transaction_by_id(id).await
    }
}
