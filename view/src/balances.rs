//! Balance aggregation.
//!
//! Folds unspent, nonzero note records into one bucket per (account, asset)
//! pair. Buckets are created lazily: the first record for a pair resolves
//! the owning account's address view and the asset's metadata (local cache
//! first, then the remote querier), and loads the asset's still-relevant
//! price observations. Amounts are combined with exact 128-bit addition;
//! equivalent values are a derived display of the running total, recomputed
//! from the cached prices on every fold step rather than summed
//! independently.

use crate::error::ViewError;
use crate::querier::ChainQuerier;
use crate::service::AddressProvider;
use shade_store::{NoteRecord, RecordStore};
use shade_types::{
    customize_symbol, Amount, AssetId, BalanceView, EquivalentValue, EstimatedPrice, Metadata,
    ValueView,
};
use std::collections::{BTreeMap, HashMap};

/// Post-hoc filters over a completed aggregation. Both are exact-match and
/// independently optional; they change what is returned, never what was
/// aggregated.
#[derive(Clone, Copy, Debug, Default)]
pub struct BalancesFilter {
    pub account: Option<u32>,
    pub asset_id: Option<AssetId>,
}

impl BalancesFilter {
    pub fn for_account(account: u32) -> Self {
        Self {
            account: Some(account),
            asset_id: None,
        }
    }
}

/// Resolve asset metadata: local store first, then the remote querier.
///
/// On a remote hit the display symbol is customized and the result is
/// written back to the local cache. The write-back is a best-effort
/// optimization; a failure is logged and swallowed.
pub(crate) async fn resolve_metadata<S, Q>(
    store: &S,
    querier: &Q,
    asset_id: &AssetId,
) -> Result<Option<Metadata>, ViewError>
where
    S: RecordStore,
    Q: ChainQuerier,
{
    if let Some(metadata) = store.get_asset_metadata(asset_id).await? {
        return Ok(Some(metadata));
    }

    let Some(remote) = querier.asset_metadata_by_id(asset_id).await? else {
        return Ok(None);
    };
    let customized = customize_symbol(remote);
    if let Err(err) = store.save_asset_metadata(customized.clone()).await {
        tracing::debug!(%asset_id, %err, "failed to cache remotely resolved asset metadata");
    }
    Ok(Some(customized))
}

/// One aggregation pass over note records.
pub(crate) struct BalancesAggregator<'a, S, Q> {
    store: &'a S,
    querier: &'a Q,
    addresses: &'a dyn AddressProvider,
    /// Height the price-relevance window is anchored at.
    latest_known_height: u64,
    /// Blocks per epoch; prices are skipped entirely when unknown.
    epoch_duration: Option<u64>,
    accounts: BTreeMap<u32, BTreeMap<AssetId, BalanceView>>,
    /// Relevant price observations, fetched once per asset per pass.
    prices: HashMap<AssetId, Vec<EstimatedPrice>>,
}

impl<'a, S, Q> BalancesAggregator<'a, S, Q>
where
    S: RecordStore,
    Q: ChainQuerier,
{
    pub fn new(
        store: &'a S,
        querier: &'a Q,
        addresses: &'a dyn AddressProvider,
        latest_known_height: u64,
        epoch_duration: Option<u64>,
    ) -> Self {
        Self {
            store,
            querier,
            addresses,
            latest_known_height,
            epoch_duration,
            accounts: BTreeMap::new(),
            prices: HashMap::new(),
        }
    }

    /// Fold one unspent, nonzero note record into its bucket.
    pub async fn add(&mut self, record: &NoteRecord) -> Result<(), ViewError> {
        let account = record.address_index.account;
        let asset_id = record.value.asset_id;

        let (current, is_known) = self.ensure_bucket(record).await?;
        let total = current + record.value.amount;

        let equivalent_values = if is_known {
            self.equivalent_values_for(&asset_id, total).await?
        } else {
            Vec::new()
        };

        if let Some(view) = self
            .accounts
            .get_mut(&account)
            .and_then(|buckets| buckets.get_mut(&asset_id))
        {
            *view.value.amount_mut() = total;
            if let ValueView::KnownAsset {
                equivalent_values: slot,
                ..
            } = &mut view.value
            {
                *slot = equivalent_values;
            }
        }
        Ok(())
    }

    /// Apply the post-hoc filters and return the surviving views, in
    /// (account, asset) order.
    pub fn into_filtered(self, filter: BalancesFilter) -> Vec<BalanceView> {
        self.accounts
            .into_iter()
            .filter(|(account, _)| filter.account.map_or(true, |wanted| *account == wanted))
            .flat_map(|(_, buckets)| {
                buckets
                    .into_iter()
                    .filter(move |(asset_id, _)| {
                        filter.asset_id.map_or(true, |wanted| *asset_id == wanted)
                    })
                    .map(|(_, view)| view)
            })
            .collect()
    }

    /// Create the (account, asset) bucket if absent. Returns the bucket's
    /// current amount and whether it is a known-asset bucket.
    async fn ensure_bucket(&mut self, record: &NoteRecord) -> Result<(Amount, bool), ViewError> {
        let account = record.address_index.account;
        let asset_id = record.value.asset_id;

        if let Some(view) = self
            .accounts
            .get(&account)
            .and_then(|buckets| buckets.get(&asset_id))
        {
            let is_known = matches!(view.value, ValueView::KnownAsset { .. });
            return Ok((view.value.amount(), is_known));
        }

        let address = self.addresses.address_by_index(record.address_index)?;
        let value = match resolve_metadata(self.store, self.querier, &asset_id).await? {
            Some(metadata) => {
                self.load_prices_once(&metadata).await?;
                ValueView::known_zero(metadata)
            }
            None => ValueView::unknown_zero(asset_id),
        };
        let is_known = matches!(value, ValueView::KnownAsset { .. });

        self.accounts.entry(account).or_default().insert(
            asset_id,
            BalanceView {
                address: shade_types::AddressView {
                    address,
                    index: record.address_index,
                },
                value,
            },
        );
        Ok((Amount::ZERO, is_known))
    }

    /// Fetch the asset's relevant price observations on first sight; later
    /// records for the same asset reuse the cached list.
    async fn load_prices_once(&mut self, metadata: &Metadata) -> Result<(), ViewError> {
        if self.prices.contains_key(&metadata.asset_id) {
            return Ok(());
        }
        let Some(epoch_duration) = self.epoch_duration else {
            return Ok(());
        };
        let prices = self
            .store
            .get_prices_for_asset(metadata, self.latest_known_height, epoch_duration)
            .await?;
        self.prices.insert(metadata.asset_id, prices);
        Ok(())
    }

    /// Restate `total` in every numeraire a cached price quotes it in.
    async fn equivalent_values_for(
        &self,
        asset_id: &AssetId,
        total: Amount,
    ) -> Result<Vec<EquivalentValue>, ViewError> {
        let Some(prices) = self.prices.get(asset_id) else {
            return Ok(Vec::new());
        };

        let mut equivalents = Vec::with_capacity(prices.len());
        for price in prices {
            // A price whose numeraire metadata cannot be resolved is skipped.
            let Some(numeraire) =
                resolve_metadata(self.store, self.querier, &price.numeraire).await?
            else {
                continue;
            };
            equivalents.push(EquivalentValue {
                numeraire,
                equivalent_amount: total.multiply_by_rate(price.numeraire_per_unit),
                as_of_height: price.as_of_height,
            });
        }
        Ok(equivalents)
    }
}
