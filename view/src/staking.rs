//! Delegation and unbonding reconciliation.
//!
//! Delegation positions are ordinary balance buckets whose display
//! denomination encodes a validator identity; unbonding positions
//! additionally encode the height the unbond started at. Reconciliation
//! joins the aggregated balances against the streamed validator list and
//! against the unbonding-delay parameter to produce validator-annotated and
//! claimability-partitioned views.

use crate::balances::{resolve_metadata, BalancesFilter};
use crate::error::ViewError;
use crate::querier::ChainQuerier;
use crate::service::ViewService;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use futures_util::StreamExt;
use shade_store::RecordStore;
use shade_types::{
    customize_symbol, delegation_denom, parse_delegation, parse_unbonding, AddressIndex,
    AddressView, Amount, AssetId, BalanceView, IdentityKey, Metadata, ValidatorInfo, ValueView,
};

/// Display exponent shared by the staking token and its derived
/// denominations.
const STAKING_DENOM_EXPONENT: u8 = 6;

/// Which validators a delegation join reports on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelegationFilter {
    /// Only active validators the account holds a nonzero delegation with.
    AllActiveWithNonzeroBalances,
    /// Every visible validator, inactive included; validators without a
    /// local balance appear as zero-amount placeholders.
    All,
}

/// One side of the unbonding partition.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnbondingGroup {
    /// Sum over `tokens`, in the staking asset's own denomination.
    pub total: Amount,
    pub tokens: Vec<BalanceView>,
}

/// Unbonding positions split by whether they can be claimed yet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UnbondingTokens {
    pub claimable: UnbondingGroup,
    pub not_yet_claimable: UnbondingGroup,
}

/// Asset ids are derived as the content hash of the base denomination, so
/// any party can compute the id of a validator's delegation token without a
/// registry lookup.
fn asset_id_for_denom(denom: &str) -> AssetId {
    type Blake2b256 = Blake2b<U32>;
    let mut hasher = Blake2b256::new();
    hasher.update(denom.as_bytes());
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    AssetId::new(output)
}

/// Tracks which locally held delegation tokens the validator stream has
/// accounted for.
struct DelegationTokenTracker {
    tokens: Vec<(BalanceView, bool)>,
}

impl DelegationTokenTracker {
    fn new(balances: Vec<BalanceView>) -> Self {
        let tokens = balances
            .into_iter()
            .filter(|view| {
                view.value
                    .display_denom()
                    .and_then(parse_delegation)
                    .is_some()
            })
            .map(|view| (view, false))
            .collect();
        Self { tokens }
    }

    /// The account's delegation token for this validator, if any; marks it
    /// as accounted for.
    fn take_for(&mut self, identity: &IdentityKey) -> Option<BalanceView> {
        let (view, queried) = self.tokens.iter_mut().find(|(view, _)| {
            view.value
                .display_denom()
                .and_then(parse_delegation)
                .map_or(false, |key| key == *identity)
        })?;
        *queried = true;
        Some(view.clone())
    }

    /// Tokens whose validator never appeared in the stream.
    fn unqueried(self) -> Vec<BalanceView> {
        self.tokens
            .into_iter()
            .filter(|(_, queried)| !queried)
            .map(|(view, _)| view)
            .collect()
    }
}

impl<S, Q> ViewService<S, Q>
where
    S: RecordStore,
    Q: ChainQuerier,
{
    /// Join the account's balances against the validator stream.
    ///
    /// Every validator the caller is allowed to see is represented exactly
    /// once: matched delegation tokens carry the validator's info, the rest
    /// are zero-amount placeholders (unless the filter excludes them).
    /// Validators absent from the stream (jailed, typically) that the
    /// account still holds stake with are appended afterwards.
    pub async fn delegations_for_account(
        &self,
        account: u32,
        filter: DelegationFilter,
    ) -> Result<Vec<BalanceView>, ViewError> {
        let balances = self.balances(BalancesFilter::for_account(account)).await?;
        let mut tracker = DelegationTokenTracker::new(balances);

        let show_inactive = matches!(filter, DelegationFilter::All);
        let mut validators = self.querier().validator_info(show_inactive).await?;

        let mut views = Vec::new();
        while let Some(validator) = validators.next().await {
            let validator = validator?;
            match tracker.take_for(&validator.identity_key) {
                Some(mut view) => {
                    if let ValueView::KnownAsset {
                        validator: slot, ..
                    } = &mut view.value
                    {
                        *slot = Some(validator);
                    }
                    views.push(view);
                }
                None => {
                    if matches!(filter, DelegationFilter::AllActiveWithNonzeroBalances) {
                        continue;
                    }
                    views.push(self.zero_delegation_view(account, validator).await?);
                }
            }
        }

        views.extend(tracker.unqueried());
        Ok(views)
    }

    /// Partition the account's unbonding tokens by claimability.
    ///
    /// A token started at height `h` is claimable once
    /// `h + unbonding_delay <= sync height`. Group totals are recomputed
    /// over the current members after each insertion; per-account unbonding
    /// sets are small.
    pub async fn unbonding_tokens_for_account(
        &self,
        account: u32,
        unbonding_delay: u64,
    ) -> Result<UnbondingTokens, ViewError> {
        let sync_height = self
            .store()
            .get_sync_height()
            .await?
            .ok_or(ViewError::FailedPrecondition("sync height unavailable"))?;

        let balances = self.balances(BalancesFilter::for_account(account)).await?;

        let mut partition = UnbondingTokens::default();
        for view in balances {
            let Some(display) = view.value.display_denom() else {
                continue;
            };
            let Some((start_height, _)) = parse_unbonding(display) else {
                continue;
            };

            let group = if start_height.saturating_add(unbonding_delay) <= sync_height {
                &mut partition.claimable
            } else {
                &mut partition.not_yet_claimable
            };
            group.tokens.push(view);
            group.total = group
                .tokens
                .iter()
                .fold(Amount::ZERO, |acc, token| acc + token.value.amount());
        }
        Ok(partition)
    }

    /// A zero-amount placeholder view for a validator the account holds no
    /// stake with.
    async fn zero_delegation_view(
        &self,
        account: u32,
        validator: ValidatorInfo,
    ) -> Result<BalanceView, ViewError> {
        let denom = delegation_denom(&validator.identity_key);
        let asset_id = asset_id_for_denom(&denom);

        let metadata = match resolve_metadata(self.store(), self.querier(), &asset_id).await? {
            Some(metadata) => metadata,
            // Not known locally or remotely yet; synthesize display
            // metadata from the denomination itself.
            None => customize_symbol(Metadata {
                asset_id,
                name: validator.name.clone(),
                symbol: denom.clone(),
                display: denom,
                denom_exponent: STAKING_DENOM_EXPONENT,
                priority_score: 0,
            }),
        };

        let index = AddressIndex::new(account);
        let address = self.addresses().address_by_index(index)?;
        Ok(BalanceView {
            address: AddressView { address, index },
            value: ValueView::KnownAsset {
                metadata,
                amount: Amount::ZERO,
                equivalent_values: Vec::new(),
                validator: Some(validator),
            },
        })
    }
}
