//! Balance view types produced by the view layer.

use crate::address::AddressView;
use crate::amount::Amount;
use crate::asset::{AssetId, Metadata};
use crate::price::EquivalentValue;
use crate::validator::ValidatorInfo;
use serde::{Deserialize, Serialize};

/// An amount of one asset, with as much display information as is available.
///
/// The variant is fixed when the view is created: either the asset's
/// metadata was resolvable (known) or only its id is available (unknown).
/// Equivalent values and validator annotations only ever appear on the known
/// variant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ValueView {
    KnownAsset {
        metadata: Metadata,
        amount: Amount,
        equivalent_values: Vec<EquivalentValue>,
        /// Set by the delegation reconciler on delegation-token views.
        validator: Option<ValidatorInfo>,
    },
    UnknownAsset {
        asset_id: AssetId,
        amount: Amount,
    },
}

impl ValueView {
    /// A known-asset view with a zero amount and no annotations.
    pub fn known_zero(metadata: Metadata) -> Self {
        Self::KnownAsset {
            metadata,
            amount: Amount::ZERO,
            equivalent_values: Vec::new(),
            validator: None,
        }
    }

    /// An unknown-asset view with a zero amount.
    pub fn unknown_zero(asset_id: AssetId) -> Self {
        Self::UnknownAsset {
            asset_id,
            amount: Amount::ZERO,
        }
    }

    pub fn amount(&self) -> Amount {
        match self {
            Self::KnownAsset { amount, .. } | Self::UnknownAsset { amount, .. } => *amount,
        }
    }

    pub fn amount_mut(&mut self) -> &mut Amount {
        match self {
            Self::KnownAsset { amount, .. } | Self::UnknownAsset { amount, .. } => amount,
        }
    }

    pub fn asset_id(&self) -> AssetId {
        match self {
            Self::KnownAsset { metadata, .. } => metadata.asset_id,
            Self::UnknownAsset { asset_id, .. } => *asset_id,
        }
    }

    /// Display denomination, when metadata is available.
    pub fn display_denom(&self) -> Option<&str> {
        match self {
            Self::KnownAsset { metadata, .. } => Some(&metadata.display),
            Self::UnknownAsset { .. } => None,
        }
    }
}

/// One aggregated balance: an account's address view plus a value view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BalanceView {
    pub address: AddressView,
    pub value: ValueView,
}

impl BalanceView {
    pub fn account(&self) -> u32 {
        self.address.index.account
    }
}
