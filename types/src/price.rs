//! Price observations and derived equivalent values.

use crate::amount::Amount;
use crate::asset::{AssetId, Metadata};
use serde::{Deserialize, Serialize};

/// An observed conversion rate from a priced asset into a numeraire.
///
/// The rate is a floating-point approximation; it is only ever applied for
/// display, never folded into exact totals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EstimatedPrice {
    pub priced_asset: AssetId,
    /// The asset the price is quoted in.
    pub numeraire: AssetId,
    /// Multiply base units of the priced asset by this to get base units of
    /// the numeraire.
    pub numeraire_per_unit: f64,
    /// Height the price was observed at.
    pub as_of_height: u64,
}

/// A balance restated in a numeraire, attached to a known-asset view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EquivalentValue {
    pub numeraire: Metadata,
    pub equivalent_amount: Amount,
    pub as_of_height: u64,
}
