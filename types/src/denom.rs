//! Staking denomination codecs.
//!
//! Delegation and unbonding positions are ordinary value records whose
//! display denomination encodes the position: `delegation_<identity>` for a
//! delegation token, `unbonding_start_at_<height>_<identity>` for an
//! unbonding token. Recognition is by parsing the display string.

use crate::asset::Metadata;
use crate::validator::IdentityKey;

const DELEGATION_PREFIX: &str = "delegation_";
const UNBONDING_PREFIX: &str = "unbonding_start_at_";

/// Display denomination of the delegation token for a validator.
pub fn delegation_denom(validator: &IdentityKey) -> String {
    format!("{DELEGATION_PREFIX}{validator}")
}

/// Display denomination of an unbonding token for a validator, started at
/// the given height.
pub fn unbonding_denom(start_height: u64, validator: &IdentityKey) -> String {
    format!("{UNBONDING_PREFIX}{start_height}_{validator}")
}

/// Extract the validator identity from a delegation denomination.
pub fn parse_delegation(display: &str) -> Option<IdentityKey> {
    IdentityKey::parse(display.strip_prefix(DELEGATION_PREFIX)?)
}

/// Extract the start height and validator identity from an unbonding
/// denomination.
pub fn parse_unbonding(display: &str) -> Option<(u64, IdentityKey)> {
    let rest = display.strip_prefix(UNBONDING_PREFIX)?;
    let (height, identity) = rest.split_once('_')?;
    Some((height.parse().ok()?, IdentityKey::parse(identity)?))
}

/// Replace a machine-generated symbol with a compact human-readable one.
///
/// Delegation and unbonding denominations carry the full validator identity,
/// far too long for a ticker column. Other assets pass through unchanged.
pub fn customize_symbol(mut metadata: Metadata) -> Metadata {
    if let Some(validator) = parse_delegation(&metadata.display) {
        metadata.symbol = format!("delSHD({})", short_identity(&validator));
    } else if let Some((start_height, validator)) = parse_unbonding(&metadata.display) {
        metadata.symbol = format!("unbondSHD@{start_height}({})", short_identity(&validator));
    }
    metadata
}

fn short_identity(validator: &IdentityKey) -> String {
    validator.to_string().chars().take(8).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetId;

    fn metadata_with_display(display: &str) -> Metadata {
        Metadata {
            asset_id: AssetId::new([1; 32]),
            name: "test".into(),
            symbol: "TEST".into(),
            display: display.into(),
            denom_exponent: 6,
            priority_score: 0,
        }
    }

    #[test]
    fn delegation_round_trip() {
        let key = IdentityKey::new([9; 32]);
        assert_eq!(parse_delegation(&delegation_denom(&key)), Some(key));
    }

    #[test]
    fn unbonding_round_trip() {
        let key = IdentityKey::new([3; 32]);
        assert_eq!(
            parse_unbonding(&unbonding_denom(1234, &key)),
            Some((1234, key))
        );
    }

    #[test]
    fn plain_denoms_do_not_match() {
        assert_eq!(parse_delegation("shade"), None);
        assert_eq!(parse_unbonding("delegation_abcd"), None);
        assert_eq!(parse_unbonding("unbonding_start_at_notanumber_ff"), None);
    }

    #[test]
    fn customize_shortens_delegation_symbol() {
        let key = IdentityKey::new([0xab; 32]);
        let customized = customize_symbol(metadata_with_display(&delegation_denom(&key)));
        assert_eq!(customized.symbol, "delSHD(abababab)");
    }

    #[test]
    fn customize_embeds_unbonding_start() {
        let key = IdentityKey::new([0xcd; 32]);
        let customized = customize_symbol(metadata_with_display(&unbonding_denom(77, &key)));
        assert_eq!(customized.symbol, "unbondSHD@77(cdcdcdcd)");
    }

    #[test]
    fn customize_leaves_ordinary_assets_alone() {
        let customized = customize_symbol(metadata_with_display("shade"));
        assert_eq!(customized.symbol, "TEST");
    }
}
