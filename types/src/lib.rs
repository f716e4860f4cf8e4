//! Fundamental types for the Shade wallet view layer.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: exact 128-bit amounts, asset ids and metadata, record
//! identifiers (commitments, nullifiers, transaction ids), address indexes,
//! price observations, validator identities, and the balance view types the
//! view layer produces.

pub(crate) mod hexstr;

pub mod address;
pub mod amount;
pub mod asset;
pub mod denom;
pub mod id;
pub mod price;
pub mod transaction;
pub mod validator;
pub mod value;

pub use address::{Address, AddressIndex, AddressView};
pub use amount::Amount;
pub use asset::{AssetId, Metadata, Value};
pub use denom::{
    customize_symbol, delegation_denom, parse_delegation, parse_unbonding, unbonding_denom,
};
pub use id::{Commitment, Nullifier, TransactionId};
pub use price::{EquivalentValue, EstimatedPrice};
pub use transaction::Transaction;
pub use validator::{IdentityKey, ValidatorInfo};
pub use value::{BalanceView, ValueView};
