//! The Shade view core.
//!
//! Turns the wallet's local record store (owned notes, pending swaps,
//! transactions) plus remote chain queries into a consistent, de-duplicated,
//! priced read model, and detects asynchronous chain events (spends,
//! confirmations, claims) without missing or double-counting them:
//!
//! - balance aggregation into per-account, per-asset totals with attached
//!   price equivalents
//! - a subscribe-then-check detection routine used uniformly for nullifier
//!   status, record-by-commitment lookup, and broadcast confirmation
//! - delegation and unbonding reconciliation against the validator set
//!
//! Everything here is read-only over the store (apart from best-effort
//! asset-metadata cache fills) and is driven through an explicitly
//! constructed [`ViewService`].

pub mod balances;
pub mod broadcast;
pub mod detect;
pub mod error;
pub mod querier;
pub mod service;
pub mod staking;

pub use balances::BalancesFilter;
pub use broadcast::{transaction_id, BroadcastOutcome};
pub use error::ViewError;
pub use querier::{ChainQuerier, NodeClient};
pub use service::{AddressProvider, ViewService};
pub use staking::{DelegationFilter, UnbondingGroup, UnbondingTokens};
