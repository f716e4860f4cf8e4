//! Account indexes and address views.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of one logical sub-wallet. No upper bound is enforced here.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct AddressIndex {
    pub account: u32,
}

impl AddressIndex {
    pub fn new(account: u32) -> Self {
        Self { account }
    }
}

/// An opaque encoded wallet address.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address(String);

impl Address {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A decoded address together with the index it was derived from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressView {
    pub address: Address,
    pub index: AddressIndex,
}
