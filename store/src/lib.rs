//! Abstract storage traits for the wallet's local record store.
//!
//! The record store holds everything block scanning has decrypted for this
//! wallet: owned notes, pending swaps, transactions, asset metadata, price
//! observations, and sync state. Every backend (IndexedDB-bridged, in-memory
//! for testing) implements these traits; the view layer depends only on the
//! traits. The store is written exclusively by the external sync path; the
//! view layer reads, subscribes, and at most caches resolved asset metadata.

pub mod error;
pub mod mem;
pub mod records;
pub mod store;
pub mod subscription;

pub use error::StoreError;
pub use mem::MemStore;
pub use records::{AppParams, NoteRecord, SwapRecord, TransactionRecord};
pub use store::RecordStore;
pub use subscription::{subscription_channel, Subscription, SubscriptionSender};
