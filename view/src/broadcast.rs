//! Transaction broadcast and confirmation.
//!
//! Submission runs a short state machine: submitting, broadcast accepted,
//! and, only when the caller asks to await detection, confirmed. The
//! transaction-detection subscription is opened before the payload leaves
//! this process, so a confirmation arriving immediately after submission
//! cannot be missed. The node's id for the submission must equal the
//! locally computed content hash; a disagreement is fatal and reported
//! before any success.

use crate::detect::watch_subscription;
use crate::error::ViewError;
use crate::querier::ChainQuerier;
use crate::service::ViewService;
use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use shade_store::{RecordStore, TransactionRecord};
use shade_types::{Transaction, TransactionId};

type Blake2b256 = Blake2b<U32>;

/// Blake2b-256 content hash of the transaction's exact binary encoding.
pub fn transaction_id(transaction: &Transaction) -> TransactionId {
    let mut hasher = Blake2b256::new();
    hasher.update(transaction.as_bytes());
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    TransactionId::new(output)
}

/// Result of a broadcast: the transaction id, plus the height the
/// transaction was detected at when the caller awaited detection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BroadcastOutcome {
    pub id: TransactionId,
    pub detection_height: Option<u64>,
}

impl<S, Q> ViewService<S, Q>
where
    S: RecordStore,
    Q: ChainQuerier,
{
    /// Submit a transaction and, when requested, wait until the local store
    /// detects it on chain.
    pub async fn broadcast_transaction(
        &self,
        transaction: Option<&Transaction>,
        await_detection: bool,
    ) -> Result<BroadcastOutcome, ViewError> {
        let transaction =
            transaction.ok_or(ViewError::InvalidArgument("transaction payload is required"))?;

        // Open the detection subscription before submitting, so a
        // confirmation landing right after submission is still observed.
        let subscription = self.store().subscribe_transactions().await;

        let computed = transaction_id(transaction);
        let returned = self.querier().submit_transaction(transaction).await?;
        if returned != computed {
            return Err(ViewError::IdentityDisagreement { computed, returned });
        }
        tracing::debug!(id = %computed, "transaction broadcast accepted");

        if !await_detection {
            return Ok(BroadcastOutcome {
                id: computed,
                detection_height: None,
            });
        }

        let detection_height =
            watch_subscription(subscription, "transaction", |record: &TransactionRecord| {
                (record.id == computed).then_some(record.height)
            })
            .await?;
        tracing::debug!(id = %computed, height = detection_height, "transaction detected locally");

        Ok(BroadcastOutcome {
            id: computed,
            detection_height: Some(detection_height),
        })
    }
}
