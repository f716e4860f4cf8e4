use shade_store::StoreError;
use shade_types::TransactionId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("precondition failed: {0}")]
    FailedPrecondition(&'static str),

    /// The node's id for a submitted transaction disagrees with the locally
    /// computed content hash. Always fatal, never retried.
    #[error("broadcast transaction id disagrees: computed {computed}, node returned {returned}")]
    IdentityDisagreement {
        computed: TransactionId,
        returned: TransactionId,
    },

    /// A detection wait's underlying event stream terminated without a
    /// match. Distinct from `NotFound`: the wait itself was exhausted, the
    /// initial check simply found nothing.
    #[error("subscription ended before a matching {0} was detected")]
    SubscriptionEnded(&'static str),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("querier error: {0}")]
    Querier(String),
}
