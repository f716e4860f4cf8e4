//! Detection primitives.
//!
//! Every "has X happened yet, and if not, wait for it" path in this crate
//! follows the same protocol: open the relevant record-category subscription
//! first, then perform the point-in-time check. An event landing between the
//! check and the wait is therefore always captured by the already-open
//! subscription. Callers that get a hit from the check simply drop the
//! unused subscription.
//!
//! No timeout is imposed here. A wait either matches, fails with
//! [`ViewError::SubscriptionEnded`] when the category stream closes, or runs
//! until the caller stops consuming it; abandoning a subscription has no
//! side effects.

use crate::error::ViewError;
use shade_store::Subscription;

/// Consume a subscription in append order until `predicate` yields a value.
///
/// `what` names the awaited record kind in the `SubscriptionEnded` error.
pub async fn watch_subscription<R, T, F>(
    mut subscription: Subscription<R>,
    what: &'static str,
    mut predicate: F,
) -> Result<T, ViewError>
where
    F: FnMut(&R) -> Option<T>,
{
    while let Some(update) = subscription.next().await {
        if let Some(found) = predicate(&update) {
            return Ok(found);
        }
    }
    Err(ViewError::SubscriptionEnded(what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shade_store::subscription_channel;

    #[tokio::test]
    async fn returns_first_match_in_order() {
        let (tx, sub) = subscription_channel();
        for v in [1u32, 2, 3, 4] {
            tx.send(v).unwrap();
        }
        let found = watch_subscription(sub, "number", |v| (*v >= 2).then_some(*v))
            .await
            .unwrap();
        assert_eq!(found, 2);
    }

    #[tokio::test]
    async fn errors_when_stream_ends_without_match() {
        let (tx, sub) = subscription_channel();
        tx.send(1u32).unwrap();
        drop(tx);
        let err = watch_subscription(sub, "number", |v: &u32| (*v >= 2).then_some(*v))
            .await
            .unwrap_err();
        assert!(matches!(err, ViewError::SubscriptionEnded("number")));
    }
}
