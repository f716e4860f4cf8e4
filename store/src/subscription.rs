//! Append-update subscriptions.
//!
//! A subscription is an ordered, unbounded sequence of record updates for one
//! category. Opening one is cheap and captures every update appended from
//! that moment on; there is no replay of history and no gap. Consumers that
//! lose interest simply drop the subscription; abandonment has no side
//! effects on the store.

use tokio::sync::mpsc;

/// Sending half owned by the store backend; one per open subscription.
pub type SubscriptionSender<T> = mpsc::UnboundedSender<T>;

/// An open subscription to one record category.
pub struct Subscription<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> Subscription<T> {
    /// The next update, in append order. `None` once the category stream has
    /// been closed by the store.
    pub async fn next(&mut self) -> Option<T> {
        self.rx.recv().await
    }
}

/// Create a connected sender/subscription pair.
pub fn subscription_channel<T>() -> (SubscriptionSender<T>, Subscription<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (tx, Subscription { rx })
}
