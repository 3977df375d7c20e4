//! Channel-based publish/subscribe primitive.
//!
//! `Publisher` and `Subscription` replace implicit reactive operator chains
//! with an explicit, testable abstraction: producers call [`Publisher::send`],
//! consumers loop on [`Subscription::recv`], and dropping a `Subscription`
//! unsubscribes it. Each subscriber has its own unbounded FIFO queue, so
//! emissions are delivered in send order with no batching or coalescing.

use std::sync::{Mutex, MutexGuard};
use tokio::sync::mpsc;

/// A multi-subscriber value publisher with current-value semantics.
///
/// The most recently sent value is retained and replayed to new subscribers,
/// matching the behavior of a remote live-update subscription that delivers
/// the current snapshot immediately on attach.
pub struct Publisher<T> {
    inner: Mutex<PublisherInner<T>>,
}

struct PublisherInner<T> {
    subscribers: Vec<mpsc::UnboundedSender<T>>,
    latest: Option<T>,
}

impl<T: Clone + Send + 'static> Publisher<T> {
    /// Creates a publisher with no retained value.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(PublisherInner {
                subscribers: Vec::new(),
                latest: None,
            }),
        }
    }

    fn inner(&self) -> MutexGuard<'_, PublisherInner<T>> {
        // The lock is only held for non-suspending Vec operations, so
        // poisoning would mean a panic mid-push; propagating it here would
        // only repeat that panic.
        self.inner.lock().unwrap()
    }

    /// Registers a new subscriber.
    ///
    /// If a value has been sent before, it is replayed to the new
    /// subscriber immediately.
    pub fn subscribe(&self) -> Subscription<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner();
        if let Some(latest) = &inner.latest {
            let _ = tx.send(latest.clone());
        }
        inner.subscribers.push(tx);
        Subscription { rx }
    }

    /// Sends a value to every live subscriber and retains it for replay.
    ///
    /// Subscribers whose `Subscription` has been dropped are pruned.
    pub fn send(&self, value: T) {
        let mut inner = self.inner();
        inner
            .subscribers
            .retain(|tx| tx.send(value.clone()).is_ok());
        inner.latest = Some(value);
    }

    /// Number of currently attached subscribers.
    pub fn subscriber_count(&self) -> usize {
        let mut inner = self.inner();
        inner.subscribers.retain(|tx| !tx.is_closed());
        inner.subscribers.len()
    }
}

impl<T: Clone + Send + 'static> Default for Publisher<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// The receiving end of a [`Publisher`].
///
/// Dropping the subscription unsubscribes it; the publisher prunes the
/// closed channel on its next send.
pub struct Subscription<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T: Send + 'static> Subscription<T> {
    /// Creates a detached subscription fed directly by the returned sender.
    ///
    /// Used by adapters that bridge an external callback-based source into
    /// the subscription model without a full `Publisher`.
    pub fn channel() -> (mpsc::UnboundedSender<T>, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        (tx, Self { rx })
    }

    /// Receives the next value, or `None` once the publisher is gone and
    /// the queue is drained.
    pub async fn recv(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Transforms each received value, preserving order.
    ///
    /// The forwarding task exits when either end is dropped.
    pub fn map<U, F>(mut self, f: F) -> Subscription<U>
    where
        U: Send + 'static,
        F: Fn(T) -> U + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(async move {
            while let Some(value) = self.rx.recv().await {
                if tx.send(f(value)).is_err() {
                    break;
                }
            }
        });
        Subscription { rx }
    }
}
