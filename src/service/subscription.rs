//! Caller-owned live feed of quote changes.

use futures_util::Stream;
use tokio::sync::broadcast::{self, error::RecvError};
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::notifier::QuoteChange;

/// An open subscription to quote changes.
///
/// Changes arrive in the order they were published. The subscription stays
/// open until [`Subscription::close`] is called, a [`SubscriptionHandle`]
/// closes it, or it is dropped. After that [`Subscription::next`] yields
/// `None`.
pub struct Subscription {
    rx: broadcast::Receiver<QuoteChange>,
    cancel: CancellationToken,
}

/// Cloneable remote control for closing a [`Subscription`] from another task.
#[derive(Clone)]
pub struct SubscriptionHandle {
    cancel: CancellationToken,
}

impl SubscriptionHandle {
    pub fn close(&self) {
        self.cancel.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Subscription {
    pub(crate) fn new(rx: broadcast::Receiver<QuoteChange>) -> Self {
        Self {
            rx,
            cancel: CancellationToken::new(),
        }
    }

    /// Wait for the next change. Returns `None` once closed.
    ///
    /// A subscriber that falls further behind than the channel buffer skips
    /// the missed changes and continues with the oldest one still buffered.
    pub async fn next(&mut self) -> Option<QuoteChange> {
        loop {
            tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return None,
                received = self.rx.recv() => match received {
                    Ok(change) => return Some(change),
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "quote subscription lagged, changes dropped");
                    }
                    Err(RecvError::Closed) => return None,
                },
            }
        }
    }

    pub fn handle(&self) -> SubscriptionHandle {
        SubscriptionHandle {
            cancel: self.cancel.clone(),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Close the subscription and release its receiver.
    pub fn close(self) {
        self.cancel.cancel();
    }

    /// Turn the subscription into a `Stream` that ends when it is closed.
    pub fn into_stream(self) -> impl Stream<Item = QuoteChange> + Send {
        futures_util::stream::unfold(self, |mut subscription| async move {
            subscription
                .next()
                .await
                .map(|change| (change, subscription))
        })
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
