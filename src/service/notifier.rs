//! Change notification system for broadcasting quote changes to subscribers.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::subscription::Subscription;
use crate::db::{Quote, QuoteId};

const CHANNEL_CAPACITY: usize = 100;

/// Messages broadcast when quotes are inserted, updated, or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum QuoteChange {
    Inserted { quote: Quote },
    Updated { quote: Quote },
    Deleted { id: QuoteId },
}

impl QuoteChange {
    /// Id of the affected quote.
    pub fn quote_id(&self) -> QuoteId {
        match self {
            QuoteChange::Inserted { quote } | QuoteChange::Updated { quote } => quote.id,
            QuoteChange::Deleted { id } => *id,
        }
    }
}

/// Pub/sub notifier for broadcasting quote changes to all subscribers.
#[derive(Clone)]
pub struct ChangeNotifier {
    tx: broadcast::Sender<QuoteChange>,
}

impl Default for ChangeNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeNotifier {
    /// Create a new ChangeNotifier with a buffer of 100 messages.
    pub fn new() -> Self {
        Self::with_capacity(CHANNEL_CAPACITY)
    }

    /// Create a notifier whose subscribers may fall `capacity` messages behind.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to receive change notifications.
    pub fn subscribe(&self) -> Subscription {
        Subscription::new(self.tx.subscribe())
    }

    /// Broadcast a change to all subscribers.
    pub fn notify(&self, change: QuoteChange) {
        let _ = self.tx.send(change);
    }

    /// Number of open subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
