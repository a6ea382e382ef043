//! Change feed for wallet state
//!
//! Every successful mutation publishes a [`WalletEvent`] so views can
//! refresh without polling.

use crate::core::{Amount, CurrencyCode, NotificationItem, Transaction};
use serde::Serialize;
use tokio::sync::broadcast;

/// Events published by the wallet store
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum WalletEvent {
    /// A send entered its simulated network wait
    SendStarted {
        recipient: String,
        amount: Amount,
        currency: CurrencyCode,
    },
    /// A transaction was recorded
    TransactionAdded { transaction: Transaction },
    /// A balance changed
    BalanceUpdated {
        currency: CurrencyCode,
        amount: Amount,
    },
    /// A notification was prepended
    NotificationAdded { notification: NotificationItem },
    /// A notification was marked read
    NotificationRead { id: String },
}

/// Broadcast channel for wallet events
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<WalletEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publish to all subscribers
    pub fn publish(&self, event: WalletEvent) {
        // No subscribers is fine
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.sender.subscribe()
    }
}
