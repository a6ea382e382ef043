//! Dashboard notifications

use crate::core::amount::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationType {
    Transaction,
    Security,
    System,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationType::Transaction => f.write_str("transaction"),
            NotificationType::Security => f.write_str("security"),
            NotificationType::System => f.write_str("system"),
        }
    }
}

/// Optional call-to-action attached to a notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    pub label: String,
    pub url: String,
}

/// A notification shown in the dashboard feed.
///
/// Only `read` changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<NotificationAction>,
}

impl NotificationItem {
    /// Create an unread notification
    pub fn new(
        id: String,
        kind: NotificationType,
        title: &str,
        message: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            kind,
            title: title.to_string(),
            message: message.to_string(),
            timestamp,
            read: false,
            action: None,
        }
    }

    pub fn with_action(mut self, label: &str, url: &str) -> Self {
        self.action = Some(NotificationAction {
            label: label.to_string(),
            url: url.to_string(),
        });
        self
    }

    pub fn mark_read(mut self) -> Self {
        self.read = true;
        self
    }

    /// Notification announcing a completed send
    pub fn payment_sent(
        id: String,
        amount: Amount,
        recipient_name: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self::new(
            id,
            NotificationType::Transaction,
            "Payment Sent",
            &format!("You sent ${} to {}", amount, recipient_name),
            timestamp,
        )
    }
}
