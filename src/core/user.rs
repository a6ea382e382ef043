//! Wallet owner profile

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity record of the wallet owner, fixed at store creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: &str, name: &str, email: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email: email.to_string(),
            avatar: None,
            phone: None,
            verified: false,
            created_at,
        }
    }

    pub fn with_avatar(mut self, avatar: &str) -> Self {
        self.avatar = Some(avatar.to_string());
        self
    }

    pub fn with_phone(mut self, phone: &str) -> Self {
        self.phone = Some(phone.to_string());
        self
    }

    pub fn verified(mut self) -> Self {
        self.verified = true;
        self
    }
}
