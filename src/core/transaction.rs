//! Wallet transactions
//!
//! Transactions are immutable once recorded. Callers describe a transaction
//! with [`NewTransaction`]; the store assigns the id and timestamp when it
//! records it.
//!
//! Counterparty rules:
//! - `send` carries a recipient and no sender
//! - `receive` carries a sender and no recipient
//! - `deposit`/`withdrawal` may carry either or neither

use crate::core::amount::Amount;
use crate::core::balance::CurrencyCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Domain used for synthesized counterparty emails
pub const PLACEHOLDER_EMAIL_DOMAIN: &str = "example.com";

// =============================================================================
// Error Types
// =============================================================================

/// Transaction-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Send transaction requires a recipient")]
    MissingRecipient,
    #[error("Receive transaction requires a sender")]
    MissingSender,
    #[error("{0} transaction cannot carry a {1}")]
    UnexpectedCounterparty(TransactionType, &'static str),
    #[error("Unknown transaction type: {0}")]
    UnknownType(String),
    #[error("Unknown transaction status: {0}")]
    UnknownStatus(String),
}

// =============================================================================
// Enums
// =============================================================================

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Send,
    Receive,
    Deposit,
    Withdrawal,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Send => "send",
            TransactionType::Receive => "receive",
            TransactionType::Deposit => "deposit",
            TransactionType::Withdrawal => "withdrawal",
        }
    }

    /// Money leaving the wallet
    pub fn is_outgoing(&self) -> bool {
        matches!(self, TransactionType::Send | TransactionType::Withdrawal)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "send" => Ok(TransactionType::Send),
            "receive" => Ok(TransactionType::Receive),
            "deposit" => Ok(TransactionType::Deposit),
            "withdrawal" => Ok(TransactionType::Withdrawal),
            _ => Err(TransactionError::UnknownType(s.to_string())),
        }
    }
}

/// Settlement status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
            TransactionStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = TransactionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TransactionStatus::Pending),
            "completed" => Ok(TransactionStatus::Completed),
            "failed" => Ok(TransactionStatus::Failed),
            "cancelled" => Ok(TransactionStatus::Cancelled),
            _ => Err(TransactionError::UnknownStatus(s.to_string())),
        }
    }
}

// =============================================================================
// Party
// =============================================================================

/// Sender or recipient of a transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl Party {
    pub fn new(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            avatar: None,
        }
    }

    pub fn with_avatar(mut self, avatar: &str) -> Self {
        self.avatar = Some(avatar.to_string());
        self
    }

    /// Party with a placeholder email derived from the display name.
    ///
    /// "Mike Chen" becomes `mike.chen@example.com`. Only the first space is
    /// replaced.
    pub fn from_name(name: &str) -> Self {
        let local = name.to_lowercase().replacen(' ', ".", 1);
        Self {
            name: name.to_string(),
            email: format!("{}@{}", local, PLACEHOLDER_EMAIL_DOMAIN),
            avatar: None,
        }
    }
}

fn check_counterparty(
    kind: TransactionType,
    recipient: Option<&Party>,
    sender: Option<&Party>,
) -> Result<(), TransactionError> {
    match kind {
        TransactionType::Send => {
            if recipient.is_none() {
                return Err(TransactionError::MissingRecipient);
            }
            if sender.is_some() {
                return Err(TransactionError::UnexpectedCounterparty(kind, "sender"));
            }
        }
        TransactionType::Receive => {
            if sender.is_none() {
                return Err(TransactionError::MissingSender);
            }
            if recipient.is_some() {
                return Err(TransactionError::UnexpectedCounterparty(kind, "recipient"));
            }
        }
        TransactionType::Deposit | TransactionType::Withdrawal => {}
    }
    Ok(())
}

// =============================================================================
// Transaction
// =============================================================================

/// A recorded transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Amount,
    pub currency: CurrencyCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient: Option<Party>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<Party>,
    pub description: String,
    pub status: TransactionStatus,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<Amount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl Transaction {
    /// Check the counterparty rules for this transaction's type
    pub fn validate(&self) -> Result<(), TransactionError> {
        check_counterparty(self.kind, self.recipient.as_ref(), self.sender.as_ref())
    }

    /// The other side of the transaction, if any
    pub fn counterparty(&self) -> Option<&Party> {
        self.recipient.as_ref().or(self.sender.as_ref())
    }

    /// Fee, treating absence as zero
    pub fn fee_or_zero(&self) -> Amount {
        self.fee.unwrap_or(Amount::ZERO)
    }

    /// Case-insensitive match against description and counterparty names
    pub fn matches_search(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);

        contains(&self.description)
            || self.recipient.as_ref().map_or(false, |p| contains(&p.name))
            || self.sender.as_ref().map_or(false, |p| contains(&p.name))
    }
}

/// A transaction before the store assigns its id and timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: Amount,
    pub currency: CurrencyCode,
    #[serde(default)]
    pub recipient: Option<Party>,
    #[serde(default)]
    pub sender: Option<Party>,
    #[serde(default)]
    pub description: String,
    pub status: TransactionStatus,
    #[serde(default)]
    pub fee: Option<Amount>,
    #[serde(default)]
    pub reference: Option<String>,
}

impl NewTransaction {
    fn base(kind: TransactionType, amount: Amount, currency: CurrencyCode, description: &str) -> Self {
        Self {
            kind,
            amount,
            currency,
            recipient: None,
            sender: None,
            description: description.to_string(),
            status: TransactionStatus::Completed,
            fee: None,
            reference: None,
        }
    }

    /// Outgoing payment to `recipient`
    pub fn send(amount: Amount, currency: CurrencyCode, recipient: Party, description: &str) -> Self {
        let mut tx = Self::base(TransactionType::Send, amount, currency, description);
        tx.recipient = Some(recipient);
        tx
    }

    /// Incoming payment from `sender`
    pub fn receive(amount: Amount, currency: CurrencyCode, sender: Party, description: &str) -> Self {
        let mut tx = Self::base(TransactionType::Receive, amount, currency, description);
        tx.sender = Some(sender);
        tx
    }

    pub fn deposit(amount: Amount, currency: CurrencyCode, description: &str) -> Self {
        Self::base(TransactionType::Deposit, amount, currency, description)
    }

    pub fn withdrawal(amount: Amount, currency: CurrencyCode, description: &str) -> Self {
        Self::base(TransactionType::Withdrawal, amount, currency, description)
    }

    pub fn with_status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_fee(mut self, fee: Amount) -> Self {
        self.fee = Some(fee);
        self
    }

    pub fn with_reference(mut self, reference: &str) -> Self {
        self.reference = Some(reference.to_string());
        self
    }

    pub fn validate(&self) -> Result<(), TransactionError> {
        check_counterparty(self.kind, self.recipient.as_ref(), self.sender.as_ref())
    }

    /// Stamp with an id and timestamp
    pub fn into_transaction(self, id: String, timestamp: DateTime<Utc>) -> Transaction {
        Transaction {
            id,
            kind: self.kind,
            amount: self.amount,
            currency: self.currency,
            recipient: self.recipient,
            sender: self.sender,
            description: self.description,
            status: self.status,
            timestamp,
            fee: self.fee,
            reference: self.reference,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    #[test]
    fn test_party_from_name() {
        let party = Party::from_name("Mike Chen");
        assert_eq!(party.email, "mike.chen@example.com");

        // Only the first space is replaced
        let party = Party::from_name("Mary Ann Lee");
        assert_eq!(party.email, "mary.ann lee@example.com");

        let party = Party::from_name("Bob");
        assert_eq!(party.email, "bob@example.com");
    }

    #[test]
    fn test_counterparty_rules() {
        let send = NewTransaction::send(Amount::from_major(1), usd(), Party::from_name("Bob"), "");
        assert!(send.validate().is_ok());

        let mut missing = send.clone();
        missing.recipient = None;
        assert_eq!(missing.validate(), Err(TransactionError::MissingRecipient));

        let mut both = send.clone();
        both.sender = Some(Party::from_name("Alice"));
        assert_eq!(
            both.validate(),
            Err(TransactionError::UnexpectedCounterparty(
                TransactionType::Send,
                "sender"
            ))
        );

        let mut receive =
            NewTransaction::receive(Amount::from_major(1), usd(), Party::from_name("Alice"), "");
        assert!(receive.validate().is_ok());
        receive.sender = None;
        assert_eq!(receive.validate(), Err(TransactionError::MissingSender));

        assert!(NewTransaction::deposit(Amount::from_major(1), usd(), "")
            .validate()
            .is_ok());
    }

    #[test]
    fn test_search_matches_description_and_names() {
        let tx = NewTransaction::send(
            Amount::from_major(10),
            usd(),
            Party::from_name("Mike Chen"),
            "Dinner split",
        )
        .into_transaction("abc".to_string(), Utc::now());

        assert!(tx.matches_search("dinner"));
        assert!(tx.matches_search("CHEN"));
        assert!(tx.matches_search(""));
        assert!(!tx.matches_search("coffee"));
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("Send".parse::<TransactionType>().unwrap(), TransactionType::Send);
        assert_eq!(
            "cancelled".parse::<TransactionStatus>().unwrap(),
            TransactionStatus::Cancelled
        );
        assert!(matches!(
            "refund".parse::<TransactionType>(),
            Err(TransactionError::UnknownType(_))
        ));
    }

    #[test]
    fn test_serialization_uses_wire_names() {
        let tx = NewTransaction::deposit(Amount::from_major(500), usd(), "Bank transfer")
            .with_status(TransactionStatus::Pending)
            .into_transaction("3".to_string(), Utc::now());

        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["type"], "deposit");
        assert_eq!(json["status"], "pending");
        assert_eq!(json["amount"], "500.00");
        assert!(json.get("recipient").is_none());
        assert!(json.get("fee").is_none());
    }
}
