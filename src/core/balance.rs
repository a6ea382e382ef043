//! Per-currency wallet balances
//!
//! A wallet holds at most one balance entry per currency code. The
//! [`Balances`] collection enforces that on construction and keeps
//! entries in their seeded order.

use crate::core::amount::Amount;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Balance-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BalanceError {
    #[error("Invalid currency code: {0} (expected 3 ASCII letters)")]
    InvalidCurrency(String),
    #[error("Duplicate balance entry for currency {0}")]
    DuplicateCurrency(CurrencyCode),
    #[error("Balance out of range for currency {0}")]
    Overflow(CurrencyCode),
}

/// Three-letter currency code, stored uppercase
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parse and normalize a currency code
    pub fn new(code: &str) -> Result<Self, BalanceError> {
        let trimmed = code.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(BalanceError::InvalidCurrency(code.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = BalanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for CurrencyCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = BalanceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

/// Spendable amount held in one currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletBalance {
    pub currency: CurrencyCode,
    pub amount: Amount,
    /// Reserved funds; informational, not deducted from `amount`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<Amount>,
}

impl WalletBalance {
    pub fn new(currency: CurrencyCode, amount: Amount) -> Self {
        Self {
            currency,
            amount,
            locked: None,
        }
    }

    pub fn with_locked(mut self, locked: Amount) -> Self {
        self.locked = Some(locked);
        self
    }
}

/// Ordered balance entries, unique per currency
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Balances {
    entries: Vec<WalletBalance>,
}

impl Balances {
    /// Build from a list of entries, rejecting duplicate currencies
    pub fn from_entries(entries: Vec<WalletBalance>) -> Result<Self, BalanceError> {
        let mut seen = HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.currency.clone()) {
                return Err(BalanceError::DuplicateCurrency(entry.currency.clone()));
            }
        }
        Ok(Self { entries })
    }

    pub fn get(&self, currency: &CurrencyCode) -> Option<&WalletBalance> {
        self.entries.iter().find(|b| &b.currency == currency)
    }

    pub fn contains(&self, currency: &CurrencyCode) -> bool {
        self.get(currency).is_some()
    }

    /// Add `delta` to the matching entry.
    ///
    /// Returns the new amount, or `None` if no entry has this currency. The
    /// entry is left untouched if the sum leaves the `i64` range.
    pub fn adjust(
        &mut self,
        currency: &CurrencyCode,
        delta: Amount,
    ) -> Result<Option<Amount>, BalanceError> {
        let Some(entry) = self.entries.iter_mut().find(|b| &b.currency == currency) else {
            return Ok(None);
        };
        entry.amount = entry
            .amount
            .checked_add(delta)
            .ok_or_else(|| BalanceError::Overflow(currency.clone()))?;
        Ok(Some(entry.amount))
    }

    pub fn iter(&self) -> impl Iterator<Item = &WalletBalance> {
        self.entries.iter()
    }

    pub fn to_vec(&self) -> Vec<WalletBalance> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
