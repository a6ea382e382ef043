//! Payment requests
//!
//! A request is a shareable link asking someone to pay this wallet. It can
//! name an amount and a reason, but it moves no money; the payer's transfer
//! shows up later as a `receive` transaction.

use crate::core::{Amount, CurrencyCode};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Prefix of every shareable payment link
pub const PAYMENT_LINK_BASE: &str = "https://walletpay.com/pay/";

/// Payment request errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("Requested amount must be greater than 0, got {0}")]
    NonPositiveAmount(Amount),
}

/// A request for payment with its shareable link
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentRequest {
    pub id: String,
    pub link: String,
    /// Name shown to the payer
    pub requester: String,
    /// Open amount when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Amount>,
    pub currency: CurrencyCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PaymentRequest {
    pub fn new(
        id: &str,
        requester: &str,
        amount: Option<Amount>,
        currency: CurrencyCode,
        description: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Self, RequestError> {
        if let Some(amount) = amount.filter(|a| !a.is_positive()) {
            return Err(RequestError::NonPositiveAmount(amount));
        }

        let description = description.trim();
        Ok(Self {
            id: id.to_string(),
            link: format!("{}{}", PAYMENT_LINK_BASE, id),
            requester: requester.to_string(),
            amount,
            currency,
            description: (!description.is_empty()).then(|| description.to_string()),
            created_at,
        })
    }

    /// Message for sharing the link by email or SMS
    pub fn share_message(&self) -> String {
        let what = match self.amount {
            Some(amount) => format!("{} {}", amount, self.currency),
            None => format!("a payment in {}", self.currency),
        };

        match &self.description {
            Some(reason) => format!(
                "{} requested {} for {}: {}",
                self.requester, what, reason, self.link
            ),
            None => format!("{} requested {}: {}", self.requester, what, self.link),
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
    fn test_request_with_amount() {
        let request = PaymentRequest::new(
            "k3x9q0abc",
            "Alex Johnson",
            Some(Amount::from_major(25)),
            usd(),
            "  Dinner split ",
            Utc::now(),
        )
        .unwrap();

        assert_eq!(request.link, "https://walletpay.com/pay/k3x9q0abc");
        assert_eq!(request.description.as_deref(), Some("Dinner split"));
        assert_eq!(
            request.share_message(),
            "Alex Johnson requested 25.00 USD for Dinner split: https://walletpay.com/pay/k3x9q0abc"
        );
    }

    #[test]
    fn test_open_request() {
        let request =
            PaymentRequest::new("abc", "Alex Johnson", None, usd(), "", Utc::now()).unwrap();

        assert_eq!(request.amount, None);
        assert_eq!(request.description, None);
        assert_eq!(
            request.share_message(),
            "Alex Johnson requested a payment in USD: https://walletpay.com/pay/abc"
        );

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("\"amount\""));
        assert!(!json.contains("\"description\""));
    }

    #[test]
    fn test_rejects_non_positive_amount() {
        let result = PaymentRequest::new("abc", "Alex", Some(Amount::ZERO), usd(), "", Utc::now());
        assert_eq!(result, Err(RequestError::NonPositiveAmount(Amount::ZERO)));

        let negative = Amount::from_major(-5);
        let result = PaymentRequest::new("abc", "Alex", Some(negative), usd(), "", Utc::now());
        assert_eq!(result, Err(RequestError::NonPositiveAmount(negative)));
    }
}
