//! Wallet analytics
//!
//! Totals are computed over completed transactions only; pending, failed
//! and cancelled records are counted but move no money.

use crate::core::{Amount, Balances, CurrencyCode, Transaction, TransactionStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// Display rates into USD, in basis points (10_000 = 1.0).
///
/// Fixed indicative values for the dashboard headline; not market rates.
pub const INDICATIVE_USD_RATES: [(&str, u32); 3] =
    [("USD", 10_000), ("EUR", 11_000), ("GBP", 12_500)];

/// Rate used for currencies missing from the table
pub const DEFAULT_INDICATIVE_RATE: u32 = 10_000;

/// Money movement in one currency
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CurrencySummary {
    /// Sends and withdrawals
    pub total_sent: Amount,
    /// Receipts and deposits
    pub total_received: Amount,
    pub total_fees: Amount,
    /// Received minus sent minus fees
    pub net: Amount,
}

/// Wallet-wide transaction statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalletSummary {
    pub transaction_count: usize,
    pub completed_count: usize,
    pub pending_count: usize,
    pub by_currency: BTreeMap<CurrencyCode, CurrencySummary>,
}

impl WalletSummary {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let mut summary = Self {
            transaction_count: transactions.len(),
            ..Default::default()
        };

        for tx in transactions {
            match tx.status {
                TransactionStatus::Pending => summary.pending_count += 1,
                TransactionStatus::Completed => summary.completed_count += 1,
                TransactionStatus::Failed | TransactionStatus::Cancelled => {}
            }
            if tx.status != TransactionStatus::Completed {
                continue;
            }

            let entry = summary.by_currency.entry(tx.currency.clone()).or_default();
            if tx.kind.is_outgoing() {
                entry.total_sent += tx.amount;
            } else {
                entry.total_received += tx.amount;
            }
            entry.total_fees += tx.fee_or_zero();
            entry.net = entry.total_received - entry.total_sent - entry.total_fees;
        }

        summary
    }

    pub fn currency(&self, currency: &CurrencyCode) -> Option<&CurrencySummary> {
        self.by_currency.get(currency)
    }
}

/// Sum of all balances expressed in USD at the indicative rates
pub fn indicative_total(balances: &Balances) -> Amount {
    balances
        .iter()
        .map(|balance| {
            let rate = INDICATIVE_USD_RATES
                .iter()
                .find(|(code, _)| *code == balance.currency.as_str())
                .map(|(_, rate)| *rate)
                .unwrap_or(DEFAULT_INDICATIVE_RATE);
            balance.amount.apply_basis_points(rate)
        })
        .sum()
}
