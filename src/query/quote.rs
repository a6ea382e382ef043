//! Send quotes
//!
//! A quote answers the send form's questions before any money moves: what
//! the fee is, what leaves the balance, and whether the send is allowed.

use crate::core::{Amount, Balances, CurrencyCode, FeeSchedule};
use serde::Serialize;

/// Cost breakdown for a prospective send
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SendQuote {
    pub amount: Amount,
    pub currency: CurrencyCode,
    pub fee: Amount,
    pub total: Amount,
    /// Current balance, if the wallet holds this currency
    pub available: Option<Amount>,
    /// Recipient given, amount positive, and the balance covers the total
    pub can_send: bool,
}

impl SendQuote {
    pub fn new(
        recipient: &str,
        amount: Amount,
        currency: &CurrencyCode,
        balances: &Balances,
        fees: &FeeSchedule,
    ) -> Self {
        let fee = fees.fee_for(amount);
        let debit = fees.total_debit(amount);
        let available = balances.get(currency).map(|b| b.amount);

        let can_send = !recipient.trim().is_empty()
            && amount.is_positive()
            && matches!((debit, available), (Some(total), Some(have)) if have >= total);
        let total = debit.unwrap_or(amount + fee);

        Self {
            amount,
            currency: currency.clone(),
            fee,
            total,
            available,
            can_send,
        }
    }
}
