//! Transaction history search, filtering and sorting

use crate::core::{CurrencyCode, Transaction, TransactionStatus, TransactionType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// History sort order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Newest first
    #[default]
    Date,
    /// Largest amount first
    Amount,
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(SortBy::Date),
            "amount" => Ok(SortBy::Amount),
            other => Err(format!("Unknown sort order: {} (expected date or amount)", other)),
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortBy::Date => f.write_str("date"),
            SortBy::Amount => f.write_str("amount"),
        }
    }
}

/// Criteria for narrowing the transaction list. Unset fields match all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TransactionFilter {
    /// Case-insensitive text matched against description and party names
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<TransactionType>,
    #[serde(default)]
    pub status: Option<TransactionStatus>,
    #[serde(default)]
    pub currency: Option<CurrencyCode>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: &str) -> Self {
        self.search = Some(term.to_string());
        self
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn status(mut self, status: TransactionStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        let search_ok = self
            .search
            .as_deref()
            .map_or(true, |term| tx.matches_search(term));
        let kind_ok = self.kind.map_or(true, |k| tx.kind == k);
        let status_ok = self.status.map_or(true, |s| tx.status == s);
        let currency_ok = self.currency.as_ref().map_or(true, |c| &tx.currency == c);

        search_ok && kind_ok && status_ok && currency_ok
    }

    /// Matching transactions in the requested order.
    ///
    /// Sorting is stable, so equal keys keep their list order.
    pub fn apply(&self, transactions: &[Transaction], sort: SortBy) -> Vec<Transaction> {
        let mut matched: Vec<Transaction> = transactions
            .iter()
            .filter(|tx| self.matches(tx))
            .cloned()
            .collect();

        match sort {
            SortBy::Date => matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
            SortBy::Amount => matched.sort_by(|a, b| b.amount.cmp(&a.amount)),
        }

        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SeedData;

    fn demo_transactions() -> Vec<Transaction> {
        SeedData::demo().transactions
    }

    fn ids(txs: &[Transaction]) -> Vec<&str> {
        txs.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_empty_filter_keeps_everything_newest_first() {
        let mut txs = demo_transactions();
        txs.reverse();

        let result = TransactionFilter::new().apply(&txs, SortBy::Date);
        assert_eq!(ids(&result), vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_sort_by_amount() {
        let result = TransactionFilter::new().apply(&demo_transactions(), SortBy::Amount);
        assert_eq!(ids(&result), vec!["1", "3", "2", "4"]);
    }

    #[test]
    fn test_search_by_counterparty_and_description() {
        let txs = demo_transactions();

        let by_name = TransactionFilter::new().search("sarah").apply(&txs, SortBy::Date);
        assert_eq!(ids(&by_name), vec!["1"]);

        let by_description = TransactionFilter::new()
            .search("COFFEE")
            .apply(&txs, SortBy::Date);
        assert_eq!(ids(&by_description), vec!["4"]);

        let none = TransactionFilter::new()
            .search("rent")
            .apply(&txs, SortBy::Date);
        assert!(none.is_empty());
    }

    #[test]
    fn test_type_and_status_filters_combine() {
        let txs = demo_transactions();

        let sends = TransactionFilter::new()
            .kind(TransactionType::Send)
            .apply(&txs, SortBy::Date);
        assert_eq!(ids(&sends), vec!["2", "4"]);

        let pending_sends = TransactionFilter::new()
            .kind(TransactionType::Send)
            .status(TransactionStatus::Pending)
            .apply(&txs, SortBy::Date);
        assert!(pending_sends.is_empty());

        let eur = TransactionFilter::new()
            .currency(CurrencyCode::new("EUR").unwrap())
            .apply(&txs, SortBy::Date);
        assert!(eur.is_empty());
    }

    #[test]
    fn test_filter_from_query_json() {
        let filter: TransactionFilter =
            serde_json::from_str(r#"{"type":"deposit","status":"pending"}"#).unwrap();
        let result = filter.apply(&demo_transactions(), SortBy::Date);
        assert_eq!(ids(&result), vec!["3"]);
    }

    #[test]
    fn test_parse_sort_by() {
        assert_eq!("Amount".parse::<SortBy>().unwrap(), SortBy::Amount);
        assert!("size".parse::<SortBy>().is_err());
    }
}
