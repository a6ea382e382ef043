//! Read-side views over wallet state
//!
//! - Transaction history filtering and sorting
//! - Send quotes (fee, total, affordability)
//! - Payment requests with shareable links
//! - Per-currency totals and the indicative total balance
//! - Contact search

pub mod contacts;
pub mod history;
pub mod quote;
pub mod request;
pub mod summary;

pub use contacts::{search_contacts, MIN_CONTACT_QUERY_LEN};
pub use history::{SortBy, TransactionFilter};
pub use quote::SendQuote;
pub use request::{PaymentRequest, RequestError, PAYMENT_LINK_BASE};
pub use summary::{
    indicative_total, CurrencySummary, WalletSummary, DEFAULT_INDICATIVE_RATE,
    INDICATIVE_USD_RATES,
};
