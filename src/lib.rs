//! Wallet Dashboard: client-side state store for a multi-currency wallet
//!
//! This crate provides the state behind a wallet dashboard:
//! - Per-currency balances held as fixed-point amounts
//! - Transaction history with search, filtering and sorting
//! - Simulated sends with a 2.5% fee and a processing delay
//! - Payment requests with shareable links
//! - A notification feed with read tracking
//! - Send quotes, per-currency totals and an indicative total balance
//! - A broadcast event feed, served over REST and WebSocket
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use wallet_dashboard::core::{Amount, CurrencyCode};
//! use wallet_dashboard::store::{StoreConfig, WalletStore};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let config = StoreConfig {
//!     send_delay: Duration::ZERO,
//!     ..Default::default()
//! };
//! let store = WalletStore::demo(config).unwrap();
//! let usd = CurrencyCode::new("USD").unwrap();
//!
//! // Send $100.00; the 2.5% fee is added to the debit
//! let tx = store
//!     .send_money("Emma Wilson", Amount::from_major(100), &usd, "Dinner")
//!     .await
//!     .unwrap();
//! assert_eq!(tx.fee, Some(Amount::from_minor(250)));
//!
//! let balance = store.balance(&usd).await.unwrap();
//! println!("USD balance: {}", balance.amount);
//! println!("Unread: {}", store.unread_count().await);
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod core;
pub mod crypto;
pub mod query;
pub mod store;

// Re-export commonly used types
pub use api::{create_router, ApiState};
pub use core::{
    Amount, CurrencyCode, NewTransaction, NotificationItem, Party, Transaction,
    TransactionStatus, TransactionType, User, WalletBalance,
};
pub use query::{PaymentRequest, SendQuote, SortBy, TransactionFilter, WalletSummary};
pub use store::{SeedData, StoreConfig, StoreError, ValidationPolicy, WalletEvent, WalletStore};
