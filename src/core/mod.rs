//! Core wallet domain types
//!
//! This module contains the records the wallet store holds:
//! - Amounts (fixed-point minor units)
//! - Per-currency balances
//! - Transactions and their counterparties
//! - Notifications
//! - The wallet owner's profile
//! - Send fee schedule

pub mod amount;
pub mod balance;
pub mod fee;
pub mod notification;
pub mod transaction;
pub mod user;

pub use amount::{Amount, AmountError, BASIS_POINTS_DENOMINATOR, MINOR_UNITS};
pub use balance::{BalanceError, Balances, CurrencyCode, WalletBalance};
pub use fee::{FeeSchedule, SEND_FEE_BASIS_POINTS};
pub use notification::{NotificationAction, NotificationItem, NotificationType};
pub use transaction::{
    NewTransaction, Party, Transaction, TransactionError, TransactionStatus, TransactionType,
    PLACEHOLDER_EMAIL_DOMAIN,
};
pub use user::User;
