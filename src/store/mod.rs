//! Wallet state store
//!
//! The store owns all mutable wallet state. Views hold a cloned
//! [`WalletStore`] handle and read through it; mutations go through its
//! four operations and are announced on the event feed.

pub mod config;
pub mod events;
pub mod seed;
pub mod wallet_store;

pub use config::{StoreConfig, ValidationPolicy, DEFAULT_EVENT_CAPACITY, DEFAULT_SEND_DELAY};
pub use events::{EventBus, WalletEvent};
pub use seed::{SeedData, DEMO_CONTACTS};
pub use wallet_store::{StoreError, WalletSnapshot, WalletStore};
