//! REST API module
//!
//! Exposes one shared wallet store over HTTP.
//!
//! # Endpoints
//!
//! ## Wallet
//! - `GET /api/wallet` - Full snapshot
//! - `GET /api/user` - Owner profile
//!
//! ## Balances
//! - `GET /api/balances` - All balances
//! - `GET /api/balances/total` - Indicative USD total
//! - `POST /api/balances/{currency}` - Adjust by `{delta}`
//!
//! ## Transactions
//! - `GET /api/transactions` - History (`limit`, `search`, `type`, `status`, `currency`, `sort`)
//! - `POST /api/transactions` - Record a transaction
//! - `POST /api/send` - Send money
//! - `POST /api/send/quote` - Fee and affordability
//! - `POST /api/receive` - Payment request with shareable link
//! - `GET /api/summary` - Totals
//!
//! ## Notifications
//! - `GET /api/notifications` - Feed and unread count
//! - `POST /api/notifications/{id}/read` - Mark read
//!
//! ## Contacts
//! - `GET /api/contacts?q=` - Recipient search
//!
//! ## WebSocket
//! - `GET /ws` - `Connected` greeting, then wallet events (TransactionAdded, BalanceUpdated, ...)

pub mod handlers;
pub mod routes;
pub mod websocket;

pub use handlers::ApiState;
pub use routes::create_router;
pub use websocket::{ws_handler, WsEvent};
