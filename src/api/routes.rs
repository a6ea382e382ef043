//! REST API routes configuration

use crate::api::handlers::{self, ApiState};
use crate::api::websocket::ws_handler;
use axum::{
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};

/// JSON 404 for unknown routes
async fn fallback_handler(uri: axum::http::Uri) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(handlers::ApiError {
            error: format!("Not Found: {}", uri.path()),
        }),
    )
}

/// Create the API router with all routes
pub fn create_router(state: ApiState) -> Router {
    // Dashboard front ends run on other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/ws", get(ws_handler))
        // Wallet
        .route("/api/wallet", get(handlers::get_wallet))
        .route("/api/user", get(handlers::get_user))
        // Balances
        .route("/api/balances", get(handlers::get_balances))
        .route("/api/balances/total", get(handlers::get_total_balance))
        .route("/api/balances/{currency}", post(handlers::update_balance))
        // Transactions
        .route(
            "/api/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route("/api/send", post(handlers::send_money))
        .route("/api/send/quote", post(handlers::quote_send))
        .route("/api/receive", post(handlers::request_payment))
        .route("/api/summary", get(handlers::get_summary))
        // Notifications
        .route("/api/notifications", get(handlers::list_notifications))
        .route(
            "/api/notifications/{id}/read",
            post(handlers::mark_notification_read),
        )
        // Contacts
        .route("/api/contacts", get(handlers::search_contacts))
        .fallback(fallback_handler)
        .with_state(state)
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{StoreConfig, WalletStore};

    #[test]
    fn test_router_builds() {
        let store = WalletStore::demo(StoreConfig::default()).unwrap();
        let _router = create_router(ApiState::new(store));
    }
}
