//! REST API handlers for wallet operations

use crate::core::{
    Amount, BalanceError, CurrencyCode, NewTransaction, NotificationItem, Transaction, TransactionStatus,
    TransactionType, User, WalletBalance,
};
use crate::query::{PaymentRequest, SendQuote, SortBy, TransactionFilter, WalletSummary};
use crate::store::{StoreError, WalletSnapshot, WalletStore};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

/// Shared application state for API handlers
#[derive(Clone)]
pub struct ApiState {
    pub store: WalletStore,
}

impl ApiState {
    pub fn new(store: WalletStore) -> Self {
        Self { store }
    }
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ApiError>)>;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

#[derive(Serialize)]
pub struct TotalBalanceResponse {
    pub currency: &'static str,
    pub total: Amount,
    pub balances: usize,
}

#[derive(Serialize)]
pub struct BalanceUpdateResponse {
    pub currency: CurrencyCode,
    /// False when no balance holds this currency
    pub applied: bool,
    pub amount: Option<Amount>,
}

#[derive(Serialize)]
pub struct NotificationsResponse {
    pub unread: usize,
    pub notifications: Vec<NotificationItem>,
}

#[derive(Serialize)]
pub struct MarkReadResponse {
    pub id: String,
    pub read: bool,
}

// ============================================================================
// Request Types
// ============================================================================

#[derive(Deserialize)]
pub struct SendRequest {
    pub recipient: String,
    pub amount: Amount,
    pub currency: CurrencyCode,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
pub struct QuoteRequest {
    #[serde(default)]
    pub recipient: String,
    pub amount: Amount,
    pub currency: CurrencyCode,
}

#[derive(Deserialize)]
pub struct ReceiveRequest {
    /// Leave out for an open amount
    #[serde(default)]
    pub amount: Option<Amount>,
    pub currency: CurrencyCode,
    #[serde(default)]
    pub description: String,
}

#[derive(Deserialize)]
pub struct UpdateBalanceRequest {
    pub delta: Amount,
}

#[derive(Deserialize, Default)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
    pub search: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<TransactionType>,
    pub status: Option<TransactionStatus>,
    pub currency: Option<CurrencyCode>,
    pub sort: Option<SortBy>,
}

impl HistoryQuery {
    fn filter(&self) -> TransactionFilter {
        TransactionFilter {
            search: self.search.clone(),
            kind: self.kind,
            status: self.status,
            currency: self.currency.clone(),
        }
    }
}

#[derive(Deserialize, Default)]
pub struct ContactQuery {
    #[serde(default)]
    pub q: String,
}

// ============================================================================
// Error Mapping
// ============================================================================

fn api_error(status: StatusCode, message: impl ToString) -> (StatusCode, Json<ApiError>) {
    (
        status,
        Json(ApiError {
            error: message.to_string(),
        }),
    )
}

fn store_error(err: StoreError) -> (StatusCode, Json<ApiError>) {
    let status = match &err {
        StoreError::UnknownCurrency(_) => StatusCode::NOT_FOUND,
        StoreError::InsufficientFunds { .. }
        | StoreError::InvalidAmount(_)
        | StoreError::Overflow(_)
        | StoreError::Balance(BalanceError::Overflow(_))
        | StoreError::Request(_) => StatusCode::UNPROCESSABLE_ENTITY,
        StoreError::Balance(_) | StoreError::Transaction(_) => StatusCode::BAD_REQUEST,
    };
    api_error(status, err)
}

fn parse_currency(raw: &str) -> Result<CurrencyCode, (StatusCode, Json<ApiError>)> {
    CurrencyCode::new(raw).map_err(|e| api_error(StatusCode::BAD_REQUEST, e))
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}

/// GET /api/wallet - Full wallet snapshot
pub async fn get_wallet(State(state): State<ApiState>) -> Json<WalletSnapshot> {
    Json(state.store.snapshot().await)
}

/// GET /api/user - Wallet owner profile
pub async fn get_user(State(state): State<ApiState>) -> Json<User> {
    Json(state.store.user().await)
}

/// GET /api/balances - All balances
pub async fn get_balances(State(state): State<ApiState>) -> Json<Vec<WalletBalance>> {
    Json(state.store.balances().await)
}

/// GET /api/balances/total - Indicative total in USD
pub async fn get_total_balance(State(state): State<ApiState>) -> Json<TotalBalanceResponse> {
    let total = state.store.indicative_total().await;
    let balances = state.store.balances().await.len();

    Json(TotalBalanceResponse {
        currency: "USD",
        total,
        balances,
    })
}

/// POST /api/balances/{currency} - Adjust a balance by a delta
pub async fn update_balance(
    State(state): State<ApiState>,
    Path(currency): Path<String>,
    Json(req): Json<UpdateBalanceRequest>,
) -> ApiResult<BalanceUpdateResponse> {
    let currency = parse_currency(&currency)?;

    state
        .store
        .update_balance(&currency, req.delta)
        .await
        .map_err(store_error)?;

    let amount = state.store.balance(&currency).await.map(|b| b.amount);
    Ok(Json(BalanceUpdateResponse {
        currency,
        applied: amount.is_some(),
        amount,
    }))
}

/// GET /api/transactions - Filtered, sorted transaction history
pub async fn list_transactions(
    State(state): State<ApiState>,
    Query(query): Query<HistoryQuery>,
) -> Json<Vec<Transaction>> {
    let mut transactions = state
        .store
        .history(&query.filter(), query.sort.unwrap_or_default())
        .await;

    if let Some(limit) = query.limit {
        transactions.truncate(limit);
    }

    Json(transactions)
}

/// POST /api/transactions - Record a transaction
pub async fn create_transaction(
    State(state): State<ApiState>,
    Json(req): Json<NewTransaction>,
) -> Result<(StatusCode, Json<Transaction>), (StatusCode, Json<ApiError>)> {
    let transaction = state.store.add_transaction(req).await.map_err(store_error)?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

/// POST /api/send - Send money (waits for the simulated network delay)
pub async fn send_money(
    State(state): State<ApiState>,
    Json(req): Json<SendRequest>,
) -> ApiResult<Transaction> {
    if req.recipient.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Recipient is required"));
    }

    let transaction = state
        .store
        .send_money(&req.recipient, req.amount, &req.currency, &req.description)
        .await
        .map_err(store_error)?;

    Ok(Json(transaction))
}

/// POST /api/send/quote - Fee and affordability of a send
pub async fn quote_send(
    State(state): State<ApiState>,
    Json(req): Json<QuoteRequest>,
) -> Json<SendQuote> {
    Json(
        state
            .store
            .quote_send(&req.recipient, req.amount, &req.currency)
            .await,
    )
}

/// POST /api/receive - Create a shareable payment request
pub async fn request_payment(
    State(state): State<ApiState>,
    Json(req): Json<ReceiveRequest>,
) -> Result<(StatusCode, Json<PaymentRequest>), (StatusCode, Json<ApiError>)> {
    let request = state
        .store
        .request_payment(req.amount, &req.currency, &req.description)
        .await
        .map_err(store_error)?;

    Ok((StatusCode::CREATED, Json(request)))
}

/// GET /api/summary - Totals over completed transactions
pub async fn get_summary(State(state): State<ApiState>) -> Json<WalletSummary> {
    Json(state.store.summary().await)
}

/// GET /api/notifications - Notification feed with unread count
pub async fn list_notifications(State(state): State<ApiState>) -> Json<NotificationsResponse> {
    let notifications = state.store.notifications().await;
    let unread = notifications.iter().filter(|n| !n.read).count();

    Json(NotificationsResponse {
        unread,
        notifications,
    })
}

/// POST /api/notifications/{id}/read - Mark a notification read
pub async fn mark_notification_read(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> ApiResult<MarkReadResponse> {
    if state.store.mark_notification_as_read(&id).await {
        Ok(Json(MarkReadResponse { id, read: true }))
    } else {
        Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Notification not found: {}", id),
        ))
    }
}

/// GET /api/contacts?q= - Recipient search
pub async fn search_contacts(
    State(state): State<ApiState>,
    Query(query): Query<ContactQuery>,
) -> Json<Vec<String>> {
    Json(state.store.search_contacts(&query.q).await)
}
