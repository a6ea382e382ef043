//! Wallet state store
//!
//! Holds the user profile, per-currency balances, the newest-first
//! transaction list and the newest-first notification list, and applies the
//! wallet's mutation rules:
//! - `send_money`: simulated network wait, 2.5% fee, send record, balance
//!   debit, "Payment Sent" notification
//! - `add_transaction`: stamp id + timestamp and prepend
//! - `mark_notification_as_read`: flip the read flag by id
//! - `update_balance`: add a delta to one currency
//!
//! The store is an explicit handle (`Clone`), shared by whatever needs it.
//! All mutations take the same write lock, so concurrent sends against one
//! currency serialize instead of overwriting each other.

use crate::core::{
    Amount, BalanceError, Balances, CurrencyCode, NewTransaction, NotificationItem, Party,
    Transaction, TransactionError, User, WalletBalance,
};
use crate::crypto::IdGenerator;
use crate::query::{
    indicative_total, search_contacts, PaymentRequest, RequestError, SendQuote, SortBy,
    TransactionFilter, WalletSummary,
};
use crate::store::config::StoreConfig;
use crate::store::events::{EventBus, WalletEvent};
use crate::store::seed::SeedData;
use chrono::Utc;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, RwLock};

// =============================================================================
// Error Types
// =============================================================================

/// Wallet store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Unknown currency: {0}")]
    UnknownCurrency(CurrencyCode),
    #[error("Insufficient funds in {currency}: have {have}, need {need}")]
    InsufficientFunds {
        currency: CurrencyCode,
        have: Amount,
        need: Amount,
    },
    #[error("Invalid amount {0}: must be greater than 0")]
    InvalidAmount(Amount),
    #[error("Amount {0} is out of range once the fee is added")]
    Overflow(Amount),
    #[error("Balance error: {0}")]
    Balance(#[from] BalanceError),
    #[error("Transaction error: {0}")]
    Transaction(#[from] TransactionError),
    #[error("Payment request error: {0}")]
    Request(#[from] RequestError),
}

// =============================================================================
// State
// =============================================================================

#[derive(Debug)]
struct WalletState {
    user: User,
    balances: Balances,
    transactions: Vec<Transaction>,
    notifications: Vec<NotificationItem>,
    contacts: Vec<String>,
}

/// Point-in-time copy of the whole wallet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalletSnapshot {
    pub user: User,
    pub balances: Vec<WalletBalance>,
    pub transactions: Vec<Transaction>,
    pub notifications: Vec<NotificationItem>,
    pub loading: bool,
}

/// Counts an in-flight send for as long as it lives
struct BusyGuard<'a> {
    in_flight: &'a AtomicUsize,
}

impl<'a> BusyGuard<'a> {
    fn enter(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self { in_flight }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

// =============================================================================
// Wallet Store
// =============================================================================

/// Shared handle to the wallet state
#[derive(Debug, Clone)]
pub struct WalletStore {
    state: Arc<RwLock<WalletState>>,
    config: Arc<StoreConfig>,
    ids: Arc<IdGenerator>,
    events: Arc<EventBus>,
    in_flight: Arc<AtomicUsize>,
}

impl WalletStore {
    /// Create a store from seed data.
    ///
    /// Fails if two balances share a currency or a seeded transaction breaks
    /// the counterparty rules. Seeded lists are ordered newest-first.
    pub fn new(seed: SeedData, config: StoreConfig) -> Result<Self, StoreError> {
        let balances = Balances::from_entries(seed.balances)?;

        for tx in &seed.transactions {
            tx.validate()?;
        }

        let mut transactions = seed.transactions;
        transactions.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        let mut notifications = seed.notifications;
        notifications.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        log::info!(
            "Wallet store ready for {}: {} balance(s), {} transaction(s), {} notification(s)",
            seed.user.name,
            balances.len(),
            transactions.len(),
            notifications.len()
        );

        let events = Arc::new(EventBus::new(config.event_capacity));

        Ok(Self {
            state: Arc::new(RwLock::new(WalletState {
                user: seed.user,
                balances,
                transactions,
                notifications,
                contacts: seed.contacts,
            })),
            config: Arc::new(config),
            ids: Arc::new(IdGenerator::new()),
            events,
            in_flight: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Store seeded with the dashboard's mock data
    pub fn demo(config: StoreConfig) -> Result<Self, StoreError> {
        Self::new(SeedData::demo(), config)
    }

    /// Subscribe to the change feed
    pub fn subscribe(&self) -> broadcast::Receiver<WalletEvent> {
        self.events.subscribe()
    }

    /// True while any send is waiting on the network
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Send money to a named recipient.
    ///
    /// Waits for the configured send delay, then records a completed send,
    /// debits `amount + fee` and prepends a notification, all under one
    /// write lock. Nothing is recorded if the future is dropped during the
    /// wait.
    ///
    /// Under the permissive policy an unknown currency leaves balances
    /// untouched and overdrafts are allowed. The strict policy rejects those
    /// cases. Amounts whose debit would leave the `i64` range fail under
    /// either policy. Every failure leaves the state unchanged.
    pub async fn send_money(
        &self,
        recipient_name: &str,
        amount: Amount,
        currency: &CurrencyCode,
        description: &str,
    ) -> Result<Transaction, StoreError> {
        let _busy = BusyGuard::enter(&self.in_flight);
        let fee = self.config.fees.fee_for(amount);
        let debit = self
            .config
            .fees
            .total_debit(amount)
            .ok_or(StoreError::Overflow(amount))?;
        let delta = debit.checked_neg().ok_or(StoreError::Overflow(amount))?;

        if self.config.policy.is_strict() {
            let state = self.state.read().await;
            check_send(&state.balances, amount, debit, currency)?;
        }

        self.events.publish(WalletEvent::SendStarted {
            recipient: recipient_name.to_string(),
            amount,
            currency: currency.clone(),
        });
        log::debug!(
            "Sending {} {} to {} (fee {})",
            amount,
            currency,
            recipient_name,
            fee
        );

        tokio::time::sleep(self.config.send_delay).await;

        let mut state = self.state.write().await;
        if self.config.policy.is_strict() {
            // Balance may have moved during the wait
            check_send(&state.balances, amount, debit, currency)?;
        }

        // The only fallible step; nothing is recorded if it fails
        let new_balance = state.balances.adjust(currency, delta)?;
        if new_balance.is_none() {
            log::warn!("Send in {} recorded without a matching balance", currency);
        }

        let now = Utc::now();
        let reference = self.ids.reference(now);
        let transaction = NewTransaction::send(
            amount,
            currency.clone(),
            Party::from_name(recipient_name),
            description,
        )
        .with_fee(fee)
        .with_reference(&reference)
        .into_transaction(self.ids.next_id(now), now);

        state.transactions.insert(0, transaction.clone());

        let notification =
            NotificationItem::payment_sent(self.ids.next_id(now), amount, recipient_name, now);
        state.notifications.insert(0, notification.clone());
        drop(state);

        log::info!(
            "Sent {} {} to {} ({})",
            amount,
            currency,
            recipient_name,
            reference
        );

        self.events.publish(WalletEvent::TransactionAdded {
            transaction: transaction.clone(),
        });
        if let Some(amount) = new_balance {
            self.events.publish(WalletEvent::BalanceUpdated {
                currency: currency.clone(),
                amount,
            });
        }
        self.events
            .publish(WalletEvent::NotificationAdded { notification });

        Ok(transaction)
    }

    /// Record a transaction, assigning its id and timestamp.
    ///
    /// Balances are not touched.
    pub async fn add_transaction(&self, new: NewTransaction) -> Result<Transaction, StoreError> {
        new.validate()?;

        let now = Utc::now();
        let transaction = new.into_transaction(self.ids.next_id(now), now);

        self.state
            .write()
            .await
            .transactions
            .insert(0, transaction.clone());

        log::debug!(
            "Recorded {} transaction {} ({} {})",
            transaction.kind,
            transaction.id,
            transaction.amount,
            transaction.currency
        );
        self.events.publish(WalletEvent::TransactionAdded {
            transaction: transaction.clone(),
        });

        Ok(transaction)
    }

    /// Mark a notification read. Returns `false` if no notification has this
    /// id. Calling it again is a no-op.
    pub async fn mark_notification_as_read(&self, id: &str) -> bool {
        let mut found = false;
        let mut changed = false;

        {
            let mut state = self.state.write().await;
            for notification in state.notifications.iter_mut().filter(|n| n.id == id) {
                found = true;
                if !notification.read {
                    notification.read = true;
                    changed = true;
                }
            }
        }

        if changed {
            self.events.publish(WalletEvent::NotificationRead {
                id: id.to_string(),
            });
        }
        found
    }

    /// Add `delta` to the balance in `currency`.
    ///
    /// Permissive policy: an unknown currency is a no-op and the balance may
    /// go negative. Strict policy: both are errors.
    ///
    /// A sum outside the `i64` range fails with the balance unchanged.
    pub async fn update_balance(
        &self,
        currency: &CurrencyCode,
        delta: Amount,
    ) -> Result<(), StoreError> {
        let strict = self.config.policy.is_strict();
        let mut state = self.state.write().await;

        let current = match state.balances.get(currency) {
            Some(balance) => balance.amount,
            None if strict => return Err(StoreError::UnknownCurrency(currency.clone())),
            None => {
                log::debug!("Ignoring balance update for unknown currency {}", currency);
                return Ok(());
            }
        };

        if strict && (current + delta).is_negative() {
            return Err(StoreError::InsufficientFunds {
                currency: currency.clone(),
                have: current,
                need: -delta,
            });
        }

        let updated = state.balances.adjust(currency, delta)?;
        drop(state);

        if let Some(amount) = updated {
            self.events.publish(WalletEvent::BalanceUpdated {
                currency: currency.clone(),
                amount,
            });
        }
        Ok(())
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub async fn user(&self) -> User {
        self.state.read().await.user.clone()
    }

    pub async fn balances(&self) -> Vec<WalletBalance> {
        self.state.read().await.balances.to_vec()
    }

    pub async fn balance(&self, currency: &CurrencyCode) -> Option<WalletBalance> {
        self.state.read().await.balances.get(currency).cloned()
    }

    /// All transactions, newest first
    pub async fn transactions(&self) -> Vec<Transaction> {
        self.state.read().await.transactions.clone()
    }

    /// The `count` most recent transactions
    pub async fn recent_transactions(&self, count: usize) -> Vec<Transaction> {
        let state = self.state.read().await;
        state.transactions.iter().take(count).cloned().collect()
    }

    /// Transactions matching `filter`, in `sort` order
    pub async fn history(&self, filter: &TransactionFilter, sort: SortBy) -> Vec<Transaction> {
        let state = self.state.read().await;
        filter.apply(&state.transactions, sort)
    }

    /// All notifications, newest first
    pub async fn notifications(&self) -> Vec<NotificationItem> {
        self.state.read().await.notifications.clone()
    }

    pub async fn unread_count(&self) -> usize {
        let state = self.state.read().await;
        state.notifications.iter().filter(|n| !n.read).count()
    }

    /// Fee, total and affordability of a prospective send
    pub async fn quote_send(
        &self,
        recipient: &str,
        amount: Amount,
        currency: &CurrencyCode,
    ) -> SendQuote {
        let state = self.state.read().await;
        SendQuote::new(recipient, amount, currency, &state.balances, &self.config.fees)
    }

    /// Build a shareable request for someone to pay this wallet.
    ///
    /// Requests are handed out, not stored; nothing changes until the payment
    /// arrives as a `receive` transaction.
    pub async fn request_payment(
        &self,
        amount: Option<Amount>,
        currency: &CurrencyCode,
        description: &str,
    ) -> Result<PaymentRequest, StoreError> {
        let requester = self.state.read().await.user.name.clone();
        let request = PaymentRequest::new(
            &self.ids.link_id(),
            &requester,
            amount,
            currency.clone(),
            description,
            Utc::now(),
        )?;

        log::info!("Payment request {} created ({})", request.id, request.link);
        Ok(request)
    }

    /// Totals over completed transactions
    pub async fn summary(&self) -> WalletSummary {
        let state = self.state.read().await;
        WalletSummary::from_transactions(&state.transactions)
    }

    /// Balances folded into USD at the dashboard's display rates
    pub async fn indicative_total(&self) -> Amount {
        indicative_total(&self.state.read().await.balances)
    }

    pub async fn search_contacts(&self, query: &str) -> Vec<String> {
        search_contacts(&self.state.read().await.contacts, query)
    }

    pub async fn snapshot(&self) -> WalletSnapshot {
        let state = self.state.read().await;
        WalletSnapshot {
            user: state.user.clone(),
            balances: state.balances.to_vec(),
            transactions: state.transactions.clone(),
            notifications: state.notifications.clone(),
            loading: self.is_loading(),
        }
    }
}

fn check_send(
    balances: &Balances,
    amount: Amount,
    need: Amount,
    currency: &CurrencyCode,
) -> Result<(), StoreError> {
    if !amount.is_positive() {
        return Err(StoreError::InvalidAmount(amount));
    }
    let balance = balances
        .get(currency)
        .ok_or_else(|| StoreError::UnknownCurrency(currency.clone()))?;

    if balance.amount < need {
        return Err(StoreError::InsufficientFunds {
            currency: currency.clone(),
            have: balance.amount,
            need,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{NotificationType, TransactionStatus, TransactionType};
    use crate::store::config::ValidationPolicy;
    use std::time::Duration;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    fn fast_config() -> StoreConfig {
        StoreConfig {
            send_delay: Duration::from_millis(5),
            ..Default::default()
        }
    }

    fn strict_config() -> StoreConfig {
        StoreConfig {
            policy: ValidationPolicy::Strict,
            ..fast_config()
        }
    }

    fn demo_store() -> WalletStore {
        WalletStore::demo(fast_config()).unwrap()
    }

    #[tokio::test]
    async fn test_send_money_debits_amount_plus_fee() {
        let store = demo_store();
        let usd = code("USD");
        let before = store.balance(&usd).await.unwrap().amount;
        let unread_before = store.unread_count().await;

        let tx = store
            .send_money("Bob", Amount::from_major(100), &usd, "lunch")
            .await
            .unwrap();

        let after = store.balance(&usd).await.unwrap().amount;
        assert_eq!(after, before - Amount::from_minor(10_250));
        assert_eq!(after, Amount::from_minor(238_425));

        let first = &store.transactions().await[0];
        assert_eq!(first, &tx);
        assert_eq!(first.kind, TransactionType::Send);
        assert_eq!(first.amount, Amount::from_major(100));
        assert_eq!(first.fee, Some(Amount::from_minor(250)));
        assert_eq!(first.status, TransactionStatus::Completed);
        assert_eq!(first.description, "lunch");
        assert_eq!(first.recipient.as_ref().unwrap().email, "bob@example.com");
        assert!(first.sender.is_none());
        assert!(first.reference.as_ref().unwrap().starts_with("TXN-"));

        let notification = &store.notifications().await[0];
        assert_eq!(notification.kind, NotificationType::Transaction);
        assert_eq!(notification.message, "You sent $100.00 to Bob");
        assert_eq!(store.unread_count().await, unread_before + 1);
    }

    #[tokio::test]
    async fn test_send_unknown_currency_is_silent_when_permissive() {
        let store = demo_store();
        let balances_before = store.balances().await;

        let tx = store
            .send_money("Bob", Amount::from_major(10), &code("JPY"), "")
            .await
            .unwrap();

        assert_eq!(store.balances().await, balances_before);
        assert_eq!(store.transactions().await[0].id, tx.id);
    }

    #[tokio::test]
    async fn test_send_can_overdraw_when_permissive() {
        let store = demo_store();
        let usd = code("USD");

        store
            .send_money("Bob", Amount::from_major(5_000), &usd, "")
            .await
            .unwrap();

        assert!(store.balance(&usd).await.unwrap().amount.is_negative());
    }

    #[tokio::test]
    async fn test_strict_send_rejections_leave_state_unchanged() {
        let store = WalletStore::demo(strict_config()).unwrap();
        let before = store.snapshot().await;

        let result = store
            .send_money("Bob", Amount::from_major(10), &code("JPY"), "")
            .await;
        assert_eq!(result, Err(StoreError::UnknownCurrency(code("JPY"))));

        let result = store.send_money("Bob", Amount::ZERO, &code("USD"), "").await;
        assert_eq!(result, Err(StoreError::InvalidAmount(Amount::ZERO)));

        let result = store
            .send_money("Bob", Amount::from_major(2_486), &code("USD"), "")
            .await;
        assert!(matches!(result, Err(StoreError::InsufficientFunds { .. })));

        assert_eq!(store.snapshot().await, before);
        assert!(!store.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_while_send_in_flight() {
        let store = WalletStore::demo(StoreConfig {
            send_delay: Duration::from_millis(200),
            ..Default::default()
        })
        .unwrap();
        assert!(!store.is_loading());

        let sender = store.clone();
        let handle = tokio::spawn(async move {
            sender
                .send_money("Bob", Amount::from_major(1), &code("USD"), "")
                .await
        });

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(store.is_loading());
        assert!(store.snapshot().await.loading);
        assert_eq!(store.transactions().await.len(), 4);

        handle.await.unwrap().unwrap();
        assert!(!store.is_loading());
        assert_eq!(store.transactions().await.len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_strict_send_rechecks_after_wait() {
        let store = WalletStore::demo(StoreConfig {
            send_delay: Duration::from_millis(100),
            ..strict_config()
        })
        .unwrap();
        let usd = code("USD");

        let sender = store.clone();
        let handle = tokio::spawn(async move {
            sender
                .send_money("Bob", Amount::from_major(2_000), &code("USD"), "")
                .await
        });

        // Passes the first check, then the balance is drained mid-wait
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(store.is_loading());
        store
            .update_balance(&usd, Amount::from_major(-2_000))
            .await
            .unwrap();

        let result = handle.await.unwrap();
        assert_eq!(
            result,
            Err(StoreError::InsufficientFunds {
                currency: usd.clone(),
                have: Amount::from_minor(48_675),
                need: Amount::from_minor(205_000),
            })
        );
        assert_eq!(
            store.balance(&usd).await.unwrap().amount,
            Amount::from_minor(48_675)
        );
        assert_eq!(store.transactions().await.len(), 4);
        assert_eq!(store.notifications().await.len(), 2);
        assert!(!store.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_send_records_nothing() {
        let store = WalletStore::demo(StoreConfig {
            send_delay: Duration::from_millis(500),
            ..Default::default()
        })
        .unwrap();
        let before = store.snapshot().await;

        let result = tokio::time::timeout(
            Duration::from_millis(20),
            store.send_money("Bob", Amount::from_major(1), &code("USD"), ""),
        )
        .await;

        assert!(result.is_err());
        assert!(!store.is_loading());
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_send_out_of_range_amount_changes_nothing() {
        let store = demo_store();
        let before = store.snapshot().await;
        let huge: Amount = "92233720368547758.07".parse().unwrap();

        let result = store.send_money("Bob", huge, &code("USD"), "").await;
        assert_eq!(result, Err(StoreError::Overflow(huge)));

        assert_eq!(store.snapshot().await, before);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_send_balance_underflow_changes_nothing() {
        let seed = SeedData::empty(SeedData::demo().user)
            .with_balance(code("USD"), Amount::from_minor(i64::MIN + 100));
        let store = WalletStore::new(seed, fast_config()).unwrap();
        let before = store.snapshot().await;

        let result = store
            .send_money("Bob", Amount::from_major(1), &code("USD"), "")
            .await;
        assert_eq!(
            result,
            Err(StoreError::Balance(BalanceError::Overflow(code("USD"))))
        );
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_update_balance_overflow_changes_nothing() {
        let store = demo_store();
        let usd = code("USD");
        let huge: Amount = "92233720368547758.07".parse().unwrap();

        let result = store.update_balance(&usd, huge).await;
        assert_eq!(
            result,
            Err(StoreError::Balance(BalanceError::Overflow(usd.clone())))
        );
        assert_eq!(
            store.balance(&usd).await.unwrap().amount,
            Amount::from_minor(248_675)
        );
    }

    #[tokio::test]
    async fn test_request_payment() {
        let store = demo_store();
        let before = store.snapshot().await;

        let request = store
            .request_payment(Some(Amount::from_major(40)), &code("EUR"), "Concert tickets")
            .await
            .unwrap();
        assert_eq!(request.requester, "Alex Johnson");
        assert_eq!(request.amount, Some(Amount::from_major(40)));
        assert!(request.link.ends_with(&request.id));

        let other = store.request_payment(None, &code("USD"), "").await.unwrap();
        assert_ne!(request.id, other.id);

        let result = store
            .request_payment(Some(Amount::ZERO), &code("USD"), "")
            .await;
        assert_eq!(
            result,
            Err(StoreError::Request(RequestError::NonPositiveAmount(
                Amount::ZERO
            )))
        );

        // Requests move no money
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_concurrent_sends_do_not_lose_updates() {
        let store = demo_store();
        let usd = code("USD");
        let before = store.balance(&usd).await.unwrap().amount;

        let (a, b) = tokio::join!(
            store.send_money("Bob", Amount::from_major(100), &usd, "a"),
            store.send_money("Carol", Amount::from_major(100), &usd, "b"),
        );
        a.unwrap();
        b.unwrap();

        let after = store.balance(&usd).await.unwrap().amount;
        assert_eq!(after, before - Amount::from_minor(20_500));
        assert_eq!(store.transactions().await.len(), 6);
    }

    #[tokio::test]
    async fn test_update_balance_unknown_currency_is_noop() {
        let store = demo_store();
        let before = store.balances().await;

        store
            .update_balance(&code("CHF"), Amount::from_major(50))
            .await
            .unwrap();
        assert_eq!(store.balances().await, before);

        let strict = WalletStore::demo(strict_config()).unwrap();
        assert_eq!(
            strict
                .update_balance(&code("CHF"), Amount::from_major(50))
                .await,
            Err(StoreError::UnknownCurrency(code("CHF")))
        );
    }

    #[tokio::test]
    async fn test_update_balance_allows_negative_unless_strict() {
        let store = demo_store();
        let gbp = code("GBP");

        store
            .update_balance(&gbp, Amount::from_major(-1_000))
            .await
            .unwrap();
        assert_eq!(
            store.balance(&gbp).await.unwrap().amount,
            Amount::from_minor(-12_480)
        );

        let strict = WalletStore::demo(strict_config()).unwrap();
        let result = strict.update_balance(&gbp, Amount::from_major(-1_000)).await;
        assert!(matches!(result, Err(StoreError::InsufficientFunds { .. })));

        strict
            .update_balance(&gbp, Amount::from_minor(-87_520))
            .await
            .unwrap();
        assert_eq!(strict.balance(&gbp).await.unwrap().amount, Amount::ZERO);
    }

    #[tokio::test]
    async fn test_mark_notification_as_read_is_idempotent() {
        let store = demo_store();
        assert_eq!(store.unread_count().await, 1);

        assert!(store.mark_notification_as_read("1").await);
        let once = store.snapshot().await;

        assert!(store.mark_notification_as_read("1").await);
        let twice = store.snapshot().await;

        assert_eq!(once, twice);
        assert_eq!(store.unread_count().await, 0);
        assert!(!store.mark_notification_as_read("missing").await);
    }

    #[tokio::test]
    async fn test_add_transaction_prepends_with_fresh_id() {
        let store = demo_store();
        let usd = code("USD");
        let called_at = Utc::now();

        let first = store
            .add_transaction(NewTransaction::deposit(Amount::from_major(20), usd.clone(), "Top up"))
            .await
            .unwrap();
        let second = store
            .add_transaction(NewTransaction::withdrawal(Amount::from_major(5), usd.clone(), "ATM"))
            .await
            .unwrap();

        let transactions = store.transactions().await;
        assert_eq!(transactions[0], second);
        assert_eq!(transactions[1], first);
        assert!(!first.id.is_empty());
        assert_ne!(first.id, second.id);
        assert!(first.timestamp >= called_at);

        // Balances are untouched
        assert_eq!(
            store.balance(&usd).await.unwrap().amount,
            Amount::from_minor(248_675)
        );
    }

    #[tokio::test]
    async fn test_add_transaction_rejects_missing_counterparty() {
        let store = demo_store();
        let mut tx = NewTransaction::send(
            Amount::from_major(1),
            code("USD"),
            Party::from_name("Bob"),
            "",
        );
        tx.recipient = None;

        let result = store.add_transaction(tx).await;
        assert_eq!(
            result,
            Err(StoreError::Transaction(TransactionError::MissingRecipient))
        );
        assert_eq!(store.transactions().await.len(), 4);
    }

    #[tokio::test]
    async fn test_recent_transactions() {
        let empty = WalletStore::new(SeedData::empty(SeedData::demo().user), fast_config()).unwrap();
        assert!(empty.recent_transactions(5).await.is_empty());

        let store = demo_store();
        let recent = store.recent_transactions(2).await;
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, "1");
        assert_eq!(store.recent_transactions(10).await.len(), 4);
    }

    #[test]
    fn test_duplicate_currency_seed_rejected() {
        let mut seed = SeedData::demo();
        seed.balances
            .push(WalletBalance::new(code("EUR"), Amount::from_major(1)));

        let result = WalletStore::new(seed, fast_config());
        assert!(matches!(
            result,
            Err(StoreError::Balance(BalanceError::DuplicateCurrency(_)))
        ));
    }

    #[test]
    fn test_seed_lists_sorted_newest_first() {
        let mut seed = SeedData::demo();
        seed.transactions.reverse();
        seed.notifications.reverse();

        let store = WalletStore::new(seed, fast_config()).unwrap();
        let state = store.state.try_read().unwrap();
        assert_eq!(state.transactions[0].id, "1");
        assert_eq!(state.notifications[0].id, "1");
    }

    #[tokio::test]
    async fn test_mutations_publish_events() {
        let store = demo_store();
        let mut rx = store.subscribe();

        store
            .add_transaction(NewTransaction::deposit(Amount::from_major(1), code("USD"), ""))
            .await
            .unwrap();
        assert!(matches!(
            rx.recv().await.unwrap(),
            WalletEvent::TransactionAdded { .. }
        ));

        store
            .update_balance(&code("EUR"), Amount::from_major(1))
            .await
            .unwrap();
        match rx.recv().await.unwrap() {
            WalletEvent::BalanceUpdated { currency, amount } => {
                assert_eq!(currency, code("EUR"));
                assert_eq!(amount, Amount::from_minor(125_130));
            }
            other => panic!("unexpected event: {:?}", other),
        }

        store.mark_notification_as_read("1").await;
        assert!(matches!(
            rx.recv().await.unwrap(),
            WalletEvent::NotificationRead { .. }
        ));
    }
}
