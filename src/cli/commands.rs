//! CLI commands for the wallet
//!
//! Implements all command handlers for the CLI interface. Every command runs
//! against one in-memory store seeded at startup.

use crate::core::{Amount, CurrencyCode, NotificationItem, Transaction, TransactionStatus};
use crate::query::{SortBy, TransactionFilter};
use crate::store::WalletStore;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Default number of rows for `transactions`
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

fn status_icon(status: TransactionStatus) -> &'static str {
    match status {
        TransactionStatus::Completed => "✅",
        TransactionStatus::Pending => "⏳",
        TransactionStatus::Failed => "❌",
        TransactionStatus::Cancelled => "🚫",
    }
}

fn print_transaction(tx: &Transaction, last: bool) {
    let branch = if last { "└─" } else { "├─" };
    let sign = if tx.kind.is_outgoing() { "-" } else { "+" };
    let party = tx
        .counterparty()
        .map(|p| p.name.as_str())
        .unwrap_or("-");

    println!(
        "   {} {} {} {}{} {} | {} | {} | {}",
        branch,
        status_icon(tx.status),
        tx.timestamp.format("%Y-%m-%d %H:%M"),
        sign,
        tx.amount,
        tx.currency,
        tx.kind,
        party,
        tx.description
    );
    if let Some(fee) = tx.fee {
        let pad = if last { " " } else { "│" };
        println!("   {}    fee {} {}", pad, fee, tx.currency);
    }
}

fn print_notification(item: &NotificationItem) {
    let marker = if item.read { "  " } else { "🔵" };
    println!("   {} [{}] {} ({})", marker, item.id, item.title, item.kind);
    println!("      {}", item.message);
    if let Some(action) = &item.action {
        println!("      ➡️  {} ({})", action.label, action.url);
    }
}

/// Dashboard overview
pub async fn cmd_summary(store: &WalletStore) -> CliResult<()> {
    let snapshot = store.snapshot().await;
    let total = store.indicative_total().await;
    let summary = store.summary().await;
    let unread = store.unread_count().await;

    let verified = if snapshot.user.verified { " ✔️" } else { "" };
    println!("👤 {}{} <{}>", snapshot.user.name, verified, snapshot.user.email);
    println!("💰 Total balance: ${} (indicative)", total);
    println!(
        "📊 Transactions: {} ({} completed, {} pending)",
        summary.transaction_count, summary.completed_count, summary.pending_count
    );
    for (currency, totals) in &summary.by_currency {
        println!(
            "   ├─ {}: in {} / out {} / fees {} / net {}",
            currency, totals.total_received, totals.total_sent, totals.total_fees, totals.net
        );
    }
    println!("🔔 Unread notifications: {}", unread);

    println!("\n🕒 Recent activity:");
    let recent = store.recent_transactions(3).await;
    if recent.is_empty() {
        println!("   📭 No transactions yet");
    }
    for (i, tx) in recent.iter().enumerate() {
        print_transaction(tx, i + 1 == recent.len());
    }

    Ok(())
}

/// List balances per currency
pub async fn cmd_balances(store: &WalletStore) -> CliResult<()> {
    let balances = store.balances().await;

    if balances.is_empty() {
        println!("📭 No balances");
        return Ok(());
    }

    println!("💰 Balances:");
    for balance in &balances {
        match balance.locked {
            Some(locked) if locked.is_positive() => {
                println!(
                    "   {} {} (🔒 {} locked)",
                    balance.amount, balance.currency, locked
                );
            }
            _ => println!("   {} {}", balance.amount, balance.currency),
        }
    }
    println!("\n   Total: ${} (indicative)", store.indicative_total().await);

    Ok(())
}

/// Transaction history with optional filters
pub async fn cmd_transactions(
    store: &WalletStore,
    filter: &TransactionFilter,
    sort: SortBy,
    limit: usize,
) -> CliResult<()> {
    let history = store.history(filter, sort).await;

    if history.is_empty() {
        println!("📭 No transactions match");
        return Ok(());
    }

    let shown = history.len().min(limit);
    println!(
        "📜 Transactions ({} of {}, by {}):",
        shown,
        history.len(),
        sort
    );
    for (i, tx) in history.iter().take(limit).enumerate() {
        print_transaction(tx, i + 1 == shown);
    }
    if history.len() > limit {
        println!("   ... and {} more", history.len() - limit);
    }

    Ok(())
}

/// Send money to a contact
pub async fn cmd_send(
    store: &WalletStore,
    to: &str,
    amount: Amount,
    currency: &CurrencyCode,
    description: &str,
) -> CliResult<()> {
    let to = to.trim();
    if to.is_empty() {
        return Err("Recipient must not be empty".into());
    }
    if !amount.is_positive() {
        return Err(format!("Amount must be positive, got {}", amount).into());
    }

    let quote = store.quote_send(to, amount, currency).await;
    println!("💸 Sending {} {} to {}", amount, currency, to);
    println!("   ├─ Fee: {} {}", quote.fee, currency);
    println!("   └─ Total: {} {}", quote.total, currency);
    if !quote.can_send {
        println!("   ⚠️  Total exceeds the available balance");
    }

    let tx = store.send_money(to, amount, currency, description).await?;

    println!("\n✅ Payment sent!");
    println!("   🆔 ID: {}", tx.id);
    if let Some(reference) = &tx.reference {
        println!("   🧾 Reference: {}", reference);
    }
    if let Some(balance) = store.balance(currency).await {
        println!("   💰 New {} balance: {}", currency, balance.amount);
    }

    Ok(())
}

/// Create a payment request link
pub async fn cmd_request(
    store: &WalletStore,
    amount: Option<Amount>,
    currency: &CurrencyCode,
    description: &str,
) -> CliResult<()> {
    let request = store.request_payment(amount, currency, description).await?;

    println!("📥 Payment request created!");
    match request.amount {
        Some(amount) => println!("   ├─ Amount: {} {}", amount, request.currency),
        None => println!("   ├─ Amount: open ({})", request.currency),
    }
    if let Some(reason) = &request.description {
        println!("   ├─ For: {}", reason);
    }
    println!("   └─ 🔗 Link: {}", request.link);
    println!("
   Share: {}", request.share_message());

    Ok(())
}

/// Manually adjust a balance
pub async fn cmd_adjust(store: &WalletStore, currency: &CurrencyCode, delta: Amount) -> CliResult<()> {
    let before = store.balance(currency).await;
    store.update_balance(currency, delta).await?;

    match (before, store.balance(currency).await) {
        (Some(before), Some(after)) => {
            println!("✅ {} balance adjusted by {}", currency, delta);
            println!("   {} ➡️  {}", before.amount, after.amount);
        }
        _ => println!("⚠️  No {} balance held; nothing changed", currency),
    }

    Ok(())
}

/// Show the notification feed
pub async fn cmd_notifications(store: &WalletStore) -> CliResult<()> {
    let notifications = store.notifications().await;

    if notifications.is_empty() {
        println!("📭 No notifications");
        return Ok(());
    }

    println!(
        "🔔 Notifications ({} unread):",
        store.unread_count().await
    );
    for item in &notifications {
        print_notification(item);
    }

    Ok(())
}

/// Mark one notification read
pub async fn cmd_read(store: &WalletStore, id: &str) -> CliResult<()> {
    if store.mark_notification_as_read(id).await {
        println!("✅ Notification {} marked as read", id);
        println!("   🔔 Unread remaining: {}", store.unread_count().await);
    } else {
        println!("❌ No notification with id {}", id);
    }

    Ok(())
}

/// Search recipients
pub async fn cmd_contacts(store: &WalletStore, query: &str) -> CliResult<()> {
    let matches = store.search_contacts(query).await;

    if matches.is_empty() {
        println!("📭 No contacts match '{}'", query.trim());
        return Ok(());
    }

    println!("👥 Contacts matching '{}':", query.trim());
    for name in &matches {
        println!("   {}", name);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{StoreConfig, ValidationPolicy};
    use std::time::Duration;

    fn store(policy: ValidationPolicy) -> WalletStore {
        let config = StoreConfig {
            send_delay: Duration::ZERO,
            policy,
            ..Default::default()
        };
        WalletStore::demo(config).unwrap()
    }

    #[tokio::test]
    async fn test_cmd_send_debits_balance() {
        let store = store(ValidationPolicy::Permissive);
        let usd = CurrencyCode::new("USD").unwrap();

        cmd_send(&store, "Emma Wilson", Amount::from_major(10), &usd, "Lunch")
            .await
            .unwrap();

        let balance = store.balance(&usd).await.unwrap();
        assert_eq!(balance.amount, Amount::from_minor(247_650));
        assert_eq!(store.transactions().await.len(), 5);
    }

    #[tokio::test]
    async fn test_cmd_send_rejects_blank_recipient() {
        let store = store(ValidationPolicy::Permissive);
        let usd = CurrencyCode::new("USD").unwrap();

        assert!(cmd_send(&store, "  ", Amount::from_major(10), &usd, "")
            .await
            .is_err());
        assert_eq!(store.transactions().await.len(), 4);
    }

    #[tokio::test]
    async fn test_cmd_send_strict_overdraft_fails() {
        let store = store(ValidationPolicy::Strict);
        let gbp = CurrencyCode::new("GBP").unwrap();

        let result = cmd_send(&store, "Mike Chen", Amount::from_major(5_000), &gbp, "").await;
        assert!(result.is_err());
        assert_eq!(store.transactions().await.len(), 4);
    }

    #[tokio::test]
    async fn test_cmd_request() {
        let store = store(ValidationPolicy::Permissive);
        let usd = CurrencyCode::new("USD").unwrap();

        cmd_request(&store, Some(Amount::from_major(25)), &usd, "Dinner")
            .await
            .unwrap();
        cmd_request(&store, None, &usd, "").await.unwrap();
        assert!(cmd_request(&store, Some(Amount::ZERO), &usd, "")
            .await
            .is_err());
        assert_eq!(store.transactions().await.len(), 4);
    }

    #[tokio::test]
    async fn test_cmd_adjust_out_of_range_fails() {
        let store = store(ValidationPolicy::Permissive);
        let usd = CurrencyCode::new("USD").unwrap();

        assert!(cmd_adjust(&store, &usd, Amount::from_minor(i64::MAX))
            .await
            .is_err());
        assert_eq!(
            store.balance(&usd).await.unwrap().amount,
            Amount::from_minor(248_675)
        );
    }

    #[tokio::test]
    async fn test_cmd_adjust_unknown_currency_is_noop() {
        let store = store(ValidationPolicy::Permissive);
        let jpy = CurrencyCode::new("JPY").unwrap();

        cmd_adjust(&store, &jpy, Amount::from_major(100)).await.unwrap();
        assert!(store.balance(&jpy).await.is_none());
    }

    #[tokio::test]
    async fn test_cmd_read_marks_notification() {
        let store = store(ValidationPolicy::Permissive);
        assert_eq!(store.unread_count().await, 1);

        cmd_read(&store, "1").await.unwrap();
        assert_eq!(store.unread_count().await, 0);

        cmd_read(&store, "missing").await.unwrap();
    }

    #[tokio::test]
    async fn test_read_only_commands() {
        let store = store(ValidationPolicy::Permissive);
        cmd_summary(&store).await.unwrap();
        cmd_balances(&store).await.unwrap();
        cmd_notifications(&store).await.unwrap();
        cmd_contacts(&store, "em").await.unwrap();
        cmd_transactions(&store, &TransactionFilter::new(), SortBy::Amount, 2)
            .await
            .unwrap();
    }
}
