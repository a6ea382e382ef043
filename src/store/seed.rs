//! Seed data for a new wallet store
//!
//! The store starts from a [`SeedData`] value. [`SeedData::demo`] is the
//! fixed mock data set the dashboard ships with.

use crate::core::{
    Amount, CurrencyCode, NewTransaction, NotificationItem, NotificationType, Party, Transaction,
    TransactionStatus, User, WalletBalance,
};
use chrono::{DateTime, TimeZone, Utc};

/// Contacts offered by recipient search
pub const DEMO_CONTACTS: [&str; 8] = [
    "Sarah Wilson",
    "Mike Chen",
    "Emma Davis",
    "James Brown",
    "Lisa Anderson",
    "David Wilson",
    "Maria Garcia",
    "Robert Johnson",
];

/// Initial contents of a wallet store
#[derive(Debug, Clone)]
pub struct SeedData {
    pub user: User,
    pub balances: Vec<WalletBalance>,
    pub transactions: Vec<Transaction>,
    pub notifications: Vec<NotificationItem>,
    pub contacts: Vec<String>,
}

impl SeedData {
    /// A user with no balances, transactions or notifications
    pub fn empty(user: User) -> Self {
        Self {
            user,
            balances: Vec::new(),
            transactions: Vec::new(),
            notifications: Vec::new(),
            contacts: Vec::new(),
        }
    }

    pub fn with_balance(mut self, currency: CurrencyCode, amount: Amount) -> Self {
        self.balances
            .push(WalletBalance::new(currency, amount).with_locked(Amount::ZERO));
        self
    }

    /// The mock wallet shown by the dashboard
    pub fn demo() -> Self {
        let user = User::new(
            "1",
            "Alex Johnson",
            "alex.johnson@example.com",
            at(2023, 1, 15, 0, 0),
        )
        .with_avatar(&avatar_url(220453))
        .with_phone("+1 (555) 123-4567")
        .verified();

        let mut seed = Self::empty(user);
        for (code, minor) in [("USD", 248_675), ("EUR", 125_030), ("GBP", 87_520)] {
            if let Ok(currency) = CurrencyCode::new(code) {
                seed = seed.with_balance(currency, Amount::from_minor(minor));
            }
        }

        if let Ok(usd) = CurrencyCode::new("USD") {
            seed.transactions = demo_transactions(&usd);
        }
        seed.notifications = demo_notifications();
        seed.contacts = DEMO_CONTACTS.iter().map(|c| c.to_string()).collect();
        seed
    }
}

fn demo_transactions(usd: &CurrencyCode) -> Vec<Transaction> {
    vec![
        NewTransaction::receive(
            Amount::from_minor(125_000),
            usd.clone(),
            Party::new("Sarah Wilson", "sarah.wilson@example.com")
                .with_avatar(&avatar_url(415829)),
            "Freelance project payment",
        )
        .with_reference("TXN-001")
        .into_transaction("1".to_string(), at(2024, 1, 20, 10, 30)),
        NewTransaction::send(
            Amount::from_minor(8_950),
            usd.clone(),
            Party::new("Mike Chen", "mike.chen@example.com").with_avatar(&avatar_url(697509)),
            "Dinner split",
        )
        .with_fee(Amount::from_minor(250))
        .with_reference("TXN-002")
        .into_transaction("2".to_string(), at(2024, 1, 19, 18, 15)),
        NewTransaction::deposit(Amount::from_minor(50_000), usd.clone(), "Bank transfer")
            .with_status(TransactionStatus::Pending)
            .with_reference("TXN-003")
            .into_transaction("3".to_string(), at(2024, 1, 18, 14, 20)),
        NewTransaction::send(
            Amount::from_minor(2_500),
            usd.clone(),
            Party::new("Emma Davis", "emma.davis@example.com"),
            "Coffee money",
        )
        .with_fee(Amount::from_minor(100))
        .with_reference("TXN-004")
        .into_transaction("4".to_string(), at(2024, 1, 17, 9, 45)),
    ]
}

fn demo_notifications() -> Vec<NotificationItem> {
    vec![
        NotificationItem::new(
            "1".to_string(),
            NotificationType::Transaction,
            "Payment Received",
            "You received $1,250.00 from Sarah Wilson",
            at(2024, 1, 20, 10, 30),
        ),
        NotificationItem::new(
            "2".to_string(),
            NotificationType::Security,
            "Security Alert",
            "New device login detected",
            at(2024, 1, 19, 15, 20),
        )
        .mark_read()
        .with_action("Review", "/security"),
    ]
}

fn avatar_url(photo: u32) -> String {
    format!(
        "https://images.pexels.com/photos/{0}/pexels-photo-{0}.jpeg?auto=compress&cs=tinysrgb&w=100&h=100&dpr=1",
        photo
    )
}

fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
        .single()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_seed_shape() {
        let seed = SeedData::demo();
        assert_eq!(seed.user.name, "Alex Johnson");
        assert!(seed.user.verified);
        assert_eq!(seed.balances.len(), 3);
        assert_eq!(seed.transactions.len(), 4);
        assert_eq!(seed.notifications.len(), 2);
        assert_eq!(seed.contacts.len(), DEMO_CONTACTS.len());
    }

    #[test]
    fn test_demo_transactions_valid_and_newest_first() {
        let seed = SeedData::demo();
        for tx in &seed.transactions {
            assert!(tx.validate().is_ok(), "invalid seed tx {}", tx.id);
        }
        assert!(seed
            .transactions
            .windows(2)
            .all(|w| w[0].timestamp >= w[1].timestamp));
    }
}
