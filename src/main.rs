//! Wallet Dashboard CLI Application
//!
//! A command-line interface for the demo wallet store.

use clap::{Parser, Subcommand};
use std::time::Duration;
use wallet_dashboard::api::{create_router, ApiState};
use wallet_dashboard::cli;
use wallet_dashboard::core::{Amount, CurrencyCode, TransactionStatus, TransactionType};
use wallet_dashboard::query::{SortBy, TransactionFilter};
use wallet_dashboard::store::{StoreConfig, ValidationPolicy, WalletStore};

#[derive(Parser)]
#[command(name = "wallet")]
#[command(author = "Darshan")]
#[command(version = "0.1.0")]
#[command(about = "A multi-currency wallet dashboard store", long_about = None)]
struct Cli {
    /// Simulated processing time for sends, in milliseconds
    #[arg(long, default_value = "2000")]
    send_delay_ms: u64,

    /// Reject unknown currencies and overdrafts instead of ignoring them
    #[arg(long)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the dashboard overview
    Summary,

    /// List balances per currency
    Balances,

    /// Show transaction history
    Transactions {
        /// Maximum number of rows
        #[arg(short, long, default_value_t = cli::DEFAULT_HISTORY_LIMIT)]
        limit: usize,

        /// Match description or counterparty name
        #[arg(short, long)]
        search: Option<String>,

        /// Only this type (send, receive, deposit, withdrawal)
        #[arg(short = 't', long = "type")]
        kind: Option<TransactionType>,

        /// Only this status (pending, completed, failed, cancelled)
        #[arg(long)]
        status: Option<TransactionStatus>,

        /// Only this currency
        #[arg(short, long)]
        currency: Option<CurrencyCode>,

        /// Sort by date or amount
        #[arg(long, default_value = "date")]
        sort: SortBy,
    },

    /// Send money to a contact
    Send {
        /// Recipient's name
        #[arg(long)]
        to: String,

        /// Amount to send, e.g. 12.50
        #[arg(short, long)]
        amount: Amount,

        /// Currency code
        #[arg(short, long, default_value = "USD")]
        currency: CurrencyCode,

        /// Payment description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Create a payment request link
    Request {
        /// Amount to request; omit for an open amount
        #[arg(short, long)]
        amount: Option<Amount>,

        /// Currency code
        #[arg(short, long, default_value = "USD")]
        currency: CurrencyCode,

        /// What the payment is for
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Adjust a balance by a signed amount
    Adjust {
        /// Currency code
        #[arg(short, long)]
        currency: CurrencyCode,

        /// Signed change, e.g. -20.00
        #[arg(long, allow_hyphen_values = true)]
        delta: Amount,
    },

    /// Show notifications
    Notifications,

    /// Mark a notification as read
    Read {
        /// Notification ID
        #[arg(long)]
        id: String,
    },

    /// Search contacts by name
    Contacts {
        /// At least two characters
        #[arg(short, long)]
        query: String,
    },

    /// Start the REST API server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = StoreConfig {
        send_delay: Duration::from_millis(cli.send_delay_ms),
        policy: if cli.strict {
            ValidationPolicy::Strict
        } else {
            ValidationPolicy::Permissive
        },
        ..Default::default()
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let store = WalletStore::demo(config)?;

        match cli.command {
            Commands::Summary => cli::cmd_summary(&store).await?,
            Commands::Balances => cli::cmd_balances(&store).await?,
            Commands::Transactions {
                limit,
                search,
                kind,
                status,
                currency,
                sort,
            } => {
                let filter = TransactionFilter {
                    search,
                    kind,
                    status,
                    currency,
                };
                cli::cmd_transactions(&store, &filter, sort, limit).await?
            }
            Commands::Send {
                to,
                amount,
                currency,
                description,
            } => cli::cmd_send(&store, &to, amount, &currency, &description).await?,
            Commands::Request {
                amount,
                currency,
                description,
            } => cli::cmd_request(&store, amount, &currency, &description).await?,
            Commands::Adjust { currency, delta } => {
                cli::cmd_adjust(&store, &currency, delta).await?
            }
            Commands::Notifications => cli::cmd_notifications(&store).await?,
            Commands::Read { id } => cli::cmd_read(&store, &id).await?,
            Commands::Contacts { query } => cli::cmd_contacts(&store, &query).await?,
            Commands::Serve { port } => serve(store, port).await?,
        }

        Ok::<(), Box<dyn std::error::Error>>(())
    })?;

    Ok(())
}

async fn serve(store: WalletStore, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(ApiState::new(store));

    let addr = format!("0.0.0.0:{}", port);
    println!("🚀 Wallet API server starting on http://localhost:{}", port);
    println!();
    println!("📖 Available endpoints:");
    println!("   GET  /health                        - Health check");
    println!("   GET  /ws                            - WebSocket updates");
    println!("   GET  /api/wallet                    - Full wallet snapshot");
    println!("   GET  /api/user                      - User profile");
    println!("   GET  /api/balances                  - Balances");
    println!("   GET  /api/balances/total            - Indicative total");
    println!("   POST /api/balances/{{currency}}       - Adjust balance");
    println!("   GET  /api/transactions              - Transaction history");
    println!("   POST /api/transactions              - Record transaction");
    println!("   POST /api/send                      - Send money");
    println!("   POST /api/send/quote                - Fee quote");
    println!("   POST /api/receive                   - Payment request link");
    println!("   GET  /api/summary                   - Totals");
    println!("   GET  /api/notifications             - Notifications");
    println!("   POST /api/notifications/{{id}}/read   - Mark read");
    println!("   GET  /api/contacts?q=               - Contact search");
    println!();

    // Handle Ctrl+C
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        println!("\n📴 Shutting down API server...");
        std::process::exit(0);
    });

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
