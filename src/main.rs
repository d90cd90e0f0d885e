use clap::{Parser, Subcommand};
use kilat_wallet::application::session::WalletSession;
use kilat_wallet::config::WalletConfig;
use kilat_wallet::domain::money::{Amount, format_rupiah};
use kilat_wallet::domain::payload::PayloadCodec;
use kilat_wallet::domain::ports::LedgerHandle;
use kilat_wallet::infrastructure::in_memory::InMemoryLedger;
use kilat_wallet::infrastructure::notifier::TracingNotifier;
use kilat_wallet::interfaces::csv::history_writer::HistoryWriter;
use kilat_wallet::interfaces::csv::session_reader::SessionReader;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Wallet configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Opening balance, overriding the configuration
    #[arg(long, global = true)]
    initial_balance: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the QR payload a merchant stall displays
    Qr {
        /// Merchant name shown to the payer
        #[arg(long)]
        merchant: String,

        /// Price in Rupiah
        #[arg(long)]
        price: u64,
    },
    /// Replay a recorded session (CSV) and print the resulting history
    Session {
        /// Session script with an `action, value` header
        script: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => WalletConfig::load_file(path)?,
        None => WalletConfig::default(),
    };
    if let Some(balance) = cli.initial_balance {
        config.opening_balance = balance;
    }

    match cli.command {
        Command::Qr { merchant, price } => {
            let payload = PayloadCodec::encode(&merchant, Amount::new(price)?)?;
            println!("{payload}");
        }
        Command::Session { script } => replay_session(&config, script).await?,
    }

    Ok(())
}

async fn replay_session(config: &WalletConfig, script: PathBuf) -> Result<()> {
    let ledger: LedgerHandle = Arc::new(InMemoryLedger::with_balance(config.opening_balance()));
    let mut session = WalletSession::new(config, ledger, Arc::new(TracingNotifier))?;

    let file = File::open(script).into_diagnostic()?;
    for event in SessionReader::new(file).events() {
        match event {
            Ok(event) => {
                if let Err(e) = session.apply(event).await {
                    eprintln!("Error processing event: {}", e);
                }
            }
            Err(e) => {
                eprintln!("Error reading event: {}", e);
            }
        }
    }

    let snapshot = session.snapshot().await;
    let stdout = io::stdout();
    HistoryWriter::new(stdout.lock()).write_history(&snapshot.history)?;
    eprintln!("Final balance: {}", format_rupiah(snapshot.balance.value()));

    Ok(())
}
