use crate::domain::account::{LedgerSnapshot, WalletAccount};
use crate::domain::money::{Amount, Balance};
use crate::domain::ports::Ledger;
use crate::domain::transaction::TransactionRecord;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory ledger.
///
/// Uses `Arc<RwLock<WalletAccount>>`: debits and credits hold the write guard
/// for the whole check-and-mutate, snapshots take the read guard. Clones share
/// the same account.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    account: Arc<RwLock<WalletAccount>>,
}

impl InMemoryLedger {
    /// Creates an empty ledger with a zero balance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger with the given opening balance and no history.
    pub fn with_balance(opening_balance: Balance) -> Self {
        Self {
            account: Arc::new(RwLock::new(WalletAccount::new(opening_balance))),
        }
    }
}

#[async_trait]
impl Ledger for InMemoryLedger {
    async fn debit(&self, amount: Amount, counterparty: &str) -> Result<TransactionRecord> {
        let mut account = self.account.write().await;
        let record = account
            .debit(amount, counterparty)
            .inspect_err(|e| tracing::warn!(%amount, error = %e, "debit rejected"))?;
        tracing::info!(
            seq = record.seq(),
            %amount,
            counterparty = record.counterparty(),
            balance = %account.balance(),
            "debit applied"
        );
        Ok(record)
    }

    async fn credit(&self, amount: Amount, counterparty: &str) -> Result<TransactionRecord> {
        let mut account = self.account.write().await;
        let record = account
            .credit(amount, counterparty)
            .inspect_err(|e| tracing::warn!(%amount, error = %e, "credit rejected"))?;
        tracing::info!(
            seq = record.seq(),
            %amount,
            counterparty = record.counterparty(),
            balance = %account.balance(),
            "credit applied"
        );
        Ok(record)
    }

    async fn snapshot(&self) -> LedgerSnapshot {
        self.account.read().await.snapshot()
    }

    async fn balance(&self) -> Balance {
        self.account.read().await.balance()
    }
}
