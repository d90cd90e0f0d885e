use crate::domain::money::{Amount, Balance};
use crate::domain::payload::sanitize;
use crate::domain::transaction::{Direction, TransactionRecord};
use crate::error::{Result, WalletError};
use std::collections::VecDeque;

/// Point-in-time view of the wallet: balance plus history, newest first.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerSnapshot {
    pub balance: Balance,
    pub history: Vec<TransactionRecord>,
}

/// Represents the state of the single wallet account.
///
/// Owns the spendable balance and the transaction history. Every mutation
/// changes the balance and records the matching history entry in one step,
/// so the two can never disagree.
#[derive(Debug, Clone, Default)]
pub struct WalletAccount {
    balance: Balance,
    history: VecDeque<TransactionRecord>,
    last_seq: u64,
}

impl WalletAccount {
    pub fn new(opening_balance: Balance) -> Self {
        Self {
            balance: opening_balance,
            ..Self::default()
        }
    }

    pub fn balance(&self) -> Balance {
        self.balance
    }

    /// History entries, newest first.
    pub fn history(&self) -> impl Iterator<Item = &TransactionRecord> {
        self.history.iter()
    }

    /// Withdraws `amount` if the balance covers it.
    ///
    /// On `InsufficientBalance` neither the balance nor the history change.
    pub fn debit(&mut self, amount: Amount, counterparty: &str) -> Result<TransactionRecord> {
        let balance = self
            .balance
            .checked_sub(amount)
            .ok_or(WalletError::InsufficientBalance {
                balance: self.balance,
                requested: amount,
            })?;
        self.balance = balance;
        Ok(self.record(Direction::Debit, amount, counterparty))
    }

    /// Adds `amount` to the balance.
    pub fn credit(&mut self, amount: Amount, counterparty: &str) -> Result<TransactionRecord> {
        self.balance = self
            .balance
            .checked_add(amount)
            .ok_or(WalletError::BalanceOverflow)?;
        Ok(self.record(Direction::Credit, amount, counterparty))
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            balance: self.balance,
            history: self.history.iter().cloned().collect(),
        }
    }

    fn record(&mut self, direction: Direction, amount: Amount, counterparty: &str) -> TransactionRecord {
        self.last_seq += 1;
        let record = TransactionRecord::new(self.last_seq, direction, sanitize(counterparty), amount);
        self.history.push_front(record.clone());
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(value: u64) -> Amount {
        Amount::new(value).unwrap()
    }

    #[test]
    fn test_account_debit_success() {
        let mut account = WalletAccount::new(Balance::new(1_250_000));

        let record = account.debit(amount(15_000), "Bakso Pak Kumis").unwrap();

        assert_eq!(account.balance(), Balance::new(1_235_000));
        assert_eq!(record.direction(), Direction::Debit);
        assert_eq!(record.amount(), amount(15_000));
        assert_eq!(record.counterparty(), "Bakso Pak Kumis");
        assert_eq!(record.seq(), 1);
        assert_eq!(account.history().next(), Some(&record));
    }

    #[test]
    fn test_account_debit_insufficient() {
        let mut account = WalletAccount::new(Balance::new(10_000));

        let result = account.debit(amount(15_000), "Bakso Pak Kumis");

        assert!(matches!(
            result,
            Err(WalletError::InsufficientBalance { balance, requested })
                if balance == Balance::new(10_000) && requested == amount(15_000)
        ));
        assert_eq!(account.balance(), Balance::new(10_000));
        assert_eq!(account.history().count(), 0);
    }

    #[test]
    fn test_account_debit_entire_balance() {
        let mut account = WalletAccount::new(Balance::new(15_000));
        account.debit(amount(15_000), "Warung").unwrap();
        assert_eq!(account.balance(), Balance::ZERO);
    }

    #[test]
    fn test_account_history_is_newest_first() {
        let mut account = WalletAccount::new(Balance::ZERO);
        account.credit(amount(100_000), "topup").unwrap();
        account.debit(amount(50_000), "Sate Madura").unwrap();

        let snapshot = account.snapshot();
        assert_eq!(snapshot.balance, Balance::new(50_000));
        let seqs: Vec<u64> = snapshot.history.iter().map(|r| r.seq()).collect();
        assert_eq!(seqs, vec![2, 1]);
        assert_eq!(snapshot.history[0].direction(), Direction::Debit);
        assert_eq!(snapshot.history[1].direction(), Direction::Credit);
    }

    #[test]
    fn test_account_credit_overflow_leaves_state() {
        let mut account = WalletAccount::new(Balance::new(u64::MAX));
        let result = account.credit(amount(1), "topup");
        assert!(matches!(result, Err(WalletError::BalanceOverflow)));
        assert_eq!(account.balance(), Balance::new(u64::MAX));
        assert_eq!(account.history().count(), 0);
    }

    #[test]
    fn test_account_sanitizes_counterparty() {
        let mut account = WalletAccount::new(Balance::new(100));
        let record = account.debit(amount(10), "<img src=x>Kopi").unwrap();
        assert_eq!(record.counterparty(), "img src=xKopi");
    }
}
