use crate::domain::money::Amount;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Credit,
    Debit,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Credit => f.write_str("credit"),
            Direction::Debit => f.write_str("debit"),
        }
    }
}

/// One entry of the wallet history.
///
/// Records are created by the ledger only and have no mutators; callers
/// receive clones.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct TransactionRecord {
    seq: u64,
    direction: Direction,
    counterparty: String,
    amount: Amount,
    timestamp: DateTime<Utc>,
}

impl TransactionRecord {
    pub(crate) fn new(seq: u64, direction: Direction, counterparty: String, amount: Amount) -> Self {
        Self {
            seq,
            direction,
            counterparty,
            amount,
            timestamp: Utc::now(),
        }
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn counterparty(&self) -> &str {
        &self.counterparty
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}
