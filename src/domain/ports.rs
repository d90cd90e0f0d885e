use super::account::LedgerSnapshot;
use super::intent::PaymentIntent;
use super::money::{Amount, Balance};
use super::transaction::TransactionRecord;
use crate::error::Result;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Exclusive owner of the balance and history.
///
/// Implementations must run each check-and-mutate as one atomic step with
/// respect to every other call on the same ledger.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn debit(&self, amount: Amount, counterparty: &str) -> Result<TransactionRecord>;
    async fn credit(&self, amount: Amount, counterparty: &str) -> Result<TransactionRecord>;
    async fn snapshot(&self) -> LedgerSnapshot;
    async fn balance(&self) -> Balance;
}

pub type LedgerHandle = Arc<dyn Ledger>;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Permission {
    Granted,
    Denied,
}

/// Camera / barcode hardware. Called in order: support, permission, scan.
#[async_trait]
pub trait CaptureDevice: Send + Sync {
    async fn is_supported(&self) -> Result<bool>;
    async fn request_permission(&self) -> Result<Permission>;
    /// `None` when nothing was detected.
    async fn scan_once(&self) -> Result<Option<String>>;
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Decision {
    Confirm,
    Cancel,
}

/// The "pay / cancel" prompt shown for a scanned payment. May wait indefinitely.
#[async_trait]
pub trait ConfirmationGate: Send + Sync {
    async fn decide(&self, intent: &PaymentIntent) -> Decision;
}

/// The top-up amount picker. `None` means the user backed out.
#[async_trait]
pub trait DenominationPicker: Send + Sync {
    async fn pick(&self, denominations: &[Amount]) -> Option<Amount>;
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Notification {
    Info(String),
    Success(String),
    Warning(String),
    Error { header: String, text: String },
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notification::Info(text) => write!(f, "[info] {text}"),
            Notification::Success(text) => write!(f, "[success] {text}"),
            Notification::Warning(text) => write!(f, "[warning] {text}"),
            Notification::Error { header, text } => write!(f, "[error] {header}: {text}"),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

pub type NotifierHandle = Arc<dyn Notifier>;
