use crate::domain::money::{Amount, Balance};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum WalletError {
    #[error("amount must be positive, got {0}")]
    #[diagnostic(code(wallet::invalid_amount))]
    InvalidAmount(i64),

    #[error("insufficient balance: {balance} available, {requested} requested")]
    #[diagnostic(code(wallet::insufficient_balance), help("top up the wallet first"))]
    InsufficientBalance { balance: Balance, requested: Amount },

    #[error("{0} is not an offered top-up denomination")]
    #[diagnostic(code(wallet::invalid_denomination))]
    InvalidDenomination(u64),

    #[error("cannot {action} while the flow is {phase}")]
    #[diagnostic(code(wallet::invalid_transition))]
    InvalidTransition {
        phase: &'static str,
        action: &'static str,
    },

    #[error("balance would exceed the representable maximum")]
    #[diagnostic(code(wallet::balance_overflow))]
    BalanceOverflow,

    #[error("device does not support QR scanning")]
    #[diagnostic(code(wallet::capture_unavailable))]
    CaptureUnavailable,

    #[error("camera permission denied")]
    #[diagnostic(code(wallet::permission_denied))]
    PermissionDenied,

    #[error("scan failed: {0}")]
    #[diagnostic(code(wallet::capture_failed))]
    CaptureFailed(String),

    #[error("invalid payment payload: {0}")]
    #[diagnostic(code(wallet::invalid_payload))]
    InvalidPayload(String),

    #[error("configuration error: {0}")]
    #[diagnostic(code(wallet::config))]
    Config(String),

    #[error("invalid session script row: {0}")]
    #[diagnostic(code(wallet::script))]
    Script(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WalletError>;
