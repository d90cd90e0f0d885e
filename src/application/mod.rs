//! Application layer containing the wallet flows.
//!
//! `PaymentFlow` and `TopUpFlow` are state machines over a shared `Ledger`
//! handle; they never touch the balance directly. `WalletSession` bundles both
//! for replaying recorded user actions.

pub mod payment;
pub mod session;
pub mod topup;
