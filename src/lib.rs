//! Balance and payment core of a QR wallet.
//!
//! A single account's balance and history live behind a [`domain::ports::Ledger`];
//! QR payments and top-ups are driven by the state machines in [`application`].

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod interfaces;
