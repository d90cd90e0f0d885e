//! Wallet configuration.
//!
//! Loaded from a JSON file, every field optional. Values are validated on load
//! so the flows can rely on a positive fallback price and a non-empty set of
//! top-up denominations.

use crate::domain::money::{Amount, Balance};
use crate::domain::payload::{DEFAULT_FALLBACK_AMOUNT, PayloadCodec, sanitize};
use crate::error::{Result, WalletError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WalletConfig {
    /// Balance the wallet starts with.
    pub opening_balance: u64,
    /// Price assumed for QR codes without a structured payload.
    pub fallback_amount: u64,
    /// Amounts offered by the top-up dialog, in display order.
    pub topup_denominations: Vec<u64>,
    /// Counterparty recorded for top-up credits.
    pub topup_label: String,
}

impl Default for WalletConfig {
    fn default() -> Self {
        Self {
            opening_balance: 1_250_000,
            fallback_amount: DEFAULT_FALLBACK_AMOUNT,
            topup_denominations: vec![50_000, 100_000, 200_000, 500_000, 1_000_000],
            topup_label: "Top Up".to_string(),
        }
    }
}

impl WalletConfig {
    /// Load configuration from a JSON file.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(WalletError::Config(format!(
                "config file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config = Self::load_str(&content)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Load configuration from a JSON string.
    pub fn load_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fallback_amount == 0 {
            return Err(WalletError::Config(
                "fallback_amount must be positive".to_string(),
            ));
        }
        if self.topup_denominations.is_empty() {
            return Err(WalletError::Config(
                "topup_denominations must not be empty".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for &value in &self.topup_denominations {
            if value == 0 {
                return Err(WalletError::Config(
                    "topup_denominations must be positive".to_string(),
                ));
            }
            if !seen.insert(value) {
                return Err(WalletError::Config(format!(
                    "duplicate top-up denomination {value}"
                )));
            }
        }
        if sanitize(&self.topup_label).is_empty() {
            return Err(WalletError::Config(
                "topup_label must not be blank".to_string(),
            ));
        }
        Ok(())
    }

    pub fn opening_balance(&self) -> Balance {
        Balance::new(self.opening_balance)
    }

    pub fn codec(&self) -> Result<PayloadCodec> {
        Ok(PayloadCodec::new(Amount::new(self.fallback_amount)?))
    }

    pub fn denominations(&self) -> Result<Vec<Amount>> {
        self.topup_denominations
            .iter()
            .map(|&value| Amount::new(value))
            .collect()
    }
}
