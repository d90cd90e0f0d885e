use crate::config::WalletConfig;
use crate::domain::money::{Amount, format_rupiah};
use crate::domain::payload::sanitize;
use crate::domain::ports::{DenominationPicker, LedgerHandle, Notification, NotifierHandle};
use crate::domain::transaction::TransactionRecord;
use crate::error::{Result, WalletError};
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TopUpPhase {
    Selecting,
    Confirmed,
    Credited,
}

impl TopUpPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopUpPhase::Selecting => "selecting",
            TopUpPhase::Confirmed => "confirmed",
            TopUpPhase::Credited => "credited",
        }
    }
}

impl fmt::Display for TopUpPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
enum TopUpState {
    Selecting,
    Confirmed(Amount),
    Credited(TransactionRecord),
}

/// Tops the wallet up by one of a fixed set of denominations.
pub struct TopUpFlow {
    ledger: LedgerHandle,
    notifier: NotifierHandle,
    denominations: Vec<Amount>,
    label: String,
    state: TopUpState,
}

impl TopUpFlow {
    pub fn new(
        ledger: LedgerHandle,
        notifier: NotifierHandle,
        denominations: Vec<Amount>,
        label: &str,
    ) -> Self {
        Self {
            ledger,
            notifier,
            denominations,
            label: sanitize(label),
            state: TopUpState::Selecting,
        }
    }

    pub fn from_config(
        ledger: LedgerHandle,
        notifier: NotifierHandle,
        config: &WalletConfig,
    ) -> Result<Self> {
        Ok(Self::new(
            ledger,
            notifier,
            config.denominations()?,
            &config.topup_label,
        ))
    }

    pub fn phase(&self) -> TopUpPhase {
        match self.state {
            TopUpState::Selecting => TopUpPhase::Selecting,
            TopUpState::Confirmed(_) => TopUpPhase::Confirmed,
            TopUpState::Credited(_) => TopUpPhase::Credited,
        }
    }

    pub fn denominations(&self) -> &[Amount] {
        &self.denominations
    }

    /// The amount chosen and not yet credited.
    pub fn selected(&self) -> Option<Amount> {
        match self.state {
            TopUpState::Confirmed(amount) => Some(amount),
            _ => None,
        }
    }

    /// The credit committed by the last completed top-up.
    pub fn credited(&self) -> Option<&TransactionRecord> {
        match &self.state {
            TopUpState::Credited(record) => Some(record),
            _ => None,
        }
    }

    /// Selects one of the offered denominations.
    pub fn choose(&mut self, amount: u64) -> Result<TopUpPhase> {
        self.require(TopUpPhase::Selecting, "choose")?;
        let amount = self
            .denominations
            .iter()
            .copied()
            .find(|d| d.value() == amount)
            .ok_or(WalletError::InvalidDenomination(amount))?;
        self.state = TopUpState::Confirmed(amount);
        Ok(TopUpPhase::Confirmed)
    }

    /// Credits the selected amount to the ledger.
    pub async fn execute(&mut self) -> Result<TransactionRecord> {
        let amount = self
            .selected()
            .ok_or(WalletError::InvalidTransition {
                phase: self.phase().as_str(),
                action: "execute",
            })?;

        let record = self
            .ledger
            .credit(amount, &self.label)
            .await
            .inspect_err(|e| {
                self.notifier.notify(Notification::Error {
                    header: "Top up failed".to_string(),
                    text: e.to_string(),
                })
            })?;
        self.notifier.notify(Notification::Success(format!(
            "Balance topped up {}",
            format_rupiah(amount.value())
        )));
        self.state = TopUpState::Credited(record.clone());
        Ok(record)
    }

    /// Drops the selection and returns to the amount list.
    pub fn cancel(&mut self) -> Result<TopUpPhase> {
        self.require(TopUpPhase::Confirmed, "cancel")?;
        self.state = TopUpState::Selecting;
        Ok(TopUpPhase::Selecting)
    }

    /// Starts over after a completed top-up.
    pub fn reset(&mut self) -> Result<TopUpPhase> {
        self.require(TopUpPhase::Credited, "reset")?;
        self.state = TopUpState::Selecting;
        Ok(TopUpPhase::Selecting)
    }

    /// Lets the picker choose an amount and credits it. `Ok(None)` when the
    /// user backed out.
    pub async fn run(&mut self, picker: &dyn DenominationPicker) -> Result<Option<TransactionRecord>> {
        self.require(TopUpPhase::Selecting, "run")?;
        match picker.pick(&self.denominations).await {
            Some(amount) => {
                self.choose(amount.value())?;
                self.execute().await.map(Some)
            }
            None => Ok(None),
        }
    }

    fn require(&self, phase: TopUpPhase, action: &'static str) -> Result<()> {
        let current = self.phase();
        if current == phase {
            Ok(())
        } else {
            Err(WalletError::InvalidTransition {
                phase: current.as_str(),
                action,
            })
        }
    }
}
