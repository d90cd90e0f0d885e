//! Pre-programmed collaborators.
//!
//! Stand-ins for the camera and the confirmation dialogs, driven by a queue of
//! answers. The CLI session replay and the tests use them instead of hardware.

use crate::domain::intent::PaymentIntent;
use crate::domain::money::Amount;
use crate::domain::ports::{CaptureDevice, ConfirmationGate, Decision, DenominationPicker, Permission};
use crate::error::{Result, WalletError};
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// A capture device that replays queued scan results.
///
/// Once the queue is empty every scan reports nothing detected.
#[derive(Debug)]
pub struct ScriptedCapture {
    supported: bool,
    permission: Permission,
    fault: Option<String>,
    scans: Mutex<VecDeque<Option<String>>>,
}

impl ScriptedCapture {
    pub fn new<I, S>(scans: I) -> Self
    where
        I: IntoIterator<Item = Option<S>>,
        S: Into<String>,
    {
        Self {
            supported: true,
            permission: Permission::Granted,
            fault: None,
            scans: Mutex::new(scans.into_iter().map(|s| s.map(Into::into)).collect()),
        }
    }

    /// A device that reports it cannot scan at all.
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new(Vec::<Option<String>>::new())
        }
    }

    /// A device whose camera permission request is refused.
    pub fn denied() -> Self {
        Self {
            permission: Permission::Denied,
            ..Self::new(Vec::<Option<String>>::new())
        }
    }

    /// A device that errors out while scanning.
    pub fn faulty(message: impl Into<String>) -> Self {
        Self {
            fault: Some(message.into()),
            ..Self::new(Vec::<Option<String>>::new())
        }
    }
}

#[async_trait]
impl CaptureDevice for ScriptedCapture {
    async fn is_supported(&self) -> Result<bool> {
        Ok(self.supported)
    }

    async fn request_permission(&self) -> Result<Permission> {
        Ok(self.permission)
    }

    async fn scan_once(&self) -> Result<Option<String>> {
        if let Some(fault) = &self.fault {
            return Err(WalletError::CaptureFailed(fault.clone()));
        }
        Ok(self.scans.lock().await.pop_front().flatten())
    }
}

/// Answers confirmation prompts from a queue; cancels once it runs dry.
#[derive(Debug, Default)]
pub struct ScriptedGate {
    decisions: Mutex<VecDeque<Decision>>,
    seen: Mutex<Vec<PaymentIntent>>,
}

impl ScriptedGate {
    pub fn new(decisions: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            decisions: Mutex::new(decisions.into_iter().collect()),
            seen: Mutex::default(),
        }
    }

    /// Intents that were presented for confirmation, oldest first.
    pub async fn presented(&self) -> Vec<PaymentIntent> {
        self.seen.lock().await.clone()
    }
}

#[async_trait]
impl ConfirmationGate for ScriptedGate {
    async fn decide(&self, intent: &PaymentIntent) -> Decision {
        self.seen.lock().await.push(intent.clone());
        self.decisions
            .lock()
            .await
            .pop_front()
            .unwrap_or(Decision::Cancel)
    }
}

/// Picks top-up amounts from a queue of raw values; `None` backs out.
#[derive(Debug, Default)]
pub struct ScriptedPicker {
    picks: Mutex<VecDeque<Option<u64>>>,
}

impl ScriptedPicker {
    pub fn new(picks: impl IntoIterator<Item = Option<u64>>) -> Self {
        Self {
            picks: Mutex::new(picks.into_iter().collect()),
        }
    }
}

#[async_trait]
impl DenominationPicker for ScriptedPicker {
    async fn pick(&self, denominations: &[Amount]) -> Option<Amount> {
        let wanted = self.picks.lock().await.pop_front().flatten()?;
        denominations.iter().copied().find(|d| d.value() == wanted)
    }
}
