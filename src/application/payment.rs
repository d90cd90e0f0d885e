use crate::domain::intent::{PaymentIntent, PaymentPhase};
use crate::domain::money::format_rupiah;
use crate::domain::payload::PayloadCodec;
use crate::domain::ports::{
    CaptureDevice, ConfirmationGate, Decision, LedgerHandle, Notification, NotifierHandle,
    Permission,
};
use crate::domain::transaction::TransactionRecord;
use crate::error::{Result, WalletError};

#[derive(Debug)]
enum FlowState {
    Idle,
    Rejected,
    Active(PaymentIntent),
}

/// Drives one QR payment from scan to settlement.
///
/// The ledger is touched only by [`PaymentFlow::settle`], so abandoning the
/// flow (or dropping one of its futures) before that point commits nothing.
/// A new scan always replaces whatever intent is pending.
pub struct PaymentFlow {
    ledger: LedgerHandle,
    notifier: NotifierHandle,
    codec: PayloadCodec,
    state: FlowState,
    last_record: Option<TransactionRecord>,
}

impl PaymentFlow {
    pub fn new(ledger: LedgerHandle, notifier: NotifierHandle, codec: PayloadCodec) -> Self {
        Self {
            ledger,
            notifier,
            codec,
            state: FlowState::Idle,
            last_record: None,
        }
    }

    pub fn phase(&self) -> PaymentPhase {
        match &self.state {
            FlowState::Idle => PaymentPhase::Idle,
            FlowState::Rejected => PaymentPhase::Rejected,
            FlowState::Active(intent) => intent.phase(),
        }
    }

    pub fn intent(&self) -> Option<&PaymentIntent> {
        match &self.state {
            FlowState::Active(intent) => Some(intent),
            _ => None,
        }
    }

    /// The record of the most recent settlement. Survives later scans.
    pub fn last_record(&self) -> Option<&TransactionRecord> {
        self.last_record.as_ref()
    }

    /// Handles raw text read from a QR code.
    pub fn on_raw_scan(&mut self, text: &str) -> PaymentPhase {
        if let FlowState::Active(previous) = &self.state
            && !previous.phase().is_terminal()
        {
            tracing::info!(
                counterparty = %previous.payload().counterparty,
                phase = %previous.phase(),
                "new scan replaces pending payment"
            );
        }

        let decoded = self.codec.decode(text);
        if !decoded.payload.is_actionable() {
            tracing::warn!("scanned payload has no counterparty");
            self.state = FlowState::Rejected;
            self.notifier
                .notify(Notification::Warning("QR not detected".to_string()));
            return PaymentPhase::Rejected;
        }

        tracing::info!(
            counterparty = %decoded.payload.counterparty,
            amount = %decoded.payload.amount,
            source = ?decoded.source,
            "payment scanned"
        );
        self.state = FlowState::Active(PaymentIntent::scanned(decoded.payload, decoded.source));
        PaymentPhase::Scanned
    }

    /// The user accepted the payment prompt. No funds move yet.
    pub fn confirm(&mut self) -> Result<PaymentPhase> {
        let intent = self.require(&[PaymentPhase::Scanned], "confirm")?;
        intent.advance(PaymentPhase::Confirmed);
        Ok(PaymentPhase::Confirmed)
    }

    /// The user backed out before settlement.
    pub fn cancel(&mut self) -> Result<PaymentPhase> {
        let intent = self.require(&[PaymentPhase::Scanned, PaymentPhase::Confirmed], "cancel")?;
        intent.advance(PaymentPhase::Cancelled);
        tracing::info!(counterparty = %intent.payload().counterparty, "payment cancelled");
        self.notifier
            .notify(Notification::Info("Payment cancelled".to_string()));
        Ok(PaymentPhase::Cancelled)
    }

    /// Debits the ledger for a confirmed intent.
    ///
    /// Insufficient balance is not an error here: the flow ends in
    /// [`PaymentPhase::Failed`] and the user is told to top up.
    pub async fn settle(&mut self) -> Result<PaymentPhase> {
        let payload = self
            .require(&[PaymentPhase::Confirmed], "settle")?
            .payload()
            .clone();

        match self.ledger.debit(payload.amount, &payload.counterparty).await {
            Ok(record) => {
                self.notifier.notify(Notification::Success(format!(
                    "Payment of {} to {} succeeded",
                    format_rupiah(payload.amount.value()),
                    payload.counterparty
                )));
                self.last_record = Some(record.clone());
                if let FlowState::Active(intent) = &mut self.state {
                    intent.settle(record);
                }
                Ok(PaymentPhase::Settled)
            }
            Err(WalletError::InsufficientBalance { .. }) => {
                self.notifier.notify(Notification::Error {
                    header: "Insufficient balance".to_string(),
                    text: "Please top up first.".to_string(),
                });
                if let FlowState::Active(intent) = &mut self.state {
                    intent.advance(PaymentPhase::Failed);
                }
                Ok(PaymentPhase::Failed)
            }
            Err(e) => Err(e),
        }
    }

    /// Runs the capture device once and feeds the result into the flow.
    ///
    /// Environment problems abort to [`PaymentPhase::Idle`] with a
    /// notification; unsupported devices and denied permissions are also
    /// returned as errors.
    pub async fn scan(&mut self, capture: &dyn CaptureDevice) -> Result<PaymentPhase> {
        match Self::capture(capture).await {
            Ok(Some(text)) => Ok(self.on_raw_scan(&text)),
            Ok(None) => {
                self.state = FlowState::Idle;
                self.notifier
                    .notify(Notification::Warning("QR not detected".to_string()));
                Ok(PaymentPhase::Idle)
            }
            Err(e) => {
                tracing::warn!(error = %e, "scan aborted");
                self.state = FlowState::Idle;
                self.notifier.notify(capture_notification(&e));
                Err(e)
            }
        }
    }

    /// Presents the scanned intent to the user and acts on the answer.
    pub async fn decide(&mut self, gate: &dyn ConfirmationGate) -> Result<PaymentPhase> {
        let decision = {
            let intent = self.require(&[PaymentPhase::Scanned], "decide")?;
            gate.decide(intent).await
        };
        match decision {
            Decision::Confirm => {
                self.confirm()?;
                self.settle().await
            }
            Decision::Cancel => self.cancel(),
        }
    }

    /// Scan, ask, settle: the whole "scan QR" action.
    pub async fn run(
        &mut self,
        capture: &dyn CaptureDevice,
        gate: &dyn ConfirmationGate,
    ) -> Result<PaymentPhase> {
        match self.scan(capture).await? {
            PaymentPhase::Scanned => self.decide(gate).await,
            phase => Ok(phase),
        }
    }

    async fn capture(capture: &dyn CaptureDevice) -> Result<Option<String>> {
        if !capture.is_supported().await? {
            return Err(WalletError::CaptureUnavailable);
        }
        if capture.request_permission().await? == Permission::Denied {
            return Err(WalletError::PermissionDenied);
        }
        Ok(capture.scan_once().await?.filter(|text| !text.is_empty()))
    }

    fn require(
        &mut self,
        allowed: &[PaymentPhase],
        action: &'static str,
    ) -> Result<&mut PaymentIntent> {
        let phase = self.phase();
        match &mut self.state {
            FlowState::Active(intent) if allowed.contains(&phase) => Ok(intent),
            _ => Err(WalletError::InvalidTransition {
                phase: phase.as_str(),
                action,
            }),
        }
    }
}

fn capture_notification(error: &WalletError) -> Notification {
    match error {
        WalletError::CaptureUnavailable => Notification::Error {
            header: "Error".to_string(),
            text: "Device does not support the scanner.".to_string(),
        },
        WalletError::PermissionDenied => Notification::Error {
            header: "Camera permission".to_string(),
            text: "Enable camera access in the app settings.".to_string(),
        },
        other => Notification::Error {
            header: "Scan failed".to_string(),
            text: other.to_string(),
        },
    }
}
