use crate::domain::payload::{PayloadSource, PaymentPayload};
use crate::domain::transaction::TransactionRecord;
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PaymentPhase {
    Idle,
    Scanned,
    Confirmed,
    Settled,
    Rejected,
    Cancelled,
    Failed,
}

impl PaymentPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentPhase::Idle => "idle",
            PaymentPhase::Scanned => "scanned",
            PaymentPhase::Confirmed => "confirmed",
            PaymentPhase::Settled => "settled",
            PaymentPhase::Rejected => "rejected",
            PaymentPhase::Cancelled => "cancelled",
            PaymentPhase::Failed => "failed",
        }
    }

    /// Terminal phases accept nothing but a new scan.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            PaymentPhase::Settled
                | PaymentPhase::Rejected
                | PaymentPhase::Cancelled
                | PaymentPhase::Failed
        )
    }
}

impl fmt::Display for PaymentPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One scan-to-settle attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentIntent {
    payload: PaymentPayload,
    source: PayloadSource,
    phase: PaymentPhase,
    record: Option<TransactionRecord>,
}

impl PaymentIntent {
    pub(crate) fn scanned(payload: PaymentPayload, source: PayloadSource) -> Self {
        Self {
            payload,
            source,
            phase: PaymentPhase::Scanned,
            record: None,
        }
    }

    pub fn payload(&self) -> &PaymentPayload {
        &self.payload
    }

    pub fn source(&self) -> PayloadSource {
        self.source
    }

    pub fn phase(&self) -> PaymentPhase {
        self.phase
    }

    /// The history entry committed by settlement, if any.
    pub fn record(&self) -> Option<&TransactionRecord> {
        self.record.as_ref()
    }

    pub(crate) fn advance(&mut self, phase: PaymentPhase) {
        self.phase = phase;
    }

    pub(crate) fn settle(&mut self, record: TransactionRecord) {
        self.phase = PaymentPhase::Settled;
        self.record = Some(record);
    }
}
