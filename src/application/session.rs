use crate::application::payment::PaymentFlow;
use crate::application::topup::{TopUpFlow, TopUpPhase};
use crate::config::WalletConfig;
use crate::domain::account::LedgerSnapshot;
use crate::domain::ports::{LedgerHandle, NotifierHandle};
use crate::error::Result;

/// A user action in a recorded wallet session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Raw text read from a QR code.
    Scan(String),
    /// Accept the pending payment and settle it.
    Confirm,
    /// Back out of the pending payment.
    Cancel,
    /// Top up by the given denomination.
    TopUp(u64),
}

/// Both flows over one shared ledger, fed one event at a time.
pub struct WalletSession {
    ledger: LedgerHandle,
    payments: PaymentFlow,
    topups: TopUpFlow,
}

impl WalletSession {
    pub fn new(config: &WalletConfig, ledger: LedgerHandle, notifier: NotifierHandle) -> Result<Self> {
        let payments = PaymentFlow::new(ledger.clone(), notifier.clone(), config.codec()?);
        let topups = TopUpFlow::from_config(ledger.clone(), notifier, config)?;
        Ok(Self {
            ledger,
            payments,
            topups,
        })
    }

    pub fn payments(&self) -> &PaymentFlow {
        &self.payments
    }

    pub fn topups(&self) -> &TopUpFlow {
        &self.topups
    }

    pub async fn apply(&mut self, event: SessionEvent) -> Result<()> {
        tracing::debug!(?event, "applying session event");
        match event {
            SessionEvent::Scan(text) => {
                self.payments.on_raw_scan(&text);
            }
            SessionEvent::Confirm => {
                self.payments.confirm()?;
                self.payments.settle().await?;
            }
            SessionEvent::Cancel => {
                self.payments.cancel()?;
            }
            SessionEvent::TopUp(amount) => {
                match self.topups.phase() {
                    TopUpPhase::Selecting => {}
                    TopUpPhase::Confirmed => {
                        self.topups.cancel()?;
                    }
                    TopUpPhase::Credited => {
                        self.topups.reset()?;
                    }
                }
                self.topups.choose(amount)?;
                self.topups.execute().await?;
            }
        }
        Ok(())
    }

    pub async fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::intent::PaymentPhase;
    use crate::domain::money::Balance;
    use crate::domain::transaction::Direction;
    use crate::error::WalletError;
    use crate::infrastructure::in_memory::InMemoryLedger;
    use crate::infrastructure::notifier::RecordingNotifier;
    use std::sync::Arc;

    fn session(balance: u64) -> WalletSession {
        let config = WalletConfig {
            opening_balance: balance,
            ..WalletConfig::default()
        };
        let ledger = Arc::new(InMemoryLedger::with_balance(config.opening_balance()));
        WalletSession::new(&config, ledger, Arc::new(RecordingNotifier::new())).unwrap()
    }

    #[tokio::test]
    async fn test_session_topup_then_pay() {
        let mut session = session(0);

        session.apply(SessionEvent::TopUp(100_000)).await.unwrap();
        session.apply(SessionEvent::TopUp(50_000)).await.unwrap();
        session
            .apply(SessionEvent::Scan(r#"{"merchant":"Soto","harga":25000}"#.to_string()))
            .await
            .unwrap();
        session.apply(SessionEvent::Confirm).await.unwrap();

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.balance, Balance::new(125_000));
        let directions: Vec<Direction> = snapshot.history.iter().map(|r| r.direction()).collect();
        assert_eq!(
            directions,
            vec![Direction::Debit, Direction::Credit, Direction::Credit]
        );
    }

    #[tokio::test]
    async fn test_session_confirm_without_scan_fails() {
        let mut session = session(0);
        let result = session.apply(SessionEvent::Confirm).await;
        assert!(matches!(result, Err(WalletError::InvalidTransition { .. })));
    }

    #[tokio::test]
    async fn test_session_insufficient_balance_is_not_an_error() {
        let mut session = session(10_000);
        session
            .apply(SessionEvent::Scan("hello world".to_string()))
            .await
            .unwrap();
        session.apply(SessionEvent::Confirm).await.unwrap();

        assert_eq!(session.payments().phase(), PaymentPhase::Failed);
        assert_eq!(session.snapshot().await.balance, Balance::new(10_000));
    }
}
