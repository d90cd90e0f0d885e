#![allow(dead_code)]

use kilat_wallet::application::payment::PaymentFlow;
use kilat_wallet::application::topup::TopUpFlow;
use kilat_wallet::config::WalletConfig;
use kilat_wallet::domain::money::{Amount, Balance};
use kilat_wallet::domain::payload::PayloadCodec;
use kilat_wallet::infrastructure::in_memory::InMemoryLedger;
use kilat_wallet::infrastructure::notifier::RecordingNotifier;
use std::io::{Error, Write};
use std::sync::Arc;
use tempfile::NamedTempFile;

pub fn amount(value: u64) -> Amount {
    Amount::new(value).expect("positive amount")
}

pub fn ledger(balance: u64) -> Arc<InMemoryLedger> {
    Arc::new(InMemoryLedger::with_balance(Balance::new(balance)))
}

pub fn payment_flow(ledger: &Arc<InMemoryLedger>) -> (PaymentFlow, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let flow = PaymentFlow::new(
        ledger.clone(),
        Arc::new(notifier.clone()),
        PayloadCodec::default(),
    );
    (flow, notifier)
}

pub fn topup_flow(ledger: &Arc<InMemoryLedger>) -> (TopUpFlow, RecordingNotifier) {
    let notifier = RecordingNotifier::new();
    let flow = TopUpFlow::from_config(
        ledger.clone(),
        Arc::new(notifier.clone()),
        &WalletConfig::default(),
    )
    .expect("default config is valid");
    (flow, notifier)
}

/// Writes a session script with an `action,value` header.
pub fn session_script(rows: &[(&str, &str)]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    {
        let mut wtr = csv::Writer::from_writer(&mut file);
        wtr.write_record(["action", "value"])?;
        for (action, value) in rows {
            wtr.write_record([*action, *value])?;
        }
        wtr.flush()?;
    }
    file.flush()?;
    Ok(file)
}
