use crate::application::session::SessionEvent;
use crate::error::{Result, WalletError};
use serde::Deserialize;
use std::io::Read;

/// Internal shape used only for CSV deserialization.
#[derive(Debug, Deserialize)]
struct SessionRow {
    action: String,
    #[serde(default)]
    value: Option<String>,
}

impl TryFrom<SessionRow> for SessionEvent {
    type Error = WalletError;

    fn try_from(row: SessionRow) -> Result<Self> {
        match (row.action.to_ascii_lowercase().as_str(), row.value) {
            ("scan", value) => Ok(SessionEvent::Scan(value.unwrap_or_default())),
            ("confirm", _) => Ok(SessionEvent::Confirm),
            ("cancel", _) => Ok(SessionEvent::Cancel),
            ("topup", Some(value)) => value
                .parse()
                .map(SessionEvent::TopUp)
                .map_err(|_| WalletError::Script(format!("invalid top-up amount: {value}"))),
            ("topup", None) => Err(WalletError::Script("top-up without amount".to_string())),
            (other, _) => Err(WalletError::Script(format!("unknown action: {other}"))),
        }
    }
}

/// Reads a recorded wallet session from a CSV source.
///
/// Expects an `action, value` header. Whitespace is trimmed and the value
/// column may be omitted for actions that take none.
pub struct SessionReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> SessionReader<R> {
    /// Creates a new `SessionReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and converts session events.
    pub fn events(self) -> impl Iterator<Item = Result<SessionEvent>> {
        self.reader
            .into_deserialize::<SessionRow>()
            .map(|row| SessionEvent::try_from(row?))
    }
}
