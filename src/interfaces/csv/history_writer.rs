use crate::domain::transaction::TransactionRecord;
use crate::error::Result;
use std::io::Write;

const HEADER: [&str; 5] = ["seq", "direction", "counterparty", "amount", "timestamp"];

/// Writes the transaction history as CSV, newest entry first.
pub struct HistoryWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> HistoryWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new().has_headers(false).from_writer(sink);
        Self { writer }
    }

    /// Writes the header followed by one row per record. The header is
    /// written even for an empty history.
    pub fn write_history(&mut self, history: &[TransactionRecord]) -> Result<()> {
        self.writer.write_record(HEADER)?;
        for record in history {
            self.writer.serialize(record)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::WalletAccount;
    use crate::domain::money::{Amount, Balance};

    #[test]
    fn test_write_history() {
        let mut account = WalletAccount::new(Balance::ZERO);
        account.credit(Amount::new(100_000).unwrap(), "Top Up").unwrap();
        account.debit(Amount::new(15_000).unwrap(), "Bakso, Pak Kumis").unwrap();

        let mut buffer = Vec::new();
        HistoryWriter::new(&mut buffer)
            .write_history(&account.snapshot().history)
            .unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "seq,direction,counterparty,amount,timestamp");
        assert!(lines[1].starts_with("2,debit,\"Bakso, Pak Kumis\",15000,"));
        assert!(lines[2].starts_with("1,credit,Top Up,100000,"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_write_empty_history() {
        let mut buffer = Vec::new();
        HistoryWriter::new(&mut buffer).write_history(&[]).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "seq,direction,counterparty,amount,timestamp\n"
        );
    }
}
