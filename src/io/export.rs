use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::application::ExportError;
use crate::domain::{Clock, Ledger, format_amount};

/// Column names of the CSV export, in order.
pub const CSV_HEADER: [&str; 5] = ["ID", "Amount", "Category", "Date", "Type"];

/// Exporter for writing the ledger out as CSV.
/// Reads the ledger, never modifies it.
pub struct Exporter<'a, C: Clock> {
    ledger: &'a Ledger<C>,
}

impl<'a, C: Clock> Exporter<'a, C> {
    pub fn new(ledger: &'a Ledger<C>) -> Self {
        Self { ledger }
    }

    /// Write the header and one row per transaction, in insertion order.
    /// Returns the number of data rows written.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<usize, csv::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(CSV_HEADER)?;

        let mut count = 0;
        for transaction in self.ledger.transactions() {
            csv_writer.write_record(&[
                transaction.id.to_string(),
                format_amount(transaction.amount),
                transaction.category.clone(),
                transaction.date_string(),
                transaction.kind.to_string(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Create (or truncate) `path` and write the CSV export into it.
    /// Everything is flushed to the file before this returns `Ok`.
    pub fn export_to_path(&self, path: impl AsRef<Path>) -> Result<usize, ExportError> {
        let path = path.as_ref();
        let file =
            File::create(path).map_err(|e| ExportError::destination_unavailable(path, e))?;

        let mut writer = BufWriter::new(file);
        let count = self
            .write_csv(&mut writer)
            .map_err(|e| ExportError::destination_unavailable(path, io::Error::from(e)))?;
        writer
            .into_inner()
            .map_err(|e| ExportError::destination_unavailable(path, e.into_error()))?;

        tracing::info!(path = %path.display(), rows = count, "ledger exported");
        Ok(count)
    }
}

/// Export `ledger` as CSV to `path`.
pub fn export_csv<C: Clock>(
    ledger: &Ledger<C>,
    path: impl AsRef<Path>,
) -> Result<usize, ExportError> {
    Exporter::new(ledger).export_to_path(path)
}

#[cfg(test)]
mod tests {
    use chrono::{Local, TimeZone};

    use super::*;
    use crate::domain::FixedClock;

    fn ledger_at(y: i32, m: u32, d: u32) -> Ledger<FixedClock> {
        let now = Local.with_ymd_and_hms(y, m, d, 18, 45, 10).unwrap();
        Ledger::with_clock(FixedClock(now))
    }

    fn render(ledger: &Ledger<FixedClock>) -> String {
        let mut buffer = Vec::new();
        Exporter::new(ledger).write_csv(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_empty_ledger_writes_header_only() {
        let ledger = ledger_at(2024, 1, 15);
        assert_eq!(render(&ledger), "ID,Amount,Category,Date,Type\n");
    }

    #[test]
    fn test_rows_follow_insertion_order() {
        let mut ledger = ledger_at(2024, 1, 15);
        ledger.append("100.00".parse().unwrap(), "Salary", "income");
        ledger.append("42.505".parse().unwrap(), "Food", "expense");
        ledger.append("10".parse().unwrap(), "Food", "gift");

        assert_eq!(
            render(&ledger),
            "ID,Amount,Category,Date,Type\n\
             0,100.00,Salary,2024-01-15,income\n\
             1,42.51,Food,2024-01-15,expense\n\
             2,10.00,Food,2024-01-15,gift\n"
        );
    }

    #[test]
    fn test_fields_are_quoted_when_needed() {
        let mut ledger = ledger_at(2023, 12, 31);
        ledger.append("3.5".parse().unwrap(), "Food, drinks", "expense");
        ledger.append("1".parse().unwrap(), "The \"good\" stuff", "odd\nkind");

        assert_eq!(
            render(&ledger),
            "ID,Amount,Category,Date,Type\n\
             0,3.50,\"Food, drinks\",2023-12-31,expense\n\
             1,1.00,\"The \"\"good\"\" stuff\",2023-12-31,\"odd\nkind\"\n"
        );
    }

    #[test]
    fn test_write_csv_returns_row_count() {
        let mut ledger = ledger_at(2024, 6, 1);
        ledger.append("1".parse().unwrap(), "A", "income");
        ledger.append("2".parse().unwrap(), "B", "expense");

        let count = Exporter::new(&ledger).write_csv(io::sink()).unwrap();
        assert_eq!(count, 2);
    }
}
