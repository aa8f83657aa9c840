use std::path::Path;

use crate::error::Result;
use crate::models::NormalizedRecord;

pub const OUTPUT_HEADER: [&str; 4] = ["Date", "Payee", "Memo", "Amount"];

/// Write records as budgeting-tool CSV. Amounts are written exactly as the
/// recognizer produced them; rows without a date or amount are dropped.
/// Returns the number of rows written.
pub fn write_records(records: &[NormalizedRecord], output_path: &Path) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(output_path)?;
    wtr.write_record(OUTPUT_HEADER)?;
    let mut written = 0;
    for record in records.iter().filter(|r| r.is_writable()) {
        wtr.write_record([&record.date, &record.payee, &record.memo, &record.amount])?;
        written += 1;
    }
    wtr.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_table;

    fn record(date: &str, payee: &str, memo: &str, amount: &str) -> NormalizedRecord {
        NormalizedRecord {
            date: date.into(),
            payee: payee.into(),
            memo: memo.into(),
            amount: amount.into(),
        }
    }

    #[test]
    fn test_write_records_basic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.csv");
        let records = [
            record("2024-01-15", "Store A", "Purchase", "1000"),
            record("2024-01-16", "Store B", "Payment", "-500"),
        ];
        assert_eq!(write_records(&records, &path).unwrap(), 2);
        let rows = read_table(&path).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], OUTPUT_HEADER);
        // Amounts are not flipped again on the way out.
        assert_eq!(rows[1][3], "1000");
        assert_eq!(rows[2][3], "-500");
    }

    #[test]
    fn test_write_records_drops_empty_date_or_amount() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.csv");
        let records = [
            record("2024-01-15", "Valid", "Valid", "1000"),
            record("", "No Date", "Should Skip", "500"),
            record("2024-01-16", "No Amount", "Should Skip", ""),
            record("2024-01-17", "Valid", "Valid", "2000"),
        ];
        assert_eq!(write_records(&records, &path).unwrap(), 2);
        assert_eq!(read_table(&path).unwrap().len(), 3);
    }

    #[test]
    fn test_write_records_empty_list_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.csv");
        write_records(&[], &path).unwrap();
        let rows = read_table(&path).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], OUTPUT_HEADER);
    }

    #[test]
    fn test_write_records_quotes_special_characters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.csv");
        let records = [record("2024-01-15", "Store \"Quotes\"", "Comma, in memo", "1000")];
        write_records(&records, &path).unwrap();
        let rows = read_table(&path).unwrap();
        assert_eq!(rows[1][1], "Store \"Quotes\"");
        assert_eq!(rows[1][2], "Comma, in memo");
    }

    #[test]
    fn test_write_records_invalid_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("output.csv");
        assert!(write_records(&[record("2024-01-15", "x", "", "1")], &path).is_err());
    }
}
