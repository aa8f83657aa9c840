use super::{cell, collect_rows, required, ImporterKind, Row};
use crate::error::Result;
use crate::models::{NormalizedRecord, ParseOutcome, RawRow};
use crate::normalize::{convert_date, flip_sign, DateLayout};

const PAYPAY_HEADER: &[&str] = &[
    "取引日",
    "出金金額（円）",
    "入金金額（円）",
    "海外出金金額",
    "通貨",
    "変換レート（円）",
    "利用国",
    "取引内容",
    "取引先",
    "取引方法",
    "支払い区分",
    "利用者",
    "取引番号",
];

const BOM: char = '\u{feff}';

/// The export sometimes starts with a UTF-8 byte order mark.
fn is_paypay_header(row: &[String]) -> bool {
    row.len() == PAYPAY_HEADER.len()
        && row.iter().zip(PAYPAY_HEADER).enumerate().all(|(i, (actual, expected))| {
            let actual = if i == 0 {
                actual.strip_prefix(BOM).unwrap_or(actual)
            } else {
                actual.as_str()
            };
            actual == *expected
        })
}

// ---------------------------------------------------------------------------
// PayPay: withdrawals are flipped (and lose their commas), deposits are
// passed through as exported, commas included. "-" marks an empty column.
// ---------------------------------------------------------------------------

pub(super) fn parse_paypay(table: &[RawRow]) -> Result<Option<ParseOutcome>> {
    match table.first() {
        Some(header) if is_paypay_header(header) => {}
        _ => return Ok(None),
    }
    collect_rows(table, 1, |row, n| {
        // "2025/12/27 12:00:46"
        let day = cell(row, 0).split(' ').next().unwrap_or("");
        let date = match convert_date(DateLayout::Slash, day) {
            Ok(date) => date,
            Err(e) => return Ok(Row::Skip(e.to_string())),
        };
        let kind = ImporterKind::PayPay;
        let withdrawal = required(kind, row, n, 1)?;
        let amount = if withdrawal.is_empty() || withdrawal == "-" {
            match required(kind, row, n, 2)? {
                // Neither side filled in; the writer drops the row.
                "-" => String::new(),
                deposit => deposit.to_string(),
            }
        } else {
            flip_sign(withdrawal)
        };
        Ok(Row::Record(NormalizedRecord {
            date,
            payee: required(kind, row, n, 8)?.to_string(),
            memo: String::new(),
            amount,
        }))
    })
    .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::table;

    fn paypay_row<'a>(date: &'a str, withdrawal: &'a str, deposit: &'a str, payee: &'a str) -> Vec<&'a str> {
        vec![date, withdrawal, deposit, "-", "-", "-", "-", "支払い", payee, "PayPay残高", "-", "-", "12345"]
    }

    #[test]
    fn test_paypay_parse_with_bom() {
        let first = format!("{BOM}取引日");
        let mut header = PAYPAY_HEADER.to_vec();
        header[0] = &first;
        let row = paypay_row("2025/1/5 12:00:00", "1000", "-", "Test Store");
        let rows = table(&[&header, &row]);
        let outcome = parse_paypay(&rows).unwrap().unwrap();
        assert_eq!(outcome.valid_records.len(), 1);
        let r = &outcome.valid_records[0];
        assert_eq!(r.date, "2025-01-05");
        assert_eq!(r.amount, "-1000");
        assert_eq!(r.payee, "Test Store");
    }

    #[test]
    fn test_paypay_skips_invalid_dates() {
        let valid = paypay_row("2025/1/5 12:00:00", "1000", "-", "Valid");
        let invalid = paypay_row("invalid-date 12:00:00", "2000", "-", "Invalid");
        let valid2 = paypay_row("2025/1/6 13:00:00", "3000", "-", "Valid");
        let rows = table(&[PAYPAY_HEADER, &valid, &invalid, &valid2]);
        let outcome = parse_paypay(&rows).unwrap().unwrap();
        assert_eq!(outcome.valid_records.len(), 2);
        assert_eq!(outcome.skipped_rows.len(), 1);
        assert_eq!(outcome.skipped_rows[0].row_number, 3);
        assert_eq!(outcome.skipped_rows[0].raw_data[8], "Invalid");
    }

    #[test]
    fn test_paypay_amount_handling() {
        let cases = [
            ("-", "5000", "5000"),
            ("3000", "-", "-3000"),
            ("1,234", "-", "-1234"),
            ("-", "5,678", "5,678"),
            ("1000", "2000", "-1000"),
            ("-", "-", ""),
        ];
        for (withdrawal, deposit, expected) in cases {
            let row = paypay_row("2025/1/1 12:00:00", withdrawal, deposit, "Test");
            let rows = table(&[PAYPAY_HEADER, &row]);
            let outcome = parse_paypay(&rows).unwrap().unwrap();
            assert_eq!(outcome.valid_records[0].amount, expected, "{withdrawal} / {deposit}");
        }
    }

    #[test]
    fn test_paypay_header_must_match_exactly() {
        let mut header = PAYPAY_HEADER.to_vec();
        header[8] = "店舗";
        let rows = table(&[&header]);
        assert_eq!(parse_paypay(&rows).unwrap(), None);
        let rows = table(&[&PAYPAY_HEADER[..12]]);
        assert_eq!(parse_paypay(&rows).unwrap(), None);
    }
}
