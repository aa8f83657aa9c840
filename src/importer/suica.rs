//! Mobile Suica usage history, as printed by `pdftotext -layout`.
//!
//! There are no delimiters, only column-aligned text. One transaction per line:
//!
//! ```text
//! 12   27   入   京王橋本   出   調布        \14,173      -314
//! 12   27   物販                            \14,487      -170
//! 12   28   ｵｰﾄ                             \17,487     +3,000
//! ```

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use crate::models::{NormalizedRecord, ParseOutcome};

const PRODUCT_MARKER: &str = "Ｓｕｉｃａ";
const STATEMENT_MARKER: &str = "残高ご利用明細";
const BANNERS: &[&str] = &["モバイル", "残高履歴"];
/// The balance column is prefixed with a yen sign, which pdftotext may emit as a backslash.
const BALANCE_MARKERS: &[char] = &['\\', '¥', '￥'];

const RETAIL: &str = "物販";
const ENTRY: &str = "入";
const EXIT: &str = "出";
const AUTO_CHARGE: &str = "ｵｰﾄ";
const TRANSIT_PAYEE: &str = "交通";

fn filename_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"_(\d{8})_").expect("invalid filename date regex"))
}

/// Year of the statement, taken from the `_YYYYMMDD_` part of the export's file name.
pub fn year_from_filename(name: &str) -> Option<i32> {
    let caps = filename_date_re().captures(name)?;
    caps[1][..4].parse().ok()
}

/// Falls back to the current year when the file name carries no date.
pub fn statement_year(name: &str) -> i32 {
    year_from_filename(name).unwrap_or_else(|| chrono::Local::now().year())
}

/// Parse the extracted text of a Suica statement. `None` if it is not one.
pub fn parse_text(text: &str, year: i32) -> Option<ParseOutcome> {
    if !text.contains(PRODUCT_MARKER) || !text.contains(STATEMENT_MARKER) {
        return None;
    }

    let mut outcome = ParseOutcome::default();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || BANNERS.iter().any(|b| line.contains(b)) {
            continue;
        }
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < 4 {
            continue;
        }
        let Some(month) = fields[0].parse::<u32>().ok().filter(|m| (1..=12).contains(m)) else {
            continue;
        };
        let Some(day) = fields[1].parse::<u32>().ok().filter(|d| (1..=31).contains(d)) else {
            continue;
        };

        let (payee, memo) = match fields[2] {
            RETAIL => (RETAIL, String::new()),
            ENTRY => match route(&fields) {
                Some((from, to)) => (TRANSIT_PAYEE, format!("{from} -> {to}")),
                None => continue,
            },
            AUTO_CHARGE => continue,
            _ => continue,
        };

        let raw_amount = fields[fields.len() - 1];
        if !raw_amount.starts_with(['+', '-']) {
            continue;
        }
        let row_number = i + 1;
        let raw: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
        let amount = match raw_amount.replace(',', "").parse::<i64>() {
            Ok(amount) => amount,
            Err(e) => {
                outcome.skip(row_number, &raw, format!("invalid amount \"{raw_amount}\": {e}"));
                continue;
            }
        };
        // Charges and refunds are not spending.
        if amount > 0 {
            continue;
        }
        let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
            outcome.skip(row_number, &raw, format!("date out of range: {year}-{month:02}-{day:02}"));
            continue;
        };

        outcome.push_record(NormalizedRecord {
            date: date.format("%Y-%m-%d").to_string(),
            payee: payee.to_string(),
            memo,
            amount: amount.to_string(),
        });
    }
    Some(outcome)
}

/// Entry and exit stations of a transit line. Station names that pdftotext
/// split on spaces are joined back together.
fn route(fields: &[&str]) -> Option<(String, String)> {
    let exit = fields.iter().skip(3).position(|f| *f == EXIT)? + 3;
    let from = fields[3..exit].concat();
    // The last field is always the amount.
    let to: String = fields
        .get(exit + 1..fields.len() - 1)
        .unwrap_or_default()
        .iter()
        .take_while(|f| !f.starts_with(BALANCE_MARKERS))
        .copied()
        .collect();
    if from.is_empty() || to.is_empty() {
        return None;
    }
    Some((from, to))
}
