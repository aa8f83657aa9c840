mod bank;
mod card;
pub mod suica;
mod wallet;

use crate::error::{MeisaiError, Result};
use crate::models::{NormalizedRecord, ParseOutcome, RawRow};
use crate::normalize::flip_sign;

/// What a recognizer is handed: a tokenized CSV table or text pulled from a PDF.
#[derive(Debug, Clone, Copy)]
pub enum Input<'a> {
    Table(&'a [RawRow]),
    PdfText { text: &'a str, year: i32 },
}

// ---------------------------------------------------------------------------
// Recognizers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImporterKind {
    Smbc,
    Rakuten,
    Epos,
    View,
    Saison,
    RakutenCard,
    Sbi,
    SmbcCard,
    SmbcCard2,
    PayPay,
    Shinsei,
    Suica,
}

impl ImporterKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Smbc => "smbc",
            Self::Rakuten => "rakuten",
            Self::Epos => "epos",
            Self::View => "view",
            Self::Saison => "saison",
            Self::RakutenCard => "rakuten_card",
            Self::Sbi => "sbi",
            Self::SmbcCard => "smbc_card",
            Self::SmbcCard2 => "smbc_card2",
            Self::PayPay => "paypay",
            Self::Shinsei => "shinsei",
            Self::Suica => "suica",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Smbc => "SMBC Bank",
            Self::Rakuten => "Rakuten Bank",
            Self::Epos => "Epos Card",
            Self::View => "View Card",
            Self::Saison => "Saison Card",
            Self::RakutenCard => "Rakuten Card",
            Self::Sbi => "SBI Sumishin Net Bank",
            Self::SmbcCard => "SMBC Card",
            Self::SmbcCard2 => "SMBC Card (statement)",
            Self::PayPay => "PayPay",
            Self::Shinsei => "SBI Shinsei Bank",
            Self::Suica => "Mobile Suica (PDF)",
        }
    }

    /// Identify `input` and normalize it.
    ///
    /// `Ok(None)` means the input is not this format. A matched format with no
    /// usable rows is `Ok(Some(_))` with empty collections.
    pub fn parse(&self, input: &Input<'_>) -> Result<Option<ParseOutcome>> {
        let table = match (self, input) {
            (Self::Suica, Input::PdfText { text, year }) => return Ok(suica::parse_text(text, *year)),
            (Self::Suica, Input::Table(_)) | (_, Input::PdfText { .. }) => return Ok(None),
            (_, Input::Table(table)) => *table,
        };
        match self {
            Self::Smbc => bank::parse_smbc(table),
            Self::Rakuten => bank::parse_rakuten(table),
            Self::Epos => card::parse_epos(table),
            Self::View => card::parse_view(table),
            Self::Saison => card::parse_saison(table),
            Self::RakutenCard => card::parse_rakuten_card(table),
            Self::Sbi => bank::parse_sbi(table),
            Self::SmbcCard => card::parse_smbc_card(table),
            Self::SmbcCard2 => card::parse_smbc_card2(table),
            Self::PayPay => wallet::parse_paypay(table),
            Self::Shinsei => bank::parse_shinsei(table),
            Self::Suica => Ok(None),
        }
    }
}

/// Several signatures overlap, so this order decides which format wins.
pub const ALL_IMPORTERS: &[ImporterKind] = &[
    ImporterKind::Smbc,
    ImporterKind::Rakuten,
    ImporterKind::Epos,
    ImporterKind::View,
    ImporterKind::Saison,
    ImporterKind::RakutenCard,
    ImporterKind::Sbi,
    ImporterKind::SmbcCard,
    ImporterKind::SmbcCard2,
    ImporterKind::PayPay,
    ImporterKind::Shinsei,
    ImporterKind::Suica,
];

pub fn get_by_key(key: &str) -> Option<ImporterKind> {
    ALL_IMPORTERS.iter().find(|i| i.key() == key).copied()
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub enum Dispatch {
    Matched {
        kind: ImporterKind,
        outcome: ParseOutcome,
    },
    NoMatch,
}

/// Runs recognizers in registry order; the first one that accepts wins.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    registry: Vec<ImporterKind>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(ALL_IMPORTERS.to_vec())
    }
}

impl Dispatcher {
    pub fn new(registry: Vec<ImporterKind>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &[ImporterKind] {
        &self.registry
    }

    pub fn dispatch(&self, input: &Input<'_>) -> Result<Dispatch> {
        for kind in &self.registry {
            if let Some(outcome) = kind.parse(input)? {
                tracing::debug!(format = kind.key(), "matched format");
                return Ok(Dispatch::Matched {
                    kind: *kind,
                    outcome,
                });
            }
        }
        tracing::debug!("no format matched");
        Ok(Dispatch::NoMatch)
    }
}

// ---------------------------------------------------------------------------
// Helpers shared by the recognizers
// ---------------------------------------------------------------------------

/// Per-row verdict of a recognizer.
enum Row {
    Record(NormalizedRecord),
    Skip(String),
    Ignore,
}

/// Walk the data rows after `header_rows`, numbering them by table position.
fn collect_rows<F>(table: &[RawRow], header_rows: usize, mut extract: F) -> Result<ParseOutcome>
where
    F: FnMut(&[String], usize) -> Result<Row>,
{
    let mut outcome = ParseOutcome::default();
    for (i, row) in table.iter().enumerate().skip(header_rows) {
        let row_number = i + 1;
        match extract(row, row_number)? {
            Row::Record(record) => outcome.push_record(record),
            Row::Skip(reason) => outcome.skip(row_number, row, reason),
            Row::Ignore => {}
        }
    }
    Ok(outcome)
}

/// Cell at `idx`, or `""` when the row is shorter.
fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(String::as_str).unwrap_or("")
}

/// Cell at `idx` of a row that has already been claimed as data.
fn required<'a>(kind: ImporterKind, row: &'a [String], row_number: usize, idx: usize) -> Result<&'a str> {
    row.get(idx)
        .map(String::as_str)
        .ok_or(MeisaiError::ShortRow {
            format: kind.key(),
            row: row_number,
            column: idx,
            len: row.len(),
        })
}

fn header_is(row: &[String], expected: &[&str]) -> bool {
    row.len() == expected.len() && row.iter().zip(expected).all(|(a, b)| a == b)
}

/// Debit wins when both columns are populated; credit is passed through untouched.
fn debit_or_credit(debit: &str, credit: &str) -> String {
    if debit.is_empty() {
        credit.to_string()
    } else {
        flip_sign(debit)
    }
}

#[cfg(test)]
pub(crate) fn table(rows: &[&[&str]]) -> Vec<RawRow> {
    rows.iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect()
}
