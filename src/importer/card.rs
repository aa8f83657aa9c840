//! Credit card statement formats. Card exports list charges as positive
//! numbers, so every amount here goes through `flip_sign` exactly once.

use super::{cell, collect_rows, required, ImporterKind, Row};
use crate::error::Result;
use crate::models::{NormalizedRecord, ParseOutcome, RawRow};
use crate::normalize::{convert_date, flip_sign, DateLayout};

/// A charge row: payee and amount columns are fixed per format.
fn charge(
    kind: ImporterKind,
    row: &[String],
    row_number: usize,
    date: String,
    payee_col: usize,
    amount_col: usize,
) -> Result<Row> {
    Ok(Row::Record(NormalizedRecord {
        date,
        payee: required(kind, row, row_number, payee_col)?.to_string(),
        memo: String::new(),
        amount: flip_sign(required(kind, row, row_number, amount_col)?),
    }))
}

// ---------------------------------------------------------------------------
// Epos
// 種別（ショッピング、キャッシング、その他）, ご利用年月日, ご利用場所, ご利用内容,
// ご利用金額, お支払金額（キャッシングでは利息を含みます）, 支払区分
// ---------------------------------------------------------------------------

pub(super) fn parse_epos(table: &[RawRow]) -> Result<Option<ParseOutcome>> {
    let Some(header) = table.first() else {
        return Ok(None);
    };
    if header.len() != 7 || header[1] != "ご利用年月日" {
        return Ok(None);
    }
    collect_rows(table, 1, |row, n| {
        if cell(row, 1).is_empty() || cell(row, 6).is_empty() {
            return Ok(Row::Skip("missing required fields (date or payment type)".into()));
        }
        // Annual fee rows carry a full-width dash here and land in the skip list.
        let date = match convert_date(DateLayout::Kanji, cell(row, 1)) {
            Ok(date) => date,
            Err(e) => return Ok(Row::Skip(e.to_string())),
        };
        charge(ImporterKind::Epos, row, n, date, 2, 5)
    })
    .map(Some)
}

// ---------------------------------------------------------------------------
// View: six rows of member info and column titles before the data
// ---------------------------------------------------------------------------

pub(super) fn parse_view(table: &[RawRow]) -> Result<Option<ParseOutcome>> {
    if table.len() < 7 || cell(&table[0], 0) != "会員番号" || cell(&table[4], 0) != "ご利用年月日" {
        return Ok(None);
    }
    collect_rows(table, 6, |row, n| {
        let date = match convert_date(DateLayout::SlashPadded, cell(row, 0)) {
            Ok(date) => date,
            Err(e) => return Ok(Row::Skip(e.to_string())),
        };
        charge(ImporterKind::View, row, n, date, 1, 4)
    })
    .map(Some)
}

// ---------------------------------------------------------------------------
// Saison: four rows of card info and column titles before the data
// ---------------------------------------------------------------------------

pub(super) fn parse_saison(table: &[RawRow]) -> Result<Option<ParseOutcome>> {
    if table.len() < 5 || cell(&table[0], 0) != "カード名称" || cell(&table[3], 0) != "利用日" {
        return Ok(None);
    }
    collect_rows(table, 4, |row, n| {
        let date = match convert_date(DateLayout::SlashPadded, cell(row, 0)) {
            Ok(date) => date,
            Err(e) => return Ok(Row::Skip(e.to_string())),
        };
        charge(ImporterKind::Saison, row, n, date, 1, 5)
    })
    .map(Some)
}

// ---------------------------------------------------------------------------
// Rakuten Card
// ---------------------------------------------------------------------------

pub(super) fn parse_rakuten_card(table: &[RawRow]) -> Result<Option<ParseOutcome>> {
    let Some(header) = table.first() else {
        return Ok(None);
    };
    if header.len() != 10 || header[9] != "新規サイン" {
        return Ok(None);
    }
    collect_rows(table, 1, |row, n| {
        let date = match convert_date(DateLayout::SlashPadded, cell(row, 0)) {
            Ok(date) => date,
            Err(e) => return Ok(Row::Skip(e.to_string())),
        };
        charge(ImporterKind::RakutenCard, row, n, date, 1, 6)
    })
    .map(Some)
}

// ---------------------------------------------------------------------------
// SMBC Card: no header row, the card holder marker sits in the first data row
// ---------------------------------------------------------------------------

pub(super) fn parse_smbc_card(table: &[RawRow]) -> Result<Option<ParseOutcome>> {
    let Some(first) = table.first() else {
        return Ok(None);
    };
    let holder = cell(first, 2);
    if !(holder == "ご本人" || holder == "ご家族") || !cell(first, 5).starts_with('\'') {
        return Ok(None);
    }
    collect_rows(table, 0, |row, n| {
        let date = match convert_date(DateLayout::Slash, cell(row, 0)) {
            Ok(date) => date,
            Err(e) => return Ok(Row::Skip(e.to_string())),
        };
        let kind = ImporterKind::SmbcCard;
        // Foreign currency rows leave column 7 empty and carry the yen amount in 6.
        let amount = match cell(row, 7) {
            "" => required(kind, row, n, 6)?,
            amount => amount,
        };
        Ok(Row::Record(NormalizedRecord {
            date,
            payee: required(kind, row, n, 1)?.to_string(),
            memo: String::new(),
            amount: flip_sign(amount),
        }))
    })
    .map(Some)
}

// ---------------------------------------------------------------------------
// SMBC Card statement: a "<name>様, <card number>****" banner, then a mix of
// transaction and summary rows. Only rows dated in column 0 are transactions.
// ---------------------------------------------------------------------------

pub(super) fn parse_smbc_card2(table: &[RawRow]) -> Result<Option<ParseOutcome>> {
    let Some(first) = table.first() else {
        return Ok(None);
    };
    if !cell(first, 0).ends_with('様') || !cell(first, 1).ends_with("****") {
        return Ok(None);
    }
    collect_rows(table, 0, |row, n| match convert_date(DateLayout::Slash, cell(row, 0)) {
        Ok(date) => charge(ImporterKind::SmbcCard2, row, n, date, 1, 5),
        Err(_) => Ok(Row::Ignore),
    })
    .map(Some)
}
