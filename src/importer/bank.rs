use super::{cell, collect_rows, debit_or_credit, header_is, required, ImporterKind, Row};
use crate::error::Result;
use crate::models::{NormalizedRecord, ParseOutcome, RawRow};
use crate::normalize::{convert_date, DateLayout};

// ---------------------------------------------------------------------------
// SMBC bank
// 年月日, お引出し, お預入れ, お取り扱い内容, 残高, メモ, ラベル
// ---------------------------------------------------------------------------

pub(super) fn parse_smbc(table: &[RawRow]) -> Result<Option<ParseOutcome>> {
    let Some(header) = table.first() else {
        return Ok(None);
    };
    if header.len() != 7 || header[0] != "年月日" {
        return Ok(None);
    }
    collect_rows(table, 1, |row, n| {
        let date = match convert_date(DateLayout::Slash, cell(row, 0)) {
            Ok(date) => date,
            Err(e) => return Ok(Row::Skip(e.to_string())),
        };
        let kind = ImporterKind::Smbc;
        let amount = debit_or_credit(required(kind, row, n, 1)?, required(kind, row, n, 2)?);
        Ok(Row::Record(NormalizedRecord {
            date,
            payee: required(kind, row, n, 3)?.to_string(),
            memo: String::new(),
            amount,
        }))
    })
    .map(Some)
}

// ---------------------------------------------------------------------------
// Rakuten bank
// 取引日, 入出金(円), 取引後残高(円), 入出金内容
// ---------------------------------------------------------------------------

pub(super) fn parse_rakuten(table: &[RawRow]) -> Result<Option<ParseOutcome>> {
    let Some(header) = table.first() else {
        return Ok(None);
    };
    if header.len() != 4 || header[3] != "入出金内容" {
        return Ok(None);
    }
    collect_rows(table, 1, |row, n| {
        let date = match convert_date(DateLayout::Compact, cell(row, 0)) {
            Ok(date) => date,
            Err(e) => return Ok(Row::Skip(e.to_string())),
        };
        let kind = ImporterKind::Rakuten;
        // Already signed in the export.
        Ok(Row::Record(NormalizedRecord {
            date,
            payee: required(kind, row, n, 3)?.to_string(),
            memo: String::new(),
            amount: required(kind, row, n, 1)?.to_string(),
        }))
    })
    .map(Some)
}

// ---------------------------------------------------------------------------
// SBI Sumishin Net Bank
// ---------------------------------------------------------------------------

const SBI_HEADER: &[&str] = &["日付", "内容", "出金金額(円)", "入金金額(円)", "残高(円)", "メモ"];

pub(super) fn parse_sbi(table: &[RawRow]) -> Result<Option<ParseOutcome>> {
    match table.first() {
        Some(header) if header_is(header, SBI_HEADER) => {}
        _ => return Ok(None),
    }
    collect_rows(table, 1, |row, n| {
        let date = match convert_date(DateLayout::SlashPadded, cell(row, 0)) {
            Ok(date) => date,
            Err(e) => return Ok(Row::Skip(e.to_string())),
        };
        let kind = ImporterKind::Sbi;
        Ok(Row::Record(NormalizedRecord {
            date,
            payee: String::new(),
            memo: required(kind, row, n, 1)?.to_string(),
            amount: debit_or_credit(required(kind, row, n, 2)?, required(kind, row, n, 3)?),
        }))
    })
    .map(Some)
}

// ---------------------------------------------------------------------------
// SBI Shinsei Bank
// ---------------------------------------------------------------------------

const SHINSEI_HEADER: &[&str] = &["取引日", "摘要", "出金金額", "入金金額", "残高"];

pub(super) fn parse_shinsei(table: &[RawRow]) -> Result<Option<ParseOutcome>> {
    match table.first() {
        Some(header) if header_is(header, SHINSEI_HEADER) => {}
        _ => return Ok(None),
    }
    collect_rows(table, 1, |row, n| {
        let date = match convert_date(DateLayout::SlashPadded, cell(row, 0)) {
            Ok(date) => date,
            Err(e) => return Ok(Row::Skip(e.to_string())),
        };
        let kind = ImporterKind::Shinsei;
        Ok(Row::Record(NormalizedRecord {
            date,
            payee: String::new(),
            memo: required(kind, row, n, 1)?.to_string(),
            amount: debit_or_credit(required(kind, row, n, 2)?, required(kind, row, n, 3)?),
        }))
    })
    .map(Some)
}
