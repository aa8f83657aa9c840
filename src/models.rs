/// One tokenized line of a statement export.
pub type RawRow = Vec<String>;

/// Canonical transaction handed to the budgeting tool.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedRecord {
    pub date: String,
    pub payee: String,
    pub memo: String,
    pub amount: String,
}

impl NormalizedRecord {
    /// Records missing a date or an amount are never written out.
    pub fn is_writable(&self) -> bool {
        !self.date.is_empty() && !self.amount.is_empty()
    }
}

/// A row the recognizer claimed but could not normalize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    /// 1-based position in the source table, header rows included.
    pub row_number: usize,
    pub raw_data: RawRow,
    pub reason: String,
}

/// Output of a recognizer that accepted its input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    pub valid_records: Vec<NormalizedRecord>,
    pub skipped_rows: Vec<SkippedRow>,
}

impl ParseOutcome {
    pub fn push_record(&mut self, record: NormalizedRecord) {
        self.valid_records.push(record);
    }

    pub fn skip(&mut self, row_number: usize, raw: &[String], reason: impl Into<String>) {
        self.skipped_rows.push(SkippedRow {
            row_number,
            raw_data: raw.to_vec(),
            reason: reason.into(),
        });
    }
}
