use std::path::Path;

use encoding_rs::SHIFT_JIS;

use crate::error::Result;
use crate::models::RawRow;

/// Decode a statement export. Banks and card issuers still ship Shift_JIS,
/// newer exports are UTF-8 (sometimes with a BOM, which is kept).
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => {
            tracing::debug!(encoding = "UTF-8", "decoded input");
            text.to_string()
        }
        Err(_) => {
            let (decoded, _, had_errors) = SHIFT_JIS.decode(bytes);
            tracing::debug!(encoding = "Shift_JIS", had_errors, "decoded input");
            decoded.into_owned()
        }
    }
}

/// Tokenize CSV text into rows. Column counts may vary from row to row.
pub fn parse_table(text: &str) -> Result<Vec<RawRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

pub fn read_table(file_path: &Path) -> Result<Vec<RawRow>> {
    let bytes = std::fs::read(file_path)?;
    parse_table(&decode_text(&bytes))
}
