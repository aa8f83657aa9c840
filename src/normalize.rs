use std::fmt;
use std::ops::RangeInclusive;

use chrono::NaiveDate;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

/// Negate a localized amount and render it without thousands separators.
///
/// Empty input becomes `"0"`. Decimal input is truncated toward zero. Input
/// that is not numeric at all is logged and also becomes `"0"`.
pub fn flip_sign(raw: &str) -> String {
    let cleaned = raw.replace(',', "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return "0".to_string();
    }
    if let Some(v) = cleaned.parse::<i64>().ok().and_then(i64::checked_neg) {
        return v.to_string();
    }
    match cleaned.parse::<f64>() {
        // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive.
        Ok(v) if v.trunc() >= i64::MIN as f64 && v.trunc() < i64::MAX as f64 => {
            match (v.trunc() as i64).checked_neg() {
                Some(n) => n.to_string(),
                None => {
                    tracing::warn!(value = raw, "amount out of range for flip_sign");
                    "0".to_string()
                }
            }
        }
        _ => {
            tracing::warn!(value = raw, "invalid amount for flip_sign");
            "0".to_string()
        }
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Source date layouts found in the supported exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    /// `2025/1/5` or `2025/01/05`
    Slash,
    /// `2025/01/05` only
    SlashPadded,
    /// `20250105`
    Compact,
    /// `2025年01月05日`
    Kanji,
}

impl fmt::Display for DateLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pattern = match self {
            Self::Slash => "YYYY/M/D",
            Self::SlashPadded => "YYYY/MM/DD",
            Self::Compact => "YYYYMMDD",
            Self::Kanji => "YYYY年MM月DD日",
        };
        f.write_str(pattern)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    #[error("cannot parse \"{value}\" as {layout}")]
    Layout { value: String, layout: DateLayout },

    #[error("date out of range: \"{value}\"")]
    OutOfRange { value: String },
}

impl DateLayout {
    fn split<'a>(&self, value: &'a str) -> Option<(&'a str, &'a str, &'a str)> {
        match self {
            Self::Slash | Self::SlashPadded => {
                let mut parts = value.split('/');
                let parsed = (parts.next()?, parts.next()?, parts.next()?);
                parts.next().is_none().then_some(parsed)
            }
            Self::Compact => {
                if value.len() != 8 || !value.is_ascii() {
                    return None;
                }
                Some((&value[..4], &value[4..6], &value[6..]))
            }
            Self::Kanji => {
                let (y, rest) = value.split_once('年')?;
                let (m, rest) = rest.split_once('月')?;
                let d = rest.strip_suffix('日')?;
                Some((y, m, d))
            }
        }
    }

    fn field_width(&self) -> RangeInclusive<usize> {
        match self {
            Self::Slash => 1..=2,
            _ => 2..=2,
        }
    }

    /// Parse `value` strictly against this layout.
    pub fn parse(&self, value: &str) -> Result<NaiveDate, DateError> {
        let mismatch = || DateError::Layout {
            value: value.to_string(),
            layout: *self,
        };
        let (y, m, d) = self.split(value).ok_or_else(mismatch)?;
        let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        let width = self.field_width();
        if y.len() != 4
            || !digits(y)
            || !digits(m)
            || !digits(d)
            || !width.contains(&m.len())
            || !width.contains(&d.len())
        {
            return Err(mismatch());
        }
        let (Ok(year), Ok(month), Ok(day)) = (y.parse::<i32>(), m.parse::<u32>(), d.parse::<u32>())
        else {
            return Err(mismatch());
        };
        NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| DateError::OutOfRange {
            value: value.to_string(),
        })
    }
}

/// Convert `value` from `layout` into `YYYY-MM-DD`.
pub fn convert_date(layout: DateLayout, value: &str) -> Result<String, DateError> {
    layout
        .parse(value)
        .map(|date| date.format("%Y-%m-%d").to_string())
}
