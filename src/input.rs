//! String-to-value conversion for menu input. Every failure is an
//! InvalidInput carrying the rejected text.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::error::{Error, Result};

pub(crate) fn parse_id(s: &str) -> Result<i64> {
    s.parse::<i64>()
        .map_err(|_| Error::InvalidInput(format!("'{s}' is not a valid id")))
}

/// Accepts `YYYY-MM-DD HH:MM:SS` or a bare `YYYY-MM-DD`, which defaults to
/// midnight.
pub(crate) fn parse_date_time(s: &str) -> Result<NaiveDateTime> {
    if let Ok(stamp) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Ok(stamp);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "'{s}' is not a valid date, expected YYYY-MM-DD or YYYY-MM-DD HH:MM:SS"
            ))
        })
}

pub(crate) fn parse_amount(s: &str) -> Result<Decimal> {
    Decimal::from_str(s)
        .map_err(|_| Error::InvalidInput(format!("'{s}' is not a valid decimal amount")))
}

/// File paths entered at the menu must be absolute.
pub(crate) fn parse_path(s: &str) -> Result<PathBuf> {
    let path = PathBuf::from(s);
    if !path.is_absolute() {
        return Err(Error::InvalidInput(format!(
            "'{s}' is not an absolute path"
        )));
    }
    Ok(path)
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
