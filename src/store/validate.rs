//! Path and content validation for CSV transaction files.
//!
//! Construction-time checks surface Creation/Format errors; callers that
//! re-run them mid-session remap violations to the fatal Tampered kind.

use std::collections::HashSet;
use std::fs::{File, OpenOptions};
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionKind, TIMESTAMP_FORMAT};

/// Probes that a sibling file can be created next to `path`. Stands in for
/// a direct permission/existence check on the parent directory.
pub(crate) fn probe_parent_dir(path: &Path) -> Result<()> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    // The temp file is removed again when the handle drops.
    tempfile::Builder::new()
        .prefix("probe")
        .suffix(".csv")
        .tempfile_in(parent)
        .map_err(|_| {
            Error::Creation(format!(
                "a file cannot be created under {}",
                parent.display()
            ))
        })?;
    Ok(())
}

pub(crate) fn create_if_missing(path: &Path) -> Result<()> {
    if !path.exists() {
        File::create(path)
            .map_err(|_| Error::Creation(format!("file cannot be created: {}", path.display())))?;
    }
    Ok(())
}

/// The file must be readable, writable, and carry a `.csv` extension.
pub(crate) fn check_properties(path: &Path) -> Result<()> {
    File::open(path)
        .map_err(|_| Error::Format(format!("file is not readable: {}", path.display())))?;
    OpenOptions::new()
        .append(true)
        .open(path)
        .map_err(|_| Error::Format(format!("file is not writable: {}", path.display())))?;
    if path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
        return Err(Error::Format(format!(
            "file must have a .csv extension: {}",
            path.display()
        )));
    }
    Ok(())
}

/// Parses and validates every line of a 4-field store file, in file order.
/// Any violation is a Format error naming the 0-based line it occurred on.
pub(crate) fn read_records(path: &Path) -> Result<Vec<(i64, Transaction)>> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut records = Vec::new();
    let mut seen_ids = HashSet::new();
    for (line, result) in reader.records().enumerate() {
        let record = result.map_err(|err| Error::Format(format!("line {line}: {err}")))?;
        let (id, transaction) = parse_store_record(&record)
            .map_err(|detail| Error::Format(format!("line {line}: {detail}")))?;
        if !seen_ids.insert(id) {
            return Err(Error::Format(format!("line {line}: duplicate id {id}")));
        }
        records.push((id, transaction));
    }
    Ok(records)
}

fn parse_store_record(record: &csv::StringRecord) -> std::result::Result<(i64, Transaction), String> {
    if record.len() != 4 {
        return Err(format!("expected 4 values, found {}", record.len()));
    }
    let id = record[0]
        .parse::<i64>()
        .map_err(|_| format!("invalid id '{}'", &record[0]))?;
    if id < 0 {
        return Err(format!("negative id {id}"));
    }
    let (timestamp, kind, amount) = parse_value_fields(&record[1], &record[2], &record[3])?;
    Ok((id, Transaction::new(timestamp, kind, amount)))
}

/// Shared by the 4-field store lines and the 3-field ledger lines, which
/// agree on everything after the id column.
pub(crate) fn parse_value_fields(
    timestamp: &str,
    kind: &str,
    amount: &str,
) -> std::result::Result<(NaiveDateTime, TransactionKind, Decimal), String> {
    let timestamp = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .map_err(|_| format!("invalid timestamp '{timestamp}'"))?;
    let kind = TransactionKind::parse(kind).map_err(|_| format!("unknown kind '{kind}'"))?;
    let amount =
        Decimal::from_str(amount).map_err(|_| format!("invalid amount '{amount}'"))?;
    Ok((timestamp, kind, amount))
}
