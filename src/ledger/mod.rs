use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionKind, TIMESTAMP_FORMAT};
use crate::store::validate;

/// How a bulk file import combines with the live transaction set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Imported lines extend the current set; ids continue after the
    /// existing ones.
    Append,
    /// The current set, id counter, and balance are reset first; ids start
    /// from 0.
    Replace,
}

/// Transaction set plus a running balance. The balance always equals the
/// signed sum of the accepted amounts: expenses that would drive it negative
/// are rejected, and bulk imports either apply completely or not at all.
#[derive(Debug, Default)]
pub struct Ledger {
    next_id: i64,
    transactions: BTreeMap<i64, Transaction>,
    balance: Decimal,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// The sole balance-affecting primitive. Fails with InsufficientFunds
    /// when an expense exceeds the current balance; otherwise inserts under
    /// the next sequential id and adjusts the balance.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<i64> {
        if transaction.kind() == TransactionKind::Expense && self.balance < transaction.amount() {
            return Err(Error::InsufficientFunds {
                balance: self.balance,
                amount: transaction.amount(),
            });
        }

        let id = self.next_id;
        match transaction.kind() {
            TransactionKind::Income => self.balance += transaction.amount(),
            TransactionKind::Expense => self.balance -= transaction.amount(),
        }
        self.transactions.insert(id, transaction);
        self.next_id += 1;
        Ok(id)
    }

    pub fn transaction_by_id(&self, id: i64) -> Result<Transaction> {
        self.transactions
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("no transaction with id {id}")))
    }

    /// Exclusive bounds on both ends, matching the stores.
    pub fn transactions_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<BTreeMap<i64, Transaction>> {
        if start > end {
            return Err(Error::InvalidInput(
                "start date cannot be after end date".into(),
            ));
        }

        let matches: BTreeMap<i64, Transaction> = self
            .transactions
            .iter()
            .filter(|(_, txn)| start < txn.timestamp() && txn.timestamp() < end)
            .map(|(id, txn)| (*id, txn.clone()))
            .collect();

        if matches.is_empty() {
            return Err(Error::NotFound(format!(
                "no transactions between {start} and {end}"
            )));
        }
        Ok(matches)
    }

    pub fn all_transactions(&self) -> Result<BTreeMap<i64, Transaction>> {
        self.transactions_between(NaiveDateTime::MIN, NaiveDateTime::MAX)
            .map_err(|err| match err {
                Error::NotFound(_) => Error::NotFound("there are no transactions".into()),
                other => other,
            })
    }

    /// Imports every `timestamp,kind,amount` line of the file through
    /// `add_transaction`. The whole import applies atomically: the first
    /// failing line restores the pre-call transactions, id counter, and
    /// balance, and the error names the 0-based line.
    pub fn load_from_file(&mut self, path: &Path, mode: LoadMode) -> Result<usize> {
        let records = read_ledger_records(path)?;

        let snapshot = (
            self.transactions.clone(),
            self.next_id,
            self.balance,
        );
        if mode == LoadMode::Replace {
            self.transactions.clear();
            self.next_id = 0;
            self.balance = Decimal::ZERO;
        }

        match self.apply_records(&records) {
            Ok(count) => Ok(count),
            Err(err) => {
                (self.transactions, self.next_id, self.balance) = snapshot;
                Err(err)
            }
        }
    }

    fn apply_records(&mut self, records: &[csv::StringRecord]) -> Result<usize> {
        for (line, record) in records.iter().enumerate() {
            let applied = validate::parse_value_fields(&record[0], &record[1], &record[2])
                .and_then(|(timestamp, kind, amount)| {
                    self.add_transaction(Transaction::new(timestamp, kind, amount))
                        .map_err(|err| err.to_string())
                });
            if let Err(detail) = applied {
                return Err(Error::Format(format!(
                    "no transactions were added, line {line}: {detail}"
                )));
            }
        }
        Ok(records.len())
    }

    /// Overwrites the file with one 3-field line per transaction, ascending
    /// id order. The target is validated and created the same way the file
    /// store's is.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if self.transactions.is_empty() {
            return Err(Error::NotFound("no transactions to save".into()));
        }

        validate::probe_parent_dir(path)?;
        validate::create_if_missing(path)?;
        validate::check_properties(path)?;

        let file = File::create(path)?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));
        for transaction in self.transactions.values() {
            writer.write_record([
                transaction.timestamp().format(TIMESTAMP_FORMAT).to_string(),
                transaction.kind().to_string(),
                transaction.amount().to_string(),
            ])?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Source-file checks for a bulk import: existence, readability, extension,
/// and the 3-field line shape. Value errors are caught during insertion.
fn read_ledger_records(path: &Path) -> Result<Vec<csv::StringRecord>> {
    if !path.exists() {
        return Err(Error::NotFound(format!(
            "transactions file does not exist: {}",
            path.display()
        )));
    }
    let file = File::open(path)
        .map_err(|_| Error::Format(format!("file is not readable: {}", path.display())))?;
    if path.extension().and_then(|ext| ext.to_str()) != Some("csv") {
        return Err(Error::Format(format!(
            "file must have a .csv extension: {}",
            path.display()
        )));
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(BufReader::new(file));

    let mut records = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = result.map_err(|err| Error::Format(format!("line {line}: {err}")))?;
        if record.len() != 3 {
            return Err(Error::Format(format!(
                "line {line}: expected 3 values, found {}",
                record.len()
            )));
        }
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests;
