use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::models::{Transaction, TIMESTAMP_FORMAT};

use super::{validate, TransactionStore};

/// CSV-file-backed store. Nothing is cached between operations: every
/// read/write re-validates the file and every insertion re-derives the next
/// free id from the file contents. Edits made between operations are
/// tolerated; edits that break the contract are not.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Binds the store to `path`, creating the file if missing. The parent
    /// directory must already exist.
    pub fn open(path: PathBuf) -> Result<Self> {
        validate::probe_parent_dir(&path)?;
        validate::create_if_missing(&path)?;
        validate::check_properties(&path)?;
        validate::read_records(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-runs the construction-time checks. The file passed them once, so
    /// any violation now means it was edited underneath the program, which
    /// is fatal for the operation.
    fn revalidate(&self) -> Result<Vec<(i64, Transaction)>> {
        validate::check_properties(&self.path)
            .and_then(|()| validate::read_records(&self.path))
            .map_err(|err| Error::Tampered(err.to_string()))
    }
}

impl TransactionStore for FileStore {
    fn add(&mut self, transaction: Transaction) -> Result<i64> {
        let records = self.revalidate()?;
        let id = records.iter().map(|(id, _)| *id).max().map_or(0, |max| max + 1);

        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::Writer::from_writer(BufWriter::new(file));
        writer.write_record([
            id.to_string(),
            transaction.timestamp().format(TIMESTAMP_FORMAT).to_string(),
            transaction.kind().to_string(),
            transaction.amount().to_string(),
        ])?;
        writer.flush()?;
        Ok(id)
    }

    fn get_by_id(&self, id: i64) -> Result<Transaction> {
        self.revalidate()?
            .into_iter()
            .find(|(record_id, _)| *record_id == id)
            .map(|(_, transaction)| transaction)
            .ok_or_else(|| Error::NotFound(format!("no transaction with id {id}")))
    }

    fn get_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<BTreeMap<i64, Transaction>> {
        let matches: BTreeMap<i64, Transaction> = self
            .revalidate()?
            .into_iter()
            .filter(|(_, txn)| start < txn.timestamp() && txn.timestamp() < end)
            .collect();

        if matches.is_empty() {
            return Err(Error::NotFound(format!(
                "no transactions between {start} and {end}"
            )));
        }
        Ok(matches)
    }
}
