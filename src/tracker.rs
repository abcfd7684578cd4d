use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionKind};
use crate::store::{self, FileStore, MemoryStore, TransactionStore};

/// The session object the menu drives: a runtime store plus an optionally
/// attached transactions file. Save and load are copier moves between the
/// two; every file-facing operation requires an attached file.
#[derive(Debug, Default)]
pub struct Tracker {
    runtime: MemoryStore,
    file: Option<FileStore>,
}

impl Tracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_file_attached(&self) -> bool {
        self.file.is_some()
    }

    pub fn attached_file(&self) -> Option<&Path> {
        self.file.as_ref().map(FileStore::path)
    }

    pub fn add_transaction(
        &mut self,
        timestamp: NaiveDateTime,
        kind: TransactionKind,
        amount: Decimal,
    ) -> Result<i64> {
        self.runtime.add(Transaction::new(timestamp, kind, amount))
    }

    pub fn transaction_by_id(&self, id: i64) -> Result<Transaction> {
        self.runtime.get_by_id(id)
    }

    pub fn transactions_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<BTreeMap<i64, Transaction>> {
        self.runtime.get_between(start, end)
    }

    pub fn all_transactions(&self) -> Result<BTreeMap<i64, Transaction>> {
        self.runtime.get_all()
    }

    /// Binds a transactions file, running the full validation chain.
    pub fn attach_file(&mut self, path: PathBuf) -> Result<()> {
        self.file = Some(FileStore::open(path)?);
        Ok(())
    }

    pub fn detach_file(&mut self) {
        self.file = None;
    }

    pub fn save_by_id(&mut self, id: i64) -> Result<()> {
        let Some(file) = self.file.as_mut() else {
            return Err(Error::NotAttached);
        };
        store::copy_by_id(id, &self.runtime, file)?;
        Ok(())
    }

    pub fn save_between(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> Result<usize> {
        let Some(file) = self.file.as_mut() else {
            return Err(Error::NotAttached);
        };
        store::copy_between(start, end, &self.runtime, file)
    }

    pub fn save_all(&mut self) -> Result<usize> {
        let Some(file) = self.file.as_mut() else {
            return Err(Error::NotAttached);
        };
        store::copy_all(&self.runtime, file)
    }

    pub fn load_by_id(&mut self, id: i64) -> Result<()> {
        let Some(file) = self.file.as_ref() else {
            return Err(Error::NotAttached);
        };
        store::copy_by_id(id, file, &mut self.runtime)?;
        Ok(())
    }

    pub fn load_between(&mut self, start: NaiveDateTime, end: NaiveDateTime) -> Result<usize> {
        let Some(file) = self.file.as_ref() else {
            return Err(Error::NotAttached);
        };
        store::copy_between(start, end, file, &mut self.runtime)
    }

    pub fn load_all(&mut self) -> Result<usize> {
        let Some(file) = self.file.as_ref() else {
            return Err(Error::NotAttached);
        };
        store::copy_all(file, &mut self.runtime)
    }
}

#[cfg(test)]
#[path = "tracker_tests.rs"]
mod tests;
