mod copy;
mod file;
mod memory;
pub(crate) mod validate;

pub use copy::{copy_all, copy_between, copy_by_id};
pub use file::FileStore;
pub use memory::MemoryStore;

use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::models::Transaction;

/// Capability contract shared by the in-memory and file-backed stores.
pub trait TransactionStore {
    /// Stores the transaction under the next free id and returns that id.
    fn add(&mut self, transaction: Transaction) -> Result<i64>;

    fn get_by_id(&self, id: i64) -> Result<Transaction>;

    /// Transactions with `start < timestamp < end`, exclusive on both ends.
    /// Fails with NotFound when nothing matches.
    fn get_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<BTreeMap<i64, Transaction>>;

    /// The unbounded-range query, with the empty-range error remapped to a
    /// store-wide message.
    fn get_all(&self) -> Result<BTreeMap<i64, Transaction>> {
        self.get_between(NaiveDateTime::MIN, NaiveDateTime::MAX)
            .map_err(|err| match err {
                Error::NotFound(_) => Error::NotFound("there are no transactions".into()),
                other => other,
            })
    }
}
