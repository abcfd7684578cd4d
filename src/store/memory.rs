use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::models::Transaction;

use super::TransactionStore;

/// Keyed mapping with monotonic id allocation. Ids start at 0 and are never
/// reused within a store instance.
#[derive(Debug, Default)]
pub struct MemoryStore {
    next_id: i64,
    transactions: BTreeMap<i64, Transaction>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TransactionStore for MemoryStore {
    fn add(&mut self, transaction: Transaction) -> Result<i64> {
        let id = self.next_id;
        self.transactions.insert(id, transaction);
        self.next_id += 1;
        Ok(id)
    }

    fn get_by_id(&self, id: i64) -> Result<Transaction> {
        self.transactions
            .get(&id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("no transaction with id {id}")))
    }

    fn get_between(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<BTreeMap<i64, Transaction>> {
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
}
