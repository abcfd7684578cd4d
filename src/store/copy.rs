use chrono::NaiveDateTime;

use crate::error::Result;

use super::TransactionStore;

/// Copies one transaction from `source` into `target`, returning the id it
/// received in `target`.
pub fn copy_by_id<S, T>(id: i64, source: &S, target: &mut T) -> Result<i64>
where
    S: TransactionStore + ?Sized,
    T: TransactionStore + ?Sized,
{
    let transaction = source.get_by_id(id)?;
    target.add(transaction)
}

/// Copies every transaction in the exclusive range, in ascending source-id
/// order. Returns how many were copied.
pub fn copy_between<S, T>(
    start: NaiveDateTime,
    end: NaiveDateTime,
    source: &S,
    target: &mut T,
) -> Result<usize>
where
    S: TransactionStore + ?Sized,
    T: TransactionStore + ?Sized,
{
    let transactions = source.get_between(start, end)?;
    let count = transactions.len();
    for transaction in transactions.into_values() {
        target.add(transaction)?;
    }
    Ok(count)
}

/// The unbounded-range copy, with the store-wide empty message.
pub fn copy_all<S, T>(source: &S, target: &mut T) -> Result<usize>
where
    S: TransactionStore + ?Sized,
    T: TransactionStore + ?Sized,
{
    let transactions = source.get_all()?;
    let count = transactions.len();
    for transaction in transactions.into_values() {
        target.add(transaction)?;
    }
    Ok(count)
}
