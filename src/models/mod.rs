mod transaction;

pub use transaction::{Transaction, TransactionKind};
pub(crate) use transaction::TIMESTAMP_FORMAT;
