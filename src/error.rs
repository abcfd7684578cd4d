use rust_decimal::Decimal;
use thiserror::Error;

/// Every failure a core operation can surface. The menu layer displays
/// recoverable kinds and keeps running; fatal kinds end the program.
#[derive(Debug, Error)]
pub(crate) enum Error {
    /// No matching record(s) for an id, a date range, or the whole store.
    #[error("{0}")]
    NotFound(String),

    /// File content or structure violates the CSV contract.
    #[error("transactions file format error: {0}")]
    Format(String),

    /// The target file cannot be created (permissions or missing parent).
    #[error("transactions file cannot be created: {0}")]
    Creation(String),

    /// A file operation was requested with no file attached.
    #[error("no transactions file is attached")]
    NotAttached,

    /// An expense would drive the balance negative.
    #[error("insufficient funds: balance {balance} cannot cover an expense of {amount}")]
    InsufficientFunds { balance: Decimal, amount: Decimal },

    /// Unparsable id/date/amount/kind/path supplied by a caller.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Re-validation failed on a file that passed validation earlier: it was
    /// edited outside the program mid-session. Fatal for the operation.
    #[error("the transactions file was modified outside the program: {0}")]
    Tampered(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// Fatal errors indicate external interference after validation passed;
    /// the interactive loop propagates them instead of printing and retrying.
    pub(crate) fn is_fatal(&self) -> bool {
        matches!(self, Self::Tampered(_) | Self::Io(_) | Self::Csv(_))
    }
}

pub(crate) type Result<T> = std::result::Result<T, Error>;
