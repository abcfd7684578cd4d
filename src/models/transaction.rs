use chrono::{NaiveDateTime, SubsecRound};
use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// Timestamp layout used in CSV lines and display output (ISO 8601, second
/// precision).
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "INCOME",
            Self::Expense => "EXPENSE",
        }
    }

    /// Parses the CSV/menu literal. Unknown literals are rejected rather
    /// than mapped to a default.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "INCOME" => Ok(Self::Income),
            "EXPENSE" => Ok(Self::Expense),
            other => Err(Error::InvalidInput(format!(
                "unknown transaction kind: {other}"
            ))),
        }
    }
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An immutable income/expense record. Ids live in the stores, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    timestamp: NaiveDateTime,
    kind: TransactionKind,
    amount: Decimal,
}

impl Transaction {
    /// Truncates the timestamp to whole seconds and clamps a negative
    /// amount to zero.
    pub fn new(timestamp: NaiveDateTime, kind: TransactionKind, amount: Decimal) -> Self {
        Self {
            timestamp: timestamp.trunc_subsecs(0),
            kind,
            amount: amount.max(Decimal::ZERO),
        }
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }
}

impl std::fmt::Display for Transaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.kind,
            self.amount
        )
    }
}
