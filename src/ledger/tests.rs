#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::Error;
use crate::models::{Transaction, TransactionKind};

use super::*;

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn income(amount: Decimal) -> Transaction {
    Transaction::new(at(2024, 1, 1), TransactionKind::Income, amount)
}

fn expense(amount: Decimal) -> Transaction {
    Transaction::new(at(2024, 1, 1), TransactionKind::Expense, amount)
}

fn seeded_file(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// ── add_transaction ───────────────────────────────────────────

#[test]
fn test_balance_is_signed_sum_of_amounts() {
    let mut ledger = Ledger::new();
    ledger.add_transaction(income(dec!(100.00))).unwrap();
    ledger.add_transaction(expense(dec!(30.25))).unwrap();
    ledger.add_transaction(income(dec!(0.25))).unwrap();
    assert_eq!(ledger.balance(), dec!(70.00));
}

#[test]
fn test_ids_are_sequential() {
    let mut ledger = Ledger::new();
    assert_eq!(ledger.add_transaction(income(dec!(1))).unwrap(), 0);
    assert_eq!(ledger.add_transaction(income(dec!(1))).unwrap(), 1);
    assert_eq!(ledger.add_transaction(expense(dec!(1))).unwrap(), 2);
}

#[test]
fn test_expense_exceeding_balance_is_rejected() {
    let mut ledger = Ledger::new();
    let err = ledger.add_transaction(expense(dec!(10))).unwrap_err();
    assert!(matches!(err, Error::InsufficientFunds { .. }));
    assert_eq!(ledger.balance(), Decimal::ZERO);
    assert!(ledger.all_transactions().is_err());
}

#[test]
fn test_expense_equal_to_balance_is_allowed() {
    let mut ledger = Ledger::new();
    ledger.add_transaction(income(dec!(10))).unwrap();
    ledger.add_transaction(expense(dec!(10))).unwrap();
    assert_eq!(ledger.balance(), Decimal::ZERO);
}

#[test]
fn test_clamped_expense_costs_nothing() {
    let mut ledger = Ledger::new();
    // A negative amount is clamped to zero by the entity, so the
    // sufficiency check passes even at balance zero.
    ledger.add_transaction(expense(dec!(-5))).unwrap();
    assert_eq!(ledger.balance(), Decimal::ZERO);
}

// ── getters ───────────────────────────────────────────────────

#[test]
fn test_transaction_by_id() {
    let mut ledger = Ledger::new();
    let id = ledger.add_transaction(income(dec!(42))).unwrap();
    assert_eq!(ledger.transaction_by_id(id).unwrap(), income(dec!(42)));
    assert!(matches!(
        ledger.transaction_by_id(99).unwrap_err(),
        Error::NotFound(_)
    ));
}

#[test]
fn test_transactions_between_is_exclusive() {
    let mut ledger = Ledger::new();
    for day in [10, 15, 20] {
        ledger
            .add_transaction(Transaction::new(
                at(2024, 1, day),
                TransactionKind::Income,
                dec!(1),
            ))
            .unwrap();
    }
    let found = ledger
        .transactions_between(at(2024, 1, 10), at(2024, 1, 20))
        .unwrap();
    assert_eq!(found.keys().copied().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn test_transactions_between_rejects_inverted_range() {
    let ledger = Ledger::new();
    let err = ledger
        .transactions_between(at(2024, 2, 1), at(2024, 1, 1))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidInput(_)));
}

#[test]
fn test_all_transactions_empty_message() {
    let ledger = Ledger::new();
    assert_eq!(
        ledger.all_transactions().unwrap_err().to_string(),
        "there are no transactions"
    );
}

// ── load_from_file ────────────────────────────────────────────

#[test]
fn test_load_append_applies_every_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = seeded_file(
        &dir,
        "in.csv",
        "2024-01-01T00:00:00,INCOME,100.00\n\
         2024-01-02T00:00:00,EXPENSE,30.00\n\
         2024-01-03T12:30:00,INCOME,5.50\n",
    );

    let mut ledger = Ledger::new();
    assert_eq!(ledger.load_from_file(&path, LoadMode::Append).unwrap(), 3);
    assert_eq!(ledger.balance(), dec!(75.50));
    assert_eq!(ledger.all_transactions().unwrap().len(), 3);
}

#[test]
fn test_load_append_continues_ids_after_existing() {
    let dir = tempfile::tempdir().unwrap();
    let path = seeded_file(&dir, "in.csv", "2024-01-02T00:00:00,INCOME,1\n");

    let mut ledger = Ledger::new();
    ledger.add_transaction(income(dec!(1))).unwrap();
    ledger.load_from_file(&path, LoadMode::Append).unwrap();

    let all = ledger.all_transactions().unwrap();
    assert_eq!(all.keys().copied().collect::<Vec<_>>(), vec![0, 1]);
}

#[test]
fn test_load_replace_resets_set_ids_and_balance() {
    let dir = tempfile::tempdir().unwrap();
    let path = seeded_file(&dir, "in.csv", "2024-01-02T00:00:00,INCOME,7\n");

    let mut ledger = Ledger::new();
    ledger.add_transaction(income(dec!(100))).unwrap();
    ledger.add_transaction(income(dec!(100))).unwrap();

    assert_eq!(ledger.load_from_file(&path, LoadMode::Replace).unwrap(), 1);
    let all = ledger.all_transactions().unwrap();
    assert_eq!(all.keys().copied().collect::<Vec<_>>(), vec![0]);
    assert_eq!(ledger.balance(), dec!(7));
}

#[test]
fn test_load_failure_rolls_back_and_names_the_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = seeded_file(
        &dir,
        "in.csv",
        "2024-01-01T00:00:00,INCOME,10\n\
         2024-01-02T00:00:00,INCOME,10\n\
         2024-01-03T00:00:00,INCOME,10\n\
         2024-01-04T00:00:00,INCOME,10\n\
         2024-01-05T00:00:00,INCOME,banana\n",
    );

    let mut ledger = Ledger::new();
    ledger.add_transaction(income(dec!(50))).unwrap();
    let before = ledger.all_transactions().unwrap();

    let err = ledger.load_from_file(&path, LoadMode::Append).unwrap_err();
    assert!(matches!(err, Error::Format(_)));
    assert!(err.to_string().contains("line 4"), "{err}");

    assert_eq!(ledger.all_transactions().unwrap(), before);
    assert_eq!(ledger.balance(), dec!(50));
}

#[test]
fn test_load_insufficient_funds_mid_file_rolls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = seeded_file(
        &dir,
        "in.csv",
        "2024-01-01T00:00:00,INCOME,10\n\
         2024-01-02T00:00:00,EXPENSE,25\n",
    );

    let mut ledger = Ledger::new();
    let err = ledger.load_from_file(&path, LoadMode::Append).unwrap_err();
    assert!(err.to_string().contains("line 1"), "{err}");
    assert_eq!(ledger.balance(), Decimal::ZERO);
    assert!(ledger.all_transactions().is_err());
}

#[test]
fn test_load_replace_failure_restores_previous_state() {
    let dir = tempfile::tempdir().unwrap();
    let path = seeded_file(
        &dir,
        "in.csv",
        "2024-01-01T00:00:00,INCOME,10\n\
         not-a-date,INCOME,10\n",
    );

    let mut ledger = Ledger::new();
    ledger.add_transaction(income(dec!(99))).unwrap();
    let before = ledger.all_transactions().unwrap();

    assert!(ledger.load_from_file(&path, LoadMode::Replace).is_err());
    assert_eq!(ledger.all_transactions().unwrap(), before);
    assert_eq!(ledger.balance(), dec!(99));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut ledger = Ledger::new();
    let err = ledger
        .load_from_file(&dir.path().join("absent.csv"), LoadMode::Append)
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}

#[test]
fn test_load_rejects_wrong_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = seeded_file(&dir, "in.txt", "2024-01-01T00:00:00,INCOME,10\n");
    let mut ledger = Ledger::new();
    assert!(matches!(
        ledger.load_from_file(&path, LoadMode::Append).unwrap_err(),
        Error::Format(_)
    ));
}

#[test]
fn test_load_rejects_wrong_field_count() {
    let dir = tempfile::tempdir().unwrap();
    let path = seeded_file(
        &dir,
        "in.csv",
        "2024-01-01T00:00:00,INCOME,10\n2024-01-02T00:00:00,INCOME\n",
    );
    let mut ledger = Ledger::new();
    let err = ledger.load_from_file(&path, LoadMode::Append).unwrap_err();
    assert!(err.to_string().contains("line 1"), "{err}");
    // The shape check runs before anything is applied.
    assert!(ledger.all_transactions().is_err());
}

// ── save_to_file ──────────────────────────────────────────────

#[test]
fn test_save_empty_ledger_fails() {
    let dir = tempfile::tempdir().unwrap();
    let ledger = Ledger::new();
    let err = ledger.save_to_file(&dir.path().join("out.csv")).unwrap_err();
    assert_eq!(err.to_string(), "no transactions to save");
}

#[test]
fn test_save_overwrites_with_three_field_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = seeded_file(&dir, "out.csv", "stale contents\n");

    let mut ledger = Ledger::new();
    ledger.add_transaction(income(dec!(100.00))).unwrap();
    ledger
        .add_transaction(Transaction::new(
            at(2024, 2, 1),
            TransactionKind::Expense,
            dec!(30),
        ))
        .unwrap();

    ledger.save_to_file(&path).unwrap();
    let contents = std::fs::read_to_string(&path).unwrap();
    assert_eq!(
        contents,
        "2024-01-01T00:00:00,INCOME,100.00\n2024-02-01T00:00:00,EXPENSE,30\n"
    );
}

#[test]
fn test_save_rejects_wrong_extension() {
    let dir = tempfile::tempdir().unwrap();
    let mut ledger = Ledger::new();
    ledger.add_transaction(income(dec!(1))).unwrap();
    assert!(matches!(
        ledger.save_to_file(&dir.path().join("out.txt")).unwrap_err(),
        Error::Format(_)
    ));
}

#[test]
fn test_save_then_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");

    let mut ledger = Ledger::new();
    ledger.add_transaction(income(dec!(100.00))).unwrap();
    ledger.add_transaction(expense(dec!(12.75))).unwrap();
    ledger.save_to_file(&path).unwrap();

    let mut reloaded = Ledger::new();
    reloaded.load_from_file(&path, LoadMode::Replace).unwrap();
    assert_eq!(reloaded.balance(), ledger.balance());
    assert_eq!(
        reloaded.all_transactions().unwrap(),
        ledger.all_transactions().unwrap()
    );
}
