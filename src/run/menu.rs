//! Interactive text menus. Pure plumbing: read a command, call the core,
//! print the result. Recoverable errors are displayed and the loop keeps
//! going; fatal ones propagate and end the program.

use std::collections::BTreeMap;

use anyhow::Result;

use crate::input;
use crate::ledger::{Ledger, LoadMode};
use crate::models::{Transaction, TransactionKind};
use crate::tracker::Tracker;

use super::{default_data_file, read_line};

/// Prints a recoverable error and moves on; fatal ones bubble up.
fn report(outcome: crate::error::Result<()>) -> Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(err) if err.is_fatal() => Err(err.into()),
        Err(err) => {
            println!("{err}");
            Ok(())
        }
    }
}

fn print_transactions(transactions: &BTreeMap<i64, Transaction>) {
    for (id, transaction) in transactions {
        println!("{id} {transaction}");
    }
}

// ── Tracker session ───────────────────────────────────────────

pub(crate) fn tracker_menu() -> Result<()> {
    let mut tracker = Tracker::new();
    loop {
        println!("Main menu commands:");
        println!("  1 - Add transaction");
        println!("  2 - Print transactions");
        println!("  3 - Attach file");
        if tracker.is_file_attached() {
            println!("  4 - Detach file");
            println!("  5 - Save transactions to file");
            println!("  6 - Load transactions from file");
        }
        println!("  0 - Quit");
        let command = read_line("> ")?;
        println!();

        match command.as_str() {
            "1" => report(add_to_tracker(&mut tracker))?,
            "2" => print_menu(&tracker)?,
            "3" => report(attach_file(&mut tracker))?,
            "4" if tracker.is_file_attached() => {
                if let Some(path) = tracker.attached_file() {
                    println!("Detaching {}.", path.display());
                }
                tracker.detach_file();
            }
            "5" if tracker.is_file_attached() => save_menu(&mut tracker)?,
            "6" if tracker.is_file_attached() => load_menu(&mut tracker)?,
            "0" => break,
            _ => {}
        }
        println!();
    }
    Ok(())
}

fn add_to_tracker(tracker: &mut Tracker) -> crate::error::Result<()> {
    let timestamp = input::parse_date_time(&read_line(
        "Enter the transaction date (YYYY-MM-DD or YYYY-MM-DD HH:MM:SS): ",
    )?)?;
    let kind =
        TransactionKind::parse(&read_line("Enter the transaction kind (INCOME/EXPENSE): ")?
            .to_uppercase())?;
    let amount = input::parse_amount(&read_line("Enter the amount: ")?)?;

    let id = tracker.add_transaction(timestamp, kind, amount)?;
    println!("Added transaction {id}.");
    Ok(())
}

fn attach_file(tracker: &mut Tracker) -> crate::error::Result<()> {
    println!("The file must have a .csv extension and be readable and writable.");
    println!(
        "Lines are formatted as id,timestamp,kind,amount. The file is created if \
         missing, but its directory must already exist."
    );
    let entered = read_line("Enter the absolute file path (empty for the default): ")?;
    let path = if entered.is_empty() {
        let path = default_data_file()?;
        println!("Using {}", path.display());
        path
    } else {
        input::parse_path(&entered)?
    };

    tracker.attach_file(path)?;
    println!("File attached.");
    Ok(())
}

fn print_menu(tracker: &Tracker) -> Result<()> {
    loop {
        println!("Print menu commands:");
        println!("  1 - Print transaction by id");
        println!("  2 - Print transactions between dates");
        println!("  3 - Print all transactions");
        println!("  0 - Back");
        let command = read_line("> ")?;
        println!();

        match command.as_str() {
            "1" => report(print_by_id(tracker))?,
            "2" => report(print_between(tracker))?,
            "3" => report(print_all(tracker))?,
            "0" => break,
            _ => {}
        }
        println!();
    }
    Ok(())
}

fn print_by_id(tracker: &Tracker) -> crate::error::Result<()> {
    let id = input::parse_id(&read_line("Enter the transaction id: ")?)?;
    let transaction = tracker.transaction_by_id(id)?;
    println!("{id} {transaction}");
    Ok(())
}

fn print_between(tracker: &Tracker) -> crate::error::Result<()> {
    let start = input::parse_date_time(&read_line("Enter the start date: ")?)?;
    let end = input::parse_date_time(&read_line("Enter the end date: ")?)?;
    print_transactions(&tracker.transactions_between(start, end)?);
    Ok(())
}

fn print_all(tracker: &Tracker) -> crate::error::Result<()> {
    print_transactions(&tracker.all_transactions()?);
    Ok(())
}

fn save_menu(tracker: &mut Tracker) -> Result<()> {
    loop {
        println!("Save menu commands:");
        println!("  1 - Save transaction by id to file");
        println!("  2 - Save transactions between dates to file");
        println!("  3 - Save all transactions to file");
        println!("  0 - Back");
        let command = read_line("> ")?;
        println!();

        match command.as_str() {
            "1" => report(save_by_id(tracker))?,
            "2" => report(save_between(tracker))?,
            "3" => report(save_all(tracker))?,
            "0" => break,
            _ => {}
        }
        println!();
    }
    Ok(())
}

fn save_by_id(tracker: &mut Tracker) -> crate::error::Result<()> {
    let id = input::parse_id(&read_line("Enter the transaction id: ")?)?;
    tracker.save_by_id(id)?;
    println!("Saved transaction {id} to file.");
    Ok(())
}

fn save_between(tracker: &mut Tracker) -> crate::error::Result<()> {
    let start = input::parse_date_time(&read_line("Enter the start date: ")?)?;
    let end = input::parse_date_time(&read_line("Enter the end date: ")?)?;
    let count = tracker.save_between(start, end)?;
    println!("Saved {count} transaction(s) to file.");
    Ok(())
}

fn save_all(tracker: &mut Tracker) -> crate::error::Result<()> {
    let count = tracker.save_all()?;
    println!("Saved {count} transaction(s) to file.");
    Ok(())
}

fn load_menu(tracker: &mut Tracker) -> Result<()> {
    loop {
        println!("Load menu commands:");
        println!("  1 - Load transaction by id from file");
        println!("  2 - Load transactions between dates from file");
        println!("  3 - Load all transactions from file");
        println!("  0 - Back");
        let command = read_line("> ")?;
        println!();

        match command.as_str() {
            "1" => report(load_by_id(tracker))?,
            "2" => report(load_between(tracker))?,
            "3" => report(load_all(tracker))?,
            "0" => break,
            _ => {}
        }
        println!();
    }
    Ok(())
}

fn load_by_id(tracker: &mut Tracker) -> crate::error::Result<()> {
    let id = input::parse_id(&read_line("Enter the transaction id: ")?)?;
    tracker.load_by_id(id)?;
    println!("Loaded transaction {id} from file.");
    Ok(())
}

fn load_between(tracker: &mut Tracker) -> crate::error::Result<()> {
    let start = input::parse_date_time(&read_line("Enter the start date: ")?)?;
    let end = input::parse_date_time(&read_line("Enter the end date: ")?)?;
    let count = tracker.load_between(start, end)?;
    println!("Loaded {count} transaction(s) from file.");
    Ok(())
}

fn load_all(tracker: &mut Tracker) -> crate::error::Result<()> {
    let count = tracker.load_all()?;
    println!("Loaded {count} transaction(s) from file.");
    Ok(())
}

// ── Balance mode ──────────────────────────────────────────────

pub(crate) fn ledger_menu() -> Result<()> {
    let mut ledger = Ledger::new();
    loop {
        println!("Balance mode commands:");
        println!("  1 - Add transaction");
        println!("  2 - Print all transactions");
        println!("  3 - Print transaction by id");
        println!("  4 - Print transactions between dates");
        println!("  5 - Print balance");
        println!("  6 - Add transactions from file");
        println!("  7 - Replace transactions with file contents");
        println!("  8 - Save transactions to file");
        println!("  q - Quit");
        let command = read_line("> ")?;
        println!();

        match command.as_str() {
            "1" => report(add_to_ledger(&mut ledger))?,
            "2" => report(ledger.all_transactions().map(|all| print_transactions(&all)))?,
            "3" => report(ledger_print_by_id(&ledger))?,
            "4" => report(ledger_print_between(&ledger))?,
            "5" => println!("Current balance: {}", ledger.balance()),
            "6" => report(ledger_load(&mut ledger, LoadMode::Append))?,
            "7" => report(ledger_load(&mut ledger, LoadMode::Replace))?,
            "8" => report(ledger_save(&ledger))?,
            "q" => break,
            _ => {}
        }
        println!();
    }
    Ok(())
}

fn add_to_ledger(ledger: &mut Ledger) -> crate::error::Result<()> {
    let kind =
        TransactionKind::parse(&read_line("Enter the transaction kind (INCOME/EXPENSE): ")?
            .to_uppercase())?;
    let amount = input::parse_amount(&read_line("Enter the amount: ")?)?;

    let timestamp = chrono::Local::now().naive_local();
    let id = ledger.add_transaction(Transaction::new(timestamp, kind, amount))?;
    println!("Added transaction {id}. Balance is now {}.", ledger.balance());
    Ok(())
}

fn ledger_print_by_id(ledger: &Ledger) -> crate::error::Result<()> {
    let id = input::parse_id(&read_line("Enter the transaction id: ")?)?;
    let transaction = ledger.transaction_by_id(id)?;
    println!("{id} {transaction}");
    Ok(())
}

fn ledger_print_between(ledger: &Ledger) -> crate::error::Result<()> {
    let start = input::parse_date_time(&read_line("Enter the start date: ")?)?;
    let end = input::parse_date_time(&read_line("Enter the end date: ")?)?;
    print_transactions(&ledger.transactions_between(start, end)?);
    Ok(())
}

fn ledger_load(ledger: &mut Ledger, mode: LoadMode) -> crate::error::Result<()> {
    let path = input::parse_path(&read_line("Enter the absolute file path: ")?)?;
    let count = ledger.load_from_file(&path, mode)?;
    println!(
        "Loaded {count} transaction(s). Balance is now {}.",
        ledger.balance()
    );
    Ok(())
}

fn ledger_save(ledger: &Ledger) -> crate::error::Result<()> {
    let path = input::parse_path(&read_line("Enter the absolute file path: ")?)?;
    ledger.save_to_file(&path)?;
    println!("Saved to {}.", path.display());
    Ok(())
}
