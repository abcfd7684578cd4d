mod error;
mod input;
mod ledger;
mod models;
mod run;
mod store;
mod tracker;

use anyhow::Result;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    match args.len() {
        1 => run::menu::tracker_menu(),
        2.. => run::cli::as_cli(&args),
        _ => {
            eprintln!("Usage: moneylog [command]");
            Ok(())
        }
    }
}
