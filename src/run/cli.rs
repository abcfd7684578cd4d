use anyhow::Result;

pub(crate) fn as_cli(args: &[String]) -> Result<()> {
    match args[1].as_str() {
        "balance" | "b" => super::menu::ledger_menu(),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("moneylog {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Moneylog — local-only income/expense tracker");
    println!();
    println!("Usage: moneylog [command]");
    println!();
    println!("Commands:");
    println!("  (none)          Interactive tracker session (memory + attached CSV file)");
    println!("  balance, b      Balance mode (running balance, atomic bulk import)");
    println!("  --help, -h      Show this help");
    println!("  --version, -V   Show version");
}
