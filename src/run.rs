pub(crate) mod cli;
pub(crate) mod menu;

use std::io::{self, Write};
use std::path::PathBuf;

use crate::error::{Error, Result};

pub(crate) fn read_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// Default transactions file under the platform data directory; used when
/// the attach prompt is left empty.
pub(crate) fn default_data_file() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "moneylog", "Moneylog")
        .ok_or_else(|| Error::Creation("could not determine a data directory".into()))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir).map_err(|_| {
        Error::Creation(format!(
            "data directory cannot be created: {}",
            data_dir.display()
        ))
    })?;
    Ok(data_dir.join("transactions.csv"))
}
