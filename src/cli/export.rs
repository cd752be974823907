use anyhow::{Context, Result};
use log::info;
use std::io::Write;
use std::path::PathBuf;

use pressure_rise::export::{write_json, write_json_file};

use super::{load, Source};

/// Export the dataset as JSON to a file or stdout
pub fn run(source: Source, output: Option<PathBuf>, pretty: bool) -> Result<()> {
    let dataset = load(&source)?;

    match output {
        Some(path) => {
            write_json_file(&dataset, &path, pretty)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {} trials to {}", dataset.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write_json(&dataset, &mut handle, pretty)?;
            writeln!(handle)?;
        }
    }
    Ok(())
}
