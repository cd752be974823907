//! # pressure-rise
//!
//! Command-line front end for the trial extractor and rise-rate calculator.
//!
//! ## Usage
//!
//! ```bash
//! # List the trials of the workbook
//! pressure-rise summary --workbook Data/Data.xlsx
//!
//! # Rise rate of one trial between 10 s and 40 s
//! pressure-rise fit --trial "25 C-Trial 1" --from 10 --to 40
//!
//! # Dump every trial as JSON
//! pressure-rise export -o trials.json
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

use cli::{dispatch, init_logging, Cli};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    dispatch(cli)
}
