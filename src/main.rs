// taxcheck: Find taxonomy IDs in classifier output that are missing from a taxonomy tree.
//
// Copyright 2025 Tommi Mäklin [tommi@maklin.fi].
//
// Copyrights in this project are retained by contributors. No copyright assignment
// is required to contribute to this project.
//
// Except as otherwise noted (below and/or in individual files), this
// project is licensed under the Apache License, Version 2.0
// <LICENSE-APACHE> or <http://www.apache.org/licenses/LICENSE-2.0> or
// the MIT license, <LICENSE-MIT> or <http://opensource.org/licenses/MIT>,
// at your option.
//
use std::io::BufWriter;
use std::io::Write;
use std::process::ExitCode;

use clap::Parser;

mod cli;

/// Initializes the logger with verbosity given in `log_max_level`.
fn init_log(log_max_level: usize) -> Result<(), log::SetLoggerError> {
    stderrlog::new()
    .module(module_path!())
    .quiet(false)
    .verbosity(log_max_level)
    .timestamp(stderrlog::Timestamp::Off)
    .init()
}

fn run(cli: &cli::Cli) -> taxcheck::Result<()> {
    // Nothing is printed until both inputs have been read.
    let missing = taxcheck::find_missing_from_files(&cli.tree, &cli.centrifuge)?;

    let stdout = std::io::stdout();
    let mut conn_out = BufWriter::new(stdout.lock());
    taxcheck::printer::write_missing(&missing, &mut conn_out)?;
    conn_out.flush()?;

    Ok(())
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    if let Err(e) = init_log(if cli.verbose { 3 } else { 1 }) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        },
    }
}
