//! `scant` entrypoint: interactive scanning into sequential image files.
//!
//! Parses arguments, sets up logging, and hands over to `scant::cli::scan`.

use clap::Parser;
use scant::cli::{self, ScanArgs};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = ScanArgs::parse();
    scant::logging::init(args.verbose);

    match cli::scan::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
