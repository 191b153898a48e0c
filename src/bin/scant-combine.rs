//! `scant-combine` entrypoint: combine scans into one compact PDF.
//!
//! Parses arguments, sets up logging, and hands over to `scant::cli::combine`.

use clap::Parser;
use scant::cli::{self, CombineArgs};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CombineArgs::parse();
    scant::logging::init(args.verbose);

    match cli::combine::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
