//! Command-line layer for both programs.
//!
//! `combine` backs `scant-combine` and `scan` backs `scant`. Each defines its
//! clap arguments, folds them with `scant.toml` into the settings the library
//! works with, and runs. The binaries in `src/bin/` only parse, set up
//! logging, and translate [`AppError`] into an exit status.
pub mod combine;
pub mod errors;
pub mod scan;

pub use combine::CombineArgs;
pub use errors::AppError;
pub use scan::ScanArgs;
