//! # scant
//!
//! Two small tools for getting paper into a computer:
//!
//! - **`scant`** drives a flatbed scanner. Type a file name, get a scan.
//! - **`scant-combine`** turns a pile of high-resolution scans into one
//!   compact PDF.
//!
//! Neither touches a pixel. Scanning is done by SANE's `scanimage`,
//! conversion by ImageMagick's `convert`; this crate builds their argument
//! lists, guards the filesystem (no overwrites, no missing inputs), and
//! reports what happened.
//!
//! ```text
//! $ scant -r 300 -s a4
//! scant usage: [option,...>]filename[.format]
//! > page-1
//! Wrote page-1.png
//! > 150,a5>receipt
//! Wrote receipt.png
//!
//! $ scant-combine -p scan -q l -o letter.pdf page-*.png
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`presets`] | Profile and quality tables → ImageMagick arguments |
//! | [`convert`] | Precondition checks, single conversion, `--test-all` comparison |
//! | [`geometry`] | Scan area geometry and the built-in paper sizes |
//! | [`options`] | Parser for interactive `[option,...>]filename` lines |
//! | [`scanner`] | Scanner defaults, filename normalization, `scanimage` invocation |
//! | [`session`] | Interactive read-scan loop with per-line error reporting |
//! | [`tool`] | [`tool::ToolRunner`] seam between argument lists and processes |
//! | [`naming`] | Output filename rules shared by both tools |
//! | [`config`] | Layered `scant.toml` loading and validation |
//! | [`output`] | Console text for both tools |
//! | [`logging`] | `tracing` subscriber setup |
//! | [`cli`] | clap arguments and the two program entry points |
//!
//! # Design Decisions
//!
//! ## External Tools Behind a Trait
//!
//! Every process launch goes through [`tool::ToolRunner`]. The binaries use
//! [`tool::SystemRunner`]; unit tests substitute a recording mock, so the
//! exact argument lists are tested without ImageMagick or a scanner. Tool
//! paths are configuration, not hard-coded names.
//!
//! ## Never Overwrite
//!
//! Both tools refuse to write over an existing file. Scans are created with
//! an exclusive open right before `scanimage` starts; conversions check
//! every target, including every `--test-all` variant, before the first
//! `convert` runs.
//!
//! ## Fixed Tables
//!
//! Profiles, qualities and paper sizes are enums with `match`-based tables.
//! Names are matched exactly; unknown names are errors, never fallbacks.

pub mod cli;
pub mod config;
pub mod convert;
pub mod geometry;
pub mod logging;
pub mod naming;
pub mod options;
pub mod output;
pub mod presets;
pub mod scanner;
pub mod session;
pub mod tool;
