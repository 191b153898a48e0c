//! Console output for both programs.
//!
//! Every message the user sees on stdout is built here. Format functions are
//! pure (they return strings, no I/O) so the exact text is unit tested;
//! callers write the result to whatever sink they were given. Diagnostics
//! that are not part of the normal conversation go through `tracing` instead
//! and end up on stderr.
//!
//! # scant-combine
//!
//! ```text
//! Converting following files to out.pdf:
//!     page-1.png
//!     page-2.png
//! This may take a while...
//! Done.
//! ```
//!
//! With `--test-all`, one line per variant:
//!
//! ```text
//! Writing out (scan,xs).pdf... done.
//! Writing out (scan,s).pdf... done.
//! ```
//!
//! # scant
//!
//! ```text
//! scant usage: [option,...>]filename[.format]
//! > 150,a5>receipt
//! Wrote receipt.png
//! > bogus>x
//! error: unknown option 'bogus'
//! >
//! Scanned 1 page, 1 failed
//! ```

use crate::session::SessionSummary;
use std::path::{Path, PathBuf};

/// Prompt printed before every interactive line.
pub const PROMPT: &str = "> ";

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// scant-combine
// ============================================================================

/// Lines printed before a single conversion starts.
pub fn format_convert_header(output: &Path, inputs: &[PathBuf]) -> Vec<String> {
    let mut lines = Vec::with_capacity(inputs.len() + 2);
    lines.push(format!("Converting following files to {}:", output.display()));
    for input in inputs {
        lines.push(format!("\t{}", input.display()));
    }
    lines.push("This may take a while...".to_string());
    lines
}

pub fn format_convert_done() -> &'static str {
    "Done."
}

/// Start of a comparison line; deliberately without a trailing newline.
pub fn format_variant_start(path: &Path) -> String {
    format!("Writing {}... ", path.display())
}

pub fn format_variant_done() -> &'static str {
    "done."
}

// ============================================================================
// scant
// ============================================================================

pub fn format_scan_usage() -> &'static str {
    "scant usage: [option,...>]filename[.format]"
}

pub fn format_scan_done(path: &Path) -> String {
    format!("Wrote {}", path.display())
}

/// A contained error inside the interactive loop.
pub fn format_session_error(err: &dyn std::error::Error) -> String {
    format!("error: {err}")
}

pub fn format_session_summary(summary: &SessionSummary) -> String {
    let scanned = plural(summary.scanned, "page");
    if summary.failed == 0 {
        format!("Scanned {scanned}")
    } else {
        format!("Scanned {scanned}, {} failed", summary.failed)
    }
}
