//! Output filename conventions.
//!
//! Two rules, one per program:
//!
//! - Comparison runs write one PDF per preset pair and tag each file with
//!   the pair: `out.pdf` → `out (scan,l).pdf`.
//! - Scans always carry the configured format as their extension:
//!   `page` → `page.png`. The check is an exact, case-sensitive suffix
//!   match, so `page.PNG` becomes `page.PNG.png`.

use std::path::{Path, PathBuf};

/// Derive the output path of one comparison variant.
///
/// The tag is inserted between the file stem and the extension; the
/// directory is preserved:
/// - `out.pdf`, `scan`, `l` → `out (scan,l).pdf`
/// - `docs/tax.pdf`, `original`, `xs` → `docs/tax (original,xs).pdf`
pub fn variant_path(output: &Path, profile: &str, quality: &str) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match output.extension() {
        Some(ext) => format!("{stem} ({profile},{quality}).{}", ext.to_string_lossy()),
        None => format!("{stem} ({profile},{quality})"),
    };
    output.with_file_name(name)
}

/// Append `.{format}` unless `filename` already ends with it.
///
/// A bare `.png` counts as a hidden file with no extension and gets the
/// suffix appended, just like any other stem.
pub fn with_format_suffix(filename: &str, format: &str) -> String {
    let suffix = format!(".{format}");
    if filename.len() > suffix.len() && filename.ends_with(&suffix) {
        filename.to_string()
    } else {
        format!("{filename}{suffix}")
    }
}
