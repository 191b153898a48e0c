//! Parser for interactive scan lines.
//!
//! Each line names the file to scan, optionally preceded by overrides:
//!
//! ```text
//! [option,...>]filename[.format]
//! ```
//!
//! Everything before the first `>` is a comma-separated option list; each
//! option is one of
//!
//! - a number, the resolution in DPI (`150`, `600`);
//! - a paper size, `a4`, `a5` or `letter`;
//! - a color mode, `color`, `gray` or `lineart`.
//!
//! Later options of the same kind replace earlier ones. Examples:
//!
//! ```text
//! page-1              → page-1, no overrides
//! 600>photo           → photo at 600 DPI
//! 150,a5,gray>receipt → receipt at 150 DPI, A5, grayscale
//! ```

use crate::geometry::PaperSize;
use crate::scanner::ScanRequest;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionError {
    #[error("unknown option '{0}'")]
    UnknownOption(String),
    #[error("missing filename")]
    MissingFilename,
}

/// Inline mode keywords and the SANE mode names they stand for.
const MODES: [(&str, &str); 3] = [("color", "Color"), ("gray", "Gray"), ("lineart", "Lineart")];

/// Parse one interactive line into a [`ScanRequest`].
pub fn parse_line(line: &str) -> Result<ScanRequest, OptionError> {
    let line = line.trim_end_matches(['\n', '\r']);
    let (options, filename) = match line.split_once('>') {
        Some((options, filename)) => (Some(options), filename),
        None => (None, line),
    };
    if filename.is_empty() {
        return Err(OptionError::MissingFilename);
    }

    let mut request = ScanRequest::new(filename);
    for token in options.into_iter().flat_map(|o| o.split(',')) {
        apply_option(&mut request, token)?;
    }
    Ok(request)
}

fn apply_option(request: &mut ScanRequest, token: &str) -> Result<(), OptionError> {
    if !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()) {
        let dpi = token
            .parse::<u32>()
            .ok()
            .filter(|&dpi| dpi > 0)
            .ok_or_else(|| OptionError::UnknownOption(token.to_string()))?;
        request.resolution = Some(dpi);
    } else if let Some(paper) = PaperSize::from_name(token) {
        request.size = Some(paper.geometry());
    } else if let Some((_, mode)) = MODES.iter().find(|(keyword, _)| *keyword == token) {
        request.mode = Some(mode.to_string());
    } else {
        return Err(OptionError::UnknownOption(token.to_string()));
    }
    Ok(())
}
