//! Interactive scanning loop.
//!
//! Reads one `[option,...>]filename` line at a time (see [`crate::options`])
//! and scans each into a new file. A bad line or a failed scan is reported
//! and the loop carries on with the next line; only the end of input or a
//! `quit`/`exit` line ends the session. Blank lines just prompt again.

use crate::options::parse_line;
use crate::output;
use crate::scanner::Scanner;
use crate::tool::ToolRunner;
use std::io::{self, BufRead, Write};
use tracing::debug;

/// Lines that end the session.
const QUIT_COMMANDS: [&str; 2] = ["quit", "exit"];

/// Counts reported when the session ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub scanned: usize,
    pub failed: usize,
}

/// Run the loop until end of input or a quit command.
///
/// Only I/O errors on `input`/`out` themselves abort the session. A line
/// that is not valid UTF-8 counts as a failed line.
pub fn run<R: ToolRunner>(
    scanner: &Scanner<'_, R>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<SessionSummary> {
    let mut summary = SessionSummary::default();
    writeln!(out, "{}", output::format_scan_usage())?;

    let mut buf = Vec::new();
    loop {
        write!(out, "{}", output::PROMPT)?;
        out.flush()?;

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            // keep the shell prompt off our last line
            writeln!(out)?;
            break;
        }
        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                summary.failed += 1;
                debug!("unreadable line: {e}");
                writeln!(out, "{}", output::format_session_error(&e))?;
                continue;
            }
        };
        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed.trim().is_empty() {
            continue;
        }
        if QUIT_COMMANDS.contains(&trimmed.trim()) {
            break;
        }

        let result = parse_line(trimmed)
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error>)
            .and_then(|request| scanner.scan(&request).map_err(Into::into));
        match result {
            Ok(path) => {
                summary.scanned += 1;
                writeln!(out, "{}", output::format_scan_done(&path))?;
            }
            Err(e) => {
                summary.failed += 1;
                debug!(line = %trimmed, "{e}");
                writeln!(out, "{}", output::format_session_error(e.as_ref()))?;
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::ScannerConfig;
    use crate::tool::tests::MockRunner;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::TempDir;

    fn run_lines(runner: &MockRunner, lines: &str) -> (SessionSummary, String) {
        let scanner = Scanner::new(runner, ScannerConfig::default());
        let mut input = Cursor::new(lines.as_bytes().to_vec());
        let mut out = Vec::new();
        let summary = run(&scanner, &mut input, &mut out).unwrap();
        (summary, String::from_utf8(out).unwrap())
    }

    fn p(tmp: &TempDir, name: &str) -> String {
        tmp.path().join(name).to_string_lossy().into_owned()
    }

    #[test]
    fn scans_each_line_until_eof() {
        let tmp = TempDir::new().unwrap();
        let runner = MockRunner::with_output(b"img");
        let input = format!("{}\n600,a5>{}\n", p(&tmp, "one"), p(&tmp, "two"));

        let (summary, text) = run_lines(&runner, &input);

        assert_eq!(summary, SessionSummary { scanned: 2, failed: 0 });
        assert!(tmp.path().join("one.png").exists());
        assert!(tmp.path().join("two.png").exists());
        assert!(text.starts_with("scant usage: [option,...>]filename[.format]\n> "));
        assert!(text.contains(&format!("Wrote {}", tmp.path().join("two.png").display())));

        let calls = runner.command_lines();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].contains(&"600".to_string()));
        assert!(calls[1].contains(&"148".to_string()));
    }

    #[test]
    fn bad_line_is_reported_and_loop_continues() {
        let tmp = TempDir::new().unwrap();
        let runner = MockRunner::new();
        let input = format!("bogus>{}\n{}\n", p(&tmp, "skip"), p(&tmp, "kept"));

        let (summary, text) = run_lines(&runner, &input);

        assert_eq!(summary, SessionSummary { scanned: 1, failed: 1 });
        assert!(text.contains("error: unknown option 'bogus'"));
        assert!(!tmp.path().join("skip.png").exists());
        assert!(tmp.path().join("kept.png").exists());
    }

    #[test]
    fn non_utf8_line_is_reported_and_loop_continues() {
        let tmp = TempDir::new().unwrap();
        let runner = MockRunner::new();
        let scanner = Scanner::new(&runner, ScannerConfig::default());
        let mut bytes = b"bad\xff\n".to_vec();
        bytes.extend_from_slice(format!("{}\n", p(&tmp, "good")).as_bytes());
        let mut out = Vec::new();

        let summary = run(&scanner, &mut Cursor::new(bytes), &mut out).unwrap();

        assert_eq!(summary, SessionSummary { scanned: 1, failed: 1 });
        assert!(tmp.path().join("good.png").exists());
        assert_eq!(runner.get_calls().len(), 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("error: invalid utf-8"));
    }

    #[test]
    fn existing_file_is_reported_and_loop_continues() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("taken.png"), b"old").unwrap();
        let runner = MockRunner::new();
        let input = format!("{}\n{}\n", p(&tmp, "taken"), p(&tmp, "fresh"));

        let (summary, text) = run_lines(&runner, &input);

        assert_eq!(summary, SessionSummary { scanned: 1, failed: 1 });
        assert!(text.contains("already exists"));
        assert_eq!(fs::read(tmp.path().join("taken.png")).unwrap(), b"old");
        assert_eq!(runner.get_calls().len(), 1);
    }

    #[test]
    fn tool_failure_does_not_end_session() {
        let tmp = TempDir::new().unwrap();
        let runner = MockRunner::failing_on(0);
        let input = format!("{}\n{}\n", p(&tmp, "a"), p(&tmp, "b"));

        let (summary, text) = run_lines(&runner, &input);

        assert_eq!(summary, SessionSummary { scanned: 1, failed: 1 });
        assert!(text.contains("exited with status 1"));
    }

    #[test]
    fn quit_ends_session_early() {
        let tmp = TempDir::new().unwrap();
        let runner = MockRunner::new();
        let input = format!("quit\n{}\n", p(&tmp, "never"));

        let (summary, _) = run_lines(&runner, &input);

        assert_eq!(summary, SessionSummary::default());
        assert!(runner.get_calls().is_empty());
        assert!(!Path::new(&p(&tmp, "never.png")).exists());
    }

    #[test]
    fn blank_lines_prompt_again() {
        let runner = MockRunner::new();
        let (summary, text) = run_lines(&runner, "\n   \nexit\n");

        assert_eq!(summary, SessionSummary::default());
        assert_eq!(text.matches("> ").count(), 3);
        assert!(runner.get_calls().is_empty());
    }

    #[test]
    fn empty_input_ends_immediately() {
        let runner = MockRunner::new();
        let (summary, text) = run_lines(&runner, "");
        assert_eq!(summary, SessionSummary::default());
        assert_eq!(text, "scant usage: [option,...>]filename[.format]\n> \n");
    }
}
