use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::config::{self, ScanConfig};
use crate::geometry::PaperSize;
use crate::output;
use crate::scanner::{Scanner, ScannerConfig};
use crate::session::{self, SessionSummary};
use crate::tool::{SystemRunner, ToolRunner};

use super::errors::AppError;

#[derive(Parser, Debug)]
#[command(name = "scant", version, about = "Scan documents from scanner")]
#[command(long_about = "\
Scan documents from scanner

After startup, type one file name per line to scan a page into it. A name
can be prefixed with comma-separated options and '>' to override the
defaults for that page only:

  page-1              scan with the defaults into page-1.png
  600>photo           600 DPI
  150,a5,gray>receipt 150 DPI, A5 area, grayscale

Options: a number (resolution in DPI), a4, a5, letter, color, gray, lineart.
Existing files are never overwritten. End with Ctrl-D, 'quit' or 'exit'.")]
pub struct ScanArgs {
    /// Scanner device string
    #[arg(short, long)]
    pub device: Option<String>,

    /// Scan resolution in DPI (available: 75, 150, 300, 600, 1200, 2400)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub resolution: Option<u32>,

    /// Paper size (available: a4, a5, letter)
    #[arg(short = 's', long = "paper-size")]
    pub paper_size: Option<PaperSize>,

    /// Output file format (available: png, tiff, pnm)
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub format: Option<String>,

    /// Color mode passed to the scanner (e.g. Color, Gray, Lineart)
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub mode: Option<String>,

    /// Scanning tool to run instead of the configured one
    #[arg(long, value_name = "PATH")]
    pub tool: Option<PathBuf>,

    /// Config file (default: ./scant.toml if present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log every tool invocation to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Print a documented default config file and exit
    #[arg(long)]
    pub gen_config: bool,
}

/// Scanner defaults from the config section, with flags applied on top.
///
/// The output format is left to the caller, which sets it on the scanner.
pub fn scanner_config(args: &ScanArgs, section: &ScanConfig) -> ScannerConfig {
    let mut config = section.scanner_config();
    if let Some(tool) = &args.tool {
        config.tool = tool.clone();
    }
    if let Some(device) = &args.device {
        config.device = device.clone();
    }
    if let Some(resolution) = args.resolution {
        config.resolution = resolution;
    }
    if let Some(paper) = args.paper_size {
        config.size = Some(paper.geometry());
    }
    if let Some(mode) = &args.mode {
        config.mode = mode.clone();
    }
    config
}

/// Run `scant` with an explicit runner, input and console sink.
pub fn run_with<R: ToolRunner>(
    args: &ScanArgs,
    runner: &R,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<SessionSummary, AppError> {
    if args.gen_config {
        write!(out, "{}", config::stock_config_toml())?;
        return Ok(SessionSummary::default());
    }

    let config = config::load_for_cli(args.config.as_deref())?;
    let mut scanner = Scanner::new(runner, scanner_config(args, &config.scan));
    if let Some(format) = &args.format {
        scanner.set_format(format.as_str());
    }

    let summary = session::run(&scanner, input, out)?;
    if summary.scanned + summary.failed > 0 {
        writeln!(out, "{}", output::format_session_summary(&summary))?;
    }
    Ok(summary)
}

pub fn run(args: ScanArgs) -> Result<(), AppError> {
    let stdin = std::io::stdin();
    run_with(
        &args,
        &SystemRunner::new(),
        &mut stdin.lock(),
        &mut std::io::stdout().lock(),
    )?;
    Ok(())
}
