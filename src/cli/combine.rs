use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

use crate::config::{self, ConvertConfig};
use crate::convert::Converter;
use crate::tool::{SystemRunner, ToolRunner};

use super::errors::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "scant-combine",
    version,
    about = "Convert high quality scans to lower quality PDFs"
)]
pub struct CombineArgs {
    /// Input files to be converted
    #[arg(value_name = "FILE", required_unless_present = "gen_config")]
    pub files: Vec<PathBuf>,

    /// Output PDF
    #[arg(short, long, default_value = "output.pdf")]
    pub output: PathBuf,

    /// Conversion profile [original, scan, high-contrast]
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Quality profile [original, xl, l, m, s, xs, xxs, xxxs]
    #[arg(short, long)]
    pub quality: Option<String>,

    /// Write one PDF per profile/quality combination instead (ignores -p and -q)
    #[arg(long = "test-all")]
    pub test_all: bool,

    /// Profiles combined by --test-all (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "NAMES", requires = "test_all")]
    pub profiles: Option<Vec<String>>,

    /// Qualities combined by --test-all (comma-separated)
    #[arg(long, value_delimiter = ',', value_name = "NAMES", requires = "test_all")]
    pub qualities: Option<Vec<String>>,

    /// Conversion tool to run instead of the configured one
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

/// Converter settings after folding flags over the config file.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertSettings {
    pub tool: PathBuf,
    pub profile: String,
    pub quality: String,
    pub compare_profiles: Vec<String>,
    pub compare_qualities: Vec<String>,
}

impl ConvertSettings {
    pub fn resolve(args: &CombineArgs, config: &ConvertConfig) -> Self {
        Self {
            tool: args
                .tool
                .clone()
                .unwrap_or_else(|| PathBuf::from(&config.tool)),
            profile: args.profile.clone().unwrap_or_else(|| config.profile.clone()),
            quality: args.quality.clone().unwrap_or_else(|| config.quality.clone()),
            compare_profiles: args
                .profiles
                .clone()
                .unwrap_or_else(|| config.compare_profiles.clone()),
            compare_qualities: args
                .qualities
                .clone()
                .unwrap_or_else(|| config.compare_qualities.clone()),
        }
    }
}

/// Run `scant-combine` with an explicit runner and console sink.
pub fn run_with<R: ToolRunner>(
    args: &CombineArgs,
    runner: &R,
    out: &mut impl Write,
) -> Result<(), AppError> {
    if args.gen_config {
        write!(out, "{}", config::stock_config_toml())?;
        return Ok(());
    }

    let config = config::load_for_cli(args.config.as_deref())?;
    let settings = ConvertSettings::resolve(args, &config.convert);
    let converter = Converter::new(runner, &settings.tool);

    if args.test_all {
        converter.compare(
            &args.files,
            &args.output,
            &settings.compare_profiles,
            &settings.compare_qualities,
            out,
        )?;
    } else {
        converter.convert(
            &args.files,
            &args.output,
            &settings.profile,
            &settings.quality,
            out,
        )?;
    }
    Ok(())
}

pub fn run(args: CombineArgs) -> Result<(), AppError> {
    run_with(&args, &SystemRunner::new(), &mut std::io::stdout().lock())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::ConvertError;
    use crate::tool::tests::MockRunner;
    use std::fs;
    use tempfile::TempDir;

    fn parse(argv: &[&str]) -> CombineArgs {
        CombineArgs::try_parse_from(std::iter::once("scant-combine").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn defaults() {
        let args = parse(&["a.png"]);
        assert_eq!(args.files, vec![PathBuf::from("a.png")]);
        assert_eq!(args.output, PathBuf::from("output.pdf"));
        assert!(args.profile.is_none());
        assert!(!args.test_all);

        let settings = ConvertSettings::resolve(&args, &ConvertConfig::default());
        assert_eq!(settings.tool, PathBuf::from("convert"));
        assert_eq!(settings.profile, "scan");
        assert_eq!(settings.quality, "l");
    }

    #[test]
    fn short_flags() {
        let args = parse(&["-o", "x.pdf", "-p", "original", "-q", "xs", "a", "b"]);
        assert_eq!(args.output, PathBuf::from("x.pdf"));
        assert_eq!(args.profile.as_deref(), Some("original"));
        assert_eq!(args.quality.as_deref(), Some("xs"));
        assert_eq!(args.files.len(), 2);
    }

    #[test]
    fn files_are_required() {
        assert!(CombineArgs::try_parse_from(["scant-combine"]).is_err());
        assert!(CombineArgs::try_parse_from(["scant-combine", "--gen-config"]).is_ok());
    }

    #[test]
    fn compare_lists_need_test_all() {
        assert!(
            CombineArgs::try_parse_from(["scant-combine", "--profiles", "scan", "a.png"]).is_err()
        );
        let args = parse(&["--test-all", "--qualities", "s,m", "a.png"]);
        assert_eq!(args.qualities, Some(vec!["s".to_string(), "m".to_string()]));
    }

    #[test]
    fn flags_override_config() {
        let args = parse(&["--tool", "magick", "-q", "m", "a.png"]);
        let config = ConvertConfig {
            quality: "s".into(),
            profile: "original".into(),
            ..ConvertConfig::default()
        };
        let settings = ConvertSettings::resolve(&args, &config);
        assert_eq!(settings.tool, PathBuf::from("magick"));
        assert_eq!(settings.quality, "m");
        assert_eq!(settings.profile, "original");
    }

    #[test]
    fn gen_config_prints_stock_file() {
        let args = parse(&["--gen-config"]);
        let runner = MockRunner::new();
        let mut out = Vec::new();
        run_with(&args, &runner, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), config::stock_config_toml());
        assert!(runner.get_calls().is_empty());
    }

    #[test]
    fn run_uses_config_file_defaults() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("in.png");
        fs::write(&input, b"x").unwrap();
        let cfg = tmp.path().join("scant.toml");
        fs::write(&cfg, "[convert]\ntool = \"/usr/local/bin/convert\"\nquality = \"xxs\"\n").unwrap();
        let output = tmp.path().join("out.pdf");

        let args = parse(&[
            "--config",
            cfg.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            input.to_str().unwrap(),
        ]);
        let runner = MockRunner::new();
        run_with(&args, &runner, &mut Vec::new()).unwrap();

        let line = &runner.command_lines()[0];
        assert_eq!(line[0], "/usr/local/bin/convert");
        assert!(line.contains(&"45x45".to_string()));
    }

    #[test]
    fn run_test_all_uses_compare_lists() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("in.png");
        fs::write(&input, b"x").unwrap();
        let cfg = tmp.path().join("scant.toml");
        fs::write(&cfg, "").unwrap();
        let output = tmp.path().join("out.pdf");

        let args = parse(&[
            "--config",
            cfg.to_str().unwrap(),
            "--test-all",
            "-o",
            output.to_str().unwrap(),
            input.to_str().unwrap(),
        ]);
        let runner = MockRunner::new();
        run_with(&args, &runner, &mut Vec::new()).unwrap();

        // stock lists: 2 profiles x 4 qualities
        assert_eq!(runner.get_calls().len(), 8);
    }

    #[test]
    fn run_test_all_rejects_empty_compare_list() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("in.png");
        fs::write(&input, b"x").unwrap();
        let cfg = tmp.path().join("scant.toml");
        fs::write(&cfg, "[convert]\ncompare_profiles = []\n").unwrap();
        let output = tmp.path().join("out.pdf");

        let args = parse(&[
            "--config",
            cfg.to_str().unwrap(),
            "--test-all",
            "-o",
            output.to_str().unwrap(),
            input.to_str().unwrap(),
        ]);
        let runner = MockRunner::new();
        let mut out = Vec::new();
        let err = run_with(&args, &runner, &mut out).unwrap_err();

        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(err.exit_code(), 1);
        assert!(runner.get_calls().is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn run_reports_tool_failure_with_exit_code_2() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("in.png");
        fs::write(&input, b"x").unwrap();
        let cfg = tmp.path().join("scant.toml");
        fs::write(&cfg, "").unwrap();
        let output = tmp.path().join("out.pdf");

        let args = parse(&[
            "--config",
            cfg.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            input.to_str().unwrap(),
        ]);
        let err = run_with(&args, &MockRunner::failing_on(0), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, AppError::Convert(ConvertError::Tool(_))));
        assert_eq!(err.exit_code(), 2);
    }
}
