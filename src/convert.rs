//! Batch conversion of scans into a single PDF.
//!
//! `scant-combine` hands the actual work to ImageMagick: every conversion is
//! one `convert` invocation of the form
//!
//! ```text
//! convert INPUT... PROFILE_ARGS... QUALITY_ARGS... OUTPUT.pdf
//! ```
//!
//! This module owns everything around that call: checking the output name,
//! refusing to overwrite, checking that inputs exist, resolving presets and
//! reporting progress. Two operations are offered:
//!
//! - [`Converter::convert`]: one profile, one quality, one PDF.
//! - [`Converter::compare`]: every profile × quality pair, one tagged PDF
//!   per pair (`out (scan,l).pdf`), to pick a setting by eye.
//!
//! All precondition checks run before the first invocation. A failing tool
//! aborts the operation; nothing is retried.

use crate::naming::variant_path;
use crate::output;
use crate::presets::{self, Preset, PresetError};
use crate::tool::{Invocation, ToolError, ToolRunner};
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Extension every output must carry.
pub const OUTPUT_EXTENSION: &str = "pdf";

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("output file {} is not a PDF", .0.display())]
    InvalidOutput(PathBuf),
    #[error("output file {} already exists", .0.display())]
    OutputExists(PathBuf),
    #[error("input file {} does not exist", .0.display())]
    MissingInput(PathBuf),
    #[error("no input files given")]
    NoInputs,
    #[error("comparison needs at least one profile and one quality")]
    NoVariants,
    #[error(transparent)]
    Preset(#[from] PresetError),
    #[error(transparent)]
    Tool(#[from] ToolError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConvertError {
    /// Process exit code: 2 when the external tool failed, 1 otherwise.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::Tool(_) => 2,
            _ => 1,
        }
    }
}

/// Fail unless `output` ends in `.pdf` (exact, case-sensitive).
pub fn validate_output(output: &Path) -> Result<(), ConvertError> {
    if output.extension() == Some(OsStr::new(OUTPUT_EXTENSION)) {
        Ok(())
    } else {
        Err(ConvertError::InvalidOutput(output.to_path_buf()))
    }
}

/// Fail if anything, including a dangling symlink, occupies `path`.
pub fn ensure_absent(path: &Path) -> Result<(), ConvertError> {
    if path.symlink_metadata().is_ok() {
        Err(ConvertError::OutputExists(path.to_path_buf()))
    } else {
        Ok(())
    }
}

/// Fail on the first input, in the given order, that does not exist.
pub fn validate_inputs(inputs: &[PathBuf]) -> Result<(), ConvertError> {
    if inputs.is_empty() {
        return Err(ConvertError::NoInputs);
    }
    match inputs.iter().find(|p| !p.exists()) {
        Some(missing) => Err(ConvertError::MissingInput(missing.clone())),
        None => Ok(()),
    }
}

/// Drives the conversion tool through a [`ToolRunner`].
pub struct Converter<'a, R: ToolRunner> {
    runner: &'a R,
    tool: PathBuf,
}

impl<'a, R: ToolRunner> Converter<'a, R> {
    pub fn new(runner: &'a R, tool: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            tool: tool.into(),
        }
    }

    /// Build `tool INPUT... PRESET_ARGS... OUTPUT`.
    pub fn invocation(&self, inputs: &[PathBuf], preset: &Preset, output: &Path) -> Invocation {
        Invocation::new(&self.tool)
            .args(inputs)
            .args(preset.args())
            .arg(output)
    }

    /// Convert `inputs` into a single PDF at `output`.
    ///
    /// Progress lines go to `out`; the tool's own output is not captured.
    pub fn convert(
        &self,
        inputs: &[PathBuf],
        output: &Path,
        profile: &str,
        quality: &str,
        out: &mut impl Write,
    ) -> Result<(), ConvertError> {
        validate_output(output)?;
        ensure_absent(output)?;
        validate_inputs(inputs)?;
        let preset = presets::resolve(profile, quality)?;

        for line in output::format_convert_header(output, inputs) {
            writeln!(out, "{line}")?;
        }
        out.flush()?;

        info!(
            output = %output.display(),
            profile = %preset.profile,
            quality = %preset.quality,
            "converting {} file(s)",
            inputs.len()
        );
        self.runner.run(&self.invocation(inputs, &preset, output))?;

        writeln!(out, "{}", output::format_convert_done())?;
        Ok(())
    }

    /// Write one tagged PDF per profile × quality pair, profile-major.
    ///
    /// Every derived name is checked before the first invocation and again
    /// right before its own invocation. Pairs that resolve to the same preset
    /// (for example `highlight` next to `high-contrast`) are written once.
    /// Returns the written paths in order.
    pub fn compare<P, Q>(
        &self,
        inputs: &[PathBuf],
        output: &Path,
        profiles: &[P],
        qualities: &[Q],
        out: &mut impl Write,
    ) -> Result<Vec<PathBuf>, ConvertError>
    where
        P: AsRef<str>,
        Q: AsRef<str>,
    {
        validate_output(output)?;
        validate_inputs(inputs)?;
        let profiles = presets::parse_profiles(profiles)?;
        let qualities = presets::parse_qualities(qualities)?;
        if profiles.is_empty() || qualities.is_empty() {
            return Err(ConvertError::NoVariants);
        }

        let mut variants: Vec<(Preset, PathBuf)> = Vec::new();
        for &profile in &profiles {
            for &quality in &qualities {
                let preset = Preset { profile, quality };
                if variants.iter().any(|(p, _)| *p == preset) {
                    debug!(%profile, %quality, "skipping duplicate variant");
                    continue;
                }
                let path = variant_path(output, profile.name(), quality.name());
                ensure_absent(&path)?;
                variants.push((preset, path));
            }
        }

        info!(
            output = %output.display(),
            "comparing {} variant(s) of {} file(s)",
            variants.len(),
            inputs.len()
        );

        let mut written = Vec::with_capacity(variants.len());
        for (preset, path) in variants {
            ensure_absent(&path)?;
            write!(out, "{}", output::format_variant_start(&path))?;
            out.flush()?;
            self.runner.run(&self.invocation(inputs, &preset, &path))?;
            writeln!(out, "{}", output::format_variant_done())?;
            written.push(path);
        }
        Ok(written)
    }
}
