//! Flatbed scanner driver.
//!
//! Scanning is delegated to SANE's `scanimage`, which writes the captured
//! image to its standard output. A [`Scanner`] holds the session defaults
//! ([`ScannerConfig`]) and turns each [`ScanRequest`] into one invocation:
//!
//! ```text
//! scanimage --device-name D --format F --resolution R --mode M [-x W -y H] > FILE
//! ```
//!
//! The destination file is created exclusively before the tool starts, so an
//! earlier scan is never overwritten. If the tool fails midway, whatever it
//! wrote stays on disk and has to be removed by hand before the name can be
//! reused.

use crate::geometry::{Geometry, PaperSize};
use crate::naming::with_format_suffix;
use crate::tool::{Invocation, ToolError, ToolRunner};
use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_TOOL: &str = "scanimage";
pub const DEFAULT_DEVICE: &str = "epson2:net:192.168.178.2";
pub const DEFAULT_FORMAT: &str = "png";
pub const DEFAULT_RESOLUTION: u32 = 300;
pub const DEFAULT_MODE: &str = "Color";

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("output file {} already exists", .0.display())]
    OutputExists(PathBuf),
    #[error("cannot create {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Tool(#[from] ToolError),
}

/// Session-wide scanner settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ScannerConfig {
    /// Scan tool binary; bare names are looked up on `PATH`.
    pub tool: PathBuf,
    /// SANE device name, passed through untouched.
    pub device: String,
    /// Output format, also used as the file extension.
    pub format: String,
    pub resolution: u32,
    /// Scan area. `None` lets the scanner use its full bed.
    pub size: Option<Geometry>,
    pub mode: String,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            tool: PathBuf::from(DEFAULT_TOOL),
            device: DEFAULT_DEVICE.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            resolution: DEFAULT_RESOLUTION,
            size: Some(PaperSize::A4.geometry()),
            mode: DEFAULT_MODE.to_string(),
        }
    }
}

/// One scan: a filename plus optional per-scan overrides.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScanRequest {
    pub filename: String,
    pub size: Option<Geometry>,
    pub resolution: Option<u32>,
    pub mode: Option<String>,
}

impl ScanRequest {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            ..Self::default()
        }
    }
}

pub struct Scanner<'a, R: ToolRunner> {
    runner: &'a R,
    config: ScannerConfig,
}

impl<'a, R: ToolRunner> Scanner<'a, R> {
    pub fn new(runner: &'a R, config: ScannerConfig) -> Self {
        Self { runner, config }
    }

    pub fn set_format(&mut self, format: impl Into<String>) {
        self.config.format = format.into();
    }

    /// Destination path for `filename`, with the format suffix ensured.
    pub fn output_path(&self, filename: &str) -> PathBuf {
        PathBuf::from(with_format_suffix(filename, &self.config.format))
    }

    /// Build the tool invocation, filling unset overrides from the config.
    pub fn invocation(&self, request: &ScanRequest) -> Invocation {
        let resolution = request.resolution.unwrap_or(self.config.resolution);
        let mode = request.mode.as_deref().unwrap_or(&self.config.mode);
        let size = request.size.or(self.config.size);

        let inv = Invocation::new(&self.config.tool)
            .args(["--device-name", self.config.device.as_str()])
            .args(["--format", self.config.format.as_str()])
            .args(["--resolution", resolution.to_string().as_str()])
            .args(["--mode", mode]);
        match size {
            Some(g) => inv
                .args(["-x", g.width.to_string().as_str()])
                .args(["-y", g.height.to_string().as_str()]),
            None => inv,
        }
    }

    /// Scan into a new file and return its path.
    pub fn scan(&self, request: &ScanRequest) -> Result<PathBuf, ScanError> {
        let path = self.output_path(&request.filename);
        if path.symlink_metadata().is_ok() {
            return Err(ScanError::OutputExists(path));
        }
        let invocation = self.invocation(request);

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|source| match source.kind() {
                ErrorKind::AlreadyExists => ScanError::OutputExists(path.clone()),
                _ => ScanError::Io {
                    path: path.clone(),
                    source,
                },
            })?;

        info!(path = %path.display(), device = %self.config.device, "scanning");
        if let Err(e) = self.runner.run_to_file(&invocation, file) {
            warn!(path = %path.display(), "scan failed, partial output left in place");
            return Err(e.into());
        }
        Ok(path)
    }
}
