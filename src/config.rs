//! Configuration file support.
//!
//! Both programs read the same optional `scant.toml`. Values are layered:
//!
//! ```text
//! stock defaults  <  scant.toml  <  command-line flags
//! ```
//!
//! The file is taken from `--config PATH` when given (it must then exist),
//! otherwise from `scant.toml` in the working directory if there is one.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [convert]
//! tool = "convert"                            # ImageMagick binary
//! profile = "scan"                            # Default -p
//! quality = "l"                               # Default -q
//! compare_profiles = ["scan", "high-contrast"] # --test-all profiles
//! compare_qualities = ["xs", "s", "m", "l"]    # --test-all qualities
//!
//! [scan]
//! tool = "scanimage"                          # SANE binary
//! device = "epson2:net:192.168.178.2"
//! resolution = 300
//! paper_size = "a4"                           # a4, a5 or letter
//! format = "png"                              # png, tiff, pnm
//! mode = "Color"                              # Color, Gray, Lineart
//! ```
//!
//! Config files are sparse; override just the values you need. Unknown
//! keys are rejected to catch typos early.

use crate::geometry::PaperSize;
use crate::presets::{self, Profile, Quality};
use crate::scanner::{self, ScannerConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "scant.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Contents of `scant.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScantConfig {
    /// Settings for `scant-combine`.
    pub convert: ConvertConfig,
    /// Settings for `scant`.
    pub scan: ScanConfig,
}

impl ScantConfig {
    /// Validate names against the preset and paper tables and check ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |e: presets::PresetError| ConfigError::Validation(format!("convert: {e}"));
        if self.convert.tool.is_empty() {
            return Err(ConfigError::Validation(
                "convert.tool must not be empty".into(),
            ));
        }
        self.convert.profile.parse::<Profile>().map_err(invalid)?;
        self.convert.quality.parse::<Quality>().map_err(invalid)?;
        presets::parse_profiles(&self.convert.compare_profiles).map_err(invalid)?;
        presets::parse_qualities(&self.convert.compare_qualities).map_err(invalid)?;
        if self.convert.compare_profiles.is_empty() {
            return Err(ConfigError::Validation(
                "convert.compare_profiles must not be empty".into(),
            ));
        }
        if self.convert.compare_qualities.is_empty() {
            return Err(ConfigError::Validation(
                "convert.compare_qualities must not be empty".into(),
            ));
        }

        if self.scan.tool.is_empty() {
            return Err(ConfigError::Validation("scan.tool must not be empty".into()));
        }
        if self.scan.resolution == 0 {
            return Err(ConfigError::Validation(
                "scan.resolution must be greater than 0".into(),
            ));
        }
        if PaperSize::from_name(&self.scan.paper_size).is_none() {
            return Err(ConfigError::Validation(format!(
                "scan.paper_size '{}' is not one of {}",
                self.scan.paper_size,
                PaperSize::names()
            )));
        }
        if self.scan.format.is_empty() {
            return Err(ConfigError::Validation(
                "scan.format must not be empty".into(),
            ));
        }
        if self.scan.mode.is_empty() {
            return Err(ConfigError::Validation("scan.mode must not be empty".into()));
        }
        Ok(())
    }
}

/// Converter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConvertConfig {
    /// Conversion binary; bare names are looked up on `PATH`.
    pub tool: String,
    /// Profile used when `-p` is not given.
    pub profile: String,
    /// Quality used when `-q` is not given.
    pub quality: String,
    /// Profiles tried by `--test-all`.
    pub compare_profiles: Vec<String>,
    /// Qualities tried by `--test-all`.
    pub compare_qualities: Vec<String>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            tool: "convert".to_string(),
            profile: Profile::Scan.name().to_string(),
            quality: Quality::L.name().to_string(),
            compare_profiles: [Profile::Scan, Profile::HighContrast]
                .map(|p| p.name().to_string())
                .to_vec(),
            compare_qualities: [Quality::Xs, Quality::S, Quality::M, Quality::L]
                .map(|q| q.name().to_string())
                .to_vec(),
        }
    }
}

/// Scanner settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    pub tool: String,
    pub device: String,
    /// Default resolution in DPI.
    pub resolution: u32,
    /// Default paper size name.
    pub paper_size: String,
    /// Output format, also the file extension.
    pub format: String,
    /// SANE color mode.
    pub mode: String,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            tool: scanner::DEFAULT_TOOL.to_string(),
            device: scanner::DEFAULT_DEVICE.to_string(),
            resolution: scanner::DEFAULT_RESOLUTION,
            paper_size: PaperSize::A4.name().to_string(),
            format: scanner::DEFAULT_FORMAT.to_string(),
            mode: scanner::DEFAULT_MODE.to_string(),
        }
    }
}

impl ScanConfig {
    /// Scanner defaults described by this section.
    ///
    /// An unknown paper size falls back to the full scanner bed; validated
    /// configs never hit that case.
    pub fn scanner_config(&self) -> ScannerConfig {
        ScannerConfig {
            tool: PathBuf::from(&self.tool),
            device: self.device.clone(),
            format: self.format.clone(),
            resolution: self.resolution,
            size: PaperSize::from_name(&self.paper_size).map(PaperSize::geometry),
            mode: self.mode.clone(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(ScantConfig::default())
        .map_err(|e| ConfigError::Validation(format!("cannot serialize defaults: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist and `Err` if it exists but
/// is not valid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<ScantConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: ScantConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `path` on top of stock defaults; a missing file means defaults.
pub fn load_config(path: &Path) -> Result<ScantConfig, ConfigError> {
    resolve_config(stock_defaults_value()?, load_raw_config(path)?)
}

/// Load the config the command line asked for.
///
/// An explicit path must exist; without one, [`CONFIG_FILE`] in the working
/// directory is used when present.
pub fn load_for_cli(explicit: Option<&Path>) -> Result<ScantConfig, ConfigError> {
    match explicit {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            let overlay: toml::Value = toml::from_str(&content)?;
            resolve_config(stock_defaults_value()?, Some(overlay))
        }
        None => load_config(Path::new(CONFIG_FILE)),
    }
}

/// Returns a fully-commented stock `scant.toml` with all keys and explanations.
///
/// Printed by `--gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# scant configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags override them.
#
# The file is read from --config PATH, or from ./scant.toml if present.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# scant-combine: scans -> PDF
# ---------------------------------------------------------------------------
[convert]
# ImageMagick conversion binary. Bare names are looked up on PATH.
tool = "convert"

# Filter profile used when -p is not given.
# Available: original, scan, high-contrast
profile = "scan"

# Size/fidelity preset used when -q is not given.
# Available: original, xl, l, m, s, xs, xxs, xxxs
quality = "l"

# Profiles and qualities combined by --test-all.
compare_profiles = ["scan", "high-contrast"]
compare_qualities = ["xs", "s", "m", "l"]

# ---------------------------------------------------------------------------
# scant: scanner -> image files
# ---------------------------------------------------------------------------
[scan]
# SANE scanning binary. Bare names are looked up on PATH.
tool = "scanimage"

# Scanner device name (see `scanimage -L`).
device = "epson2:net:192.168.178.2"

# Resolution in DPI (typical: 75, 150, 300, 600, 1200, 2400).
resolution = 300

# Scan area. Available: a4, a5, letter
paper_size = "a4"

# Output format, also used as the file extension (png, tiff, pnm).
format = "png"

# Color mode as understood by the scanner (Color, Gray, Lineart).
mode = "Color"
"##
}
