//! Conversion presets: named ImageMagick argument lists.
//!
//! A conversion is described by two independent choices:
//!
//! - [`Profile`]: the image filters applied to every page (normalize,
//!   level, sharpen, contrast).
//! - [`Quality`]: resampling, bit depth, JPEG quality and PDF density,
//!   which together decide how large the resulting PDF is.
//!
//! Both are fixed tables. Names match exactly: no prefixes, no case folding.
//!
//! | Quality | Resample | Density |
//! |---------|----------|---------|
//! | `original` | — | — |
//! | `xl`   | — | 300x300 |
//! | `l`    | 50% | 150x150 |
//! | `m`    | 37% | 111x111 |
//! | `s`    | 25% | 75x75 |
//! | `xs`   | 20% | 60x60 |
//! | `xxs`  | 15% | 45x45 |
//! | `xxxs` | 10% | 30x30 |

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    #[error("unknown profile '{0}' (available: {names})", names = Profile::NAMES.join(", "))]
    UnknownProfile(String),
    #[error("unknown quality '{0}' (available: {names})", names = Quality::NAMES.join(", "))]
    UnknownQuality(String),
}

/// Image filter profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    Original,
    Scan,
    HighContrast,
}

impl Profile {
    pub const ALL: [Profile; 3] = [Profile::Original, Profile::Scan, Profile::HighContrast];

    /// Canonical names, in table order.
    pub const NAMES: [&'static str; 3] = ["original", "scan", "high-contrast"];

    pub fn name(self) -> &'static str {
        match self {
            Profile::Original => "original",
            Profile::Scan => "scan",
            Profile::HighContrast => "high-contrast",
        }
    }

    pub fn args(self) -> &'static [&'static str] {
        match self {
            Profile::Original => &[],
            Profile::Scan => &["-normalize", "-level", "10%,90%", "-sharpen", "0x1"],
            Profile::HighContrast => &[
                "-normalize",
                "-selective-blur",
                "0x4+10%",
                "-level",
                "10%,90%",
                "-sharpen",
                "0x1",
                "-brightness-contrast",
                "0x25",
            ],
        }
    }
}

impl FromStr for Profile {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "original" => Ok(Profile::Original),
            "scan" => Ok(Profile::Scan),
            // `highlight` is the older name of the same filter chain
            "high-contrast" | "highlight" => Ok(Profile::HighContrast),
            _ => Err(PresetError::UnknownProfile(s.to_string())),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output size/fidelity preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quality {
    Original,
    Xl,
    L,
    M,
    S,
    Xs,
    Xxs,
    Xxxs,
}

impl Quality {
    pub const ALL: [Quality; 8] = [
        Quality::Original,
        Quality::Xl,
        Quality::L,
        Quality::M,
        Quality::S,
        Quality::Xs,
        Quality::Xxs,
        Quality::Xxxs,
    ];

    pub const NAMES: [&'static str; 8] = ["original", "xl", "l", "m", "s", "xs", "xxs", "xxxs"];

    pub fn name(self) -> &'static str {
        match self {
            Quality::Original => "original",
            Quality::Xl => "xl",
            Quality::L => "l",
            Quality::M => "m",
            Quality::S => "s",
            Quality::Xs => "xs",
            Quality::Xxs => "xxs",
            Quality::Xxxs => "xxxs",
        }
    }

    pub fn args(self) -> &'static [&'static str] {
        match self {
            Quality::Original => &[],
            Quality::Xl => &["-depth", "8", "-quality", "50%", "-density", "300x300"],
            Quality::L => &[
                "-resample", "50%", "-depth", "8", "-quality", "50%", "-density", "150x150",
            ],
            Quality::M => &[
                "-resample", "37%", "-depth", "8", "-quality", "50%", "-density", "111x111",
            ],
            Quality::S => &[
                "-resample", "25%", "-depth", "8", "-quality", "50%", "-density", "75x75",
            ],
            Quality::Xs => &[
                "-resample", "20%", "-depth", "8", "-quality", "50%", "-density", "60x60",
            ],
            Quality::Xxs => &[
                "-resample", "15%", "-depth", "8", "-quality", "50%", "-density", "45x45",
            ],
            Quality::Xxxs => &[
                "-resample", "10%", "-depth", "8", "-quality", "50%", "-density", "30x30",
            ],
        }
    }
}

impl FromStr for Quality {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quality::ALL
            .into_iter()
            .find(|q| q.name() == s)
            .ok_or_else(|| PresetError::UnknownQuality(s.to_string()))
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A resolved profile + quality pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub profile: Profile,
    pub quality: Quality,
}

impl Preset {
    /// Filter arguments followed by quality arguments.
    pub fn args(&self) -> impl Iterator<Item = &'static str> {
        self.profile
            .args()
            .iter()
            .chain(self.quality.args())
            .copied()
    }
}

/// Resolve a profile name and a quality name into a [`Preset`].
///
/// The profile is checked first, so a pair of two bad names reports the
/// profile.
pub fn resolve(profile: &str, quality: &str) -> Result<Preset, PresetError> {
    Ok(Preset {
        profile: profile.parse()?,
        quality: quality.parse()?,
    })
}

/// Parse a list of profile names, failing on the first unknown one.
pub fn parse_profiles<S: AsRef<str>>(names: &[S]) -> Result<Vec<Profile>, PresetError> {
    names.iter().map(|n| n.as_ref().parse()).collect()
}

/// Parse a list of quality names, failing on the first unknown one.
pub fn parse_qualities<S: AsRef<str>>(names: &[S]) -> Result<Vec<Quality>, PresetError> {
    names.iter().map(|n| n.as_ref().parse()).collect()
}
