//! Scan area geometry and the built-in paper sizes.
//!
//! Dimensions are millimeters, which is what `scanimage -x/-y` expects.

use std::fmt;
use std::str::FromStr;

/// Scan area: width x height plus an offset from the scanner's origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub width: f64,
    pub height: f64,
    pub x: f64,
    pub y: f64,
}

impl Geometry {
    /// A geometry anchored at the origin.
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            x: 0.0,
            y: 0.0,
        }
    }
}

/// Renders as `WxH+X+Y`, e.g. `210x297+0+0`.
impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Named paper sizes accepted on the command line and in scan options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaperSize {
    A4,
    A5,
    Letter,
}

impl PaperSize {
    pub const ALL: [PaperSize; 3] = [PaperSize::A4, PaperSize::A5, PaperSize::Letter];

    pub fn name(self) -> &'static str {
        match self {
            PaperSize::A4 => "a4",
            PaperSize::A5 => "a5",
            PaperSize::Letter => "letter",
        }
    }

    pub fn geometry(self) -> Geometry {
        match self {
            PaperSize::A4 => Geometry::new(210.0, 297.0),
            PaperSize::A5 => Geometry::new(148.0, 210.0),
            PaperSize::Letter => Geometry::new(215.9, 279.4),
        }
    }

    /// Exact, case-sensitive lookup by name.
    pub fn from_name(name: &str) -> Option<PaperSize> {
        PaperSize::ALL.into_iter().find(|p| p.name() == name)
    }

    pub fn names() -> String {
        PaperSize::ALL.map(|p| p.name()).join(", ")
    }
}

impl FromStr for PaperSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaperSize::from_name(s)
            .ok_or_else(|| format!("unknown paper size '{s}' (available: {})", PaperSize::names()))
    }
}

impl fmt::Display for PaperSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
