use foundation::math::GeoCoord;

use crate::symbology::Rgba;

/// The curve family a line of position belongs to.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum LopKind {
    /// Circle of equal distance around the anchor, from a sight reduced to
    /// an angular radius.
    Range { radius_rad: f64 },
    /// Great-circle bearing line: the observer sees the anchor at this
    /// bearing.
    Azimuth { bearing_rad: f64 },
}

/// One plotted line of position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineOfPosition {
    /// Geographic position the sight was reduced against.
    pub anchor: GeoCoord,
    pub kind: LopKind,
    /// Half-width of the painted band, as an angular error bound.
    pub tolerance_rad: f64,
    pub color: Rgba,
}

impl LineOfPosition {
    pub fn range(anchor: GeoCoord, radius_rad: f64, tolerance_rad: f64, color: Rgba) -> Self {
        Self {
            anchor,
            kind: LopKind::Range { radius_rad },
            tolerance_rad,
            color,
        }
    }

    pub fn azimuth(anchor: GeoCoord, bearing_rad: f64, tolerance_rad: f64, color: Rgba) -> Self {
        Self {
            anchor,
            kind: LopKind::Azimuth { bearing_rad },
            tolerance_rad,
            color,
        }
    }
}

/// Global best-fit highlight rule. A zero tolerance disables the feature.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MinErrConfig {
    pub tolerance_rad: f64,
    pub color: Rgba,
}

impl MinErrConfig {
    pub fn new(tolerance_rad: f64, color: Rgba) -> Self {
        Self {
            tolerance_rad,
            color,
        }
    }

    pub fn is_enabled(self) -> bool {
        self.tolerance_rad != 0.0
    }
}

impl Default for MinErrConfig {
    fn default() -> Self {
        Self::new(0.0, Rgba::WHITE)
    }
}

/// Everything parsed from one sight document: the ordered lines of
/// position (sequence order sets paint precedence) plus the best-fit
/// highlight rule. Rebuilt wholesale on every edit, never patched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlotSheet {
    pub lops: Vec<LineOfPosition>,
    pub min_err: MinErrConfig,
}
