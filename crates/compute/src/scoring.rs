//! Scores a globe coordinate against a sheet of lines of position and
//! picks the composite color.
//!
//! Everything here is a pure function of its arguments, so a rasterizer
//! may evaluate points in any order, batched or in parallel, without
//! changing the output.

use foundation::math::{GeoCoord, bearing_error, calc_azimuth, haversine};
use layers::{LineOfPosition, LopKind, MinErrConfig, Rgba};

/// Color painted where no coordinate exists (outside the projected globe).
pub const OFF_GLOBE: Rgba = Rgba::BLACK;

/// Angular error of a coordinate against one line of position.
///
/// Range lines measure how far the coordinate sits off the circle of equal
/// distance; azimuth lines measure the circular difference between the
/// observed bearing and the bearing of the anchor as seen from the
/// coordinate, never more than a half turn.
pub fn lop_error(coord: GeoCoord, lop: &LineOfPosition) -> f64 {
    match lop.kind {
        LopKind::Range { radius_rad } => (radius_rad - haversine(coord, lop.anchor)).abs(),
        LopKind::Azimuth { bearing_rad } => {
            bearing_error(bearing_rad, calc_azimuth(coord, lop.anchor))
        }
    }
}

/// Root-mean-square error across a whole sheet, or `None` when it is empty.
pub fn rms_error(coord: GeoCoord, lops: &[LineOfPosition]) -> Option<f64> {
    if lops.is_empty() {
        return None;
    }
    let mut sum_sq = 0.0;
    for lop in lops {
        let err = lop_error(coord, lop);
        sum_sq += err * err;
    }
    Some((sum_sq / lops.len() as f64).sqrt())
}

/// Picks the composite color for one coordinate.
///
/// Precedence, highest first: an invalid coordinate is always
/// [`OFF_GLOBE`]; an RMS below the min-err tolerance beats every per-line
/// match; among per-line matches the last one in sequence wins; otherwise
/// `base` supplies the background color and is invoked only in that case.
pub fn evaluate<F>(coord: GeoCoord, lops: &[LineOfPosition], min_err: MinErrConfig, base: F) -> Rgba
where
    F: FnOnce() -> Rgba,
{
    if !coord.is_valid() {
        return OFF_GLOBE;
    }

    let mut sum_sq = 0.0;
    let mut matched: Option<Rgba> = None;
    for lop in lops {
        let err = lop_error(coord, lop);
        sum_sq += err * err;
        if err <= lop.tolerance_rad {
            matched = Some(lop.color);
        }
    }

    if min_err.is_enabled() && !lops.is_empty() {
        let rms = (sum_sq / lops.len() as f64).sqrt();
        if rms < min_err.tolerance_rad {
            return min_err.color;
        }
    }

    if let Some(color) = matched {
        return color;
    }
    base()
}
