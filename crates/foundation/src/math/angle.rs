use std::f64::consts::{PI, TAU};

/// Wrap a longitude into (-PI, PI].
pub fn wrap_longitude(rad: f64) -> f64 {
    let wrapped = rad.rem_euclid(TAU);
    if wrapped > PI { wrapped - TAU } else { wrapped }
}

/// Wrap a bearing into [0, TAU).
pub fn wrap_azimuth(rad: f64) -> f64 {
    let wrapped = rad.rem_euclid(TAU);
    // rem_euclid can land on TAU exactly for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Circular difference between two bearings, in [0, PI].
///
/// A raw difference past a half turn is measured the short way around, so
/// bearings on either side of north compare as nearly equal.
pub fn bearing_error(a_rad: f64, b_rad: f64) -> f64 {
    let raw = (wrap_azimuth(a_rad) - wrap_azimuth(b_rad)).abs();
    if raw > PI { TAU - raw } else { raw }
}
