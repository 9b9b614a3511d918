//! Unit-sphere geometry: coordinate conversions, great-circle distance and
//! bearing, and the drag-roll rotation.
//!
//! Degenerate inputs never panic. Positions with no coordinate (off the
//! projected globe) travel as [`GeoCoord::INVALID`] and propagate through
//! every conversion; degenerate rotations fall back to the identity.

use super::{Mat3, Vec3, wrap_azimuth};

/// Geographic coordinates on the unit sphere, in radians.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoCoord {
    pub lat_rad: f64,
    pub lon_rad: f64,
}

impl GeoCoord {
    /// Sentinel for "no coordinate here". Compares unequal to everything,
    /// including itself; test with [`GeoCoord::is_valid`].
    pub const INVALID: Self = Self {
        lat_rad: f64::NAN,
        lon_rad: f64::NAN,
    };

    pub fn new(lat_rad: f64, lon_rad: f64) -> Self {
        Self { lat_rad, lon_rad }
    }

    pub fn from_degrees(lat_deg: f64, lon_deg: f64) -> Self {
        Self::new(lat_deg.to_radians(), lon_deg.to_radians())
    }

    pub fn is_valid(self) -> bool {
        self.lat_rad.is_finite() && self.lon_rad.is_finite()
    }
}

/// Cartesian unit vector of a coordinate: longitude eastward around +z,
/// latitude up from the equator plane.
pub fn lat_lon_to_vec3(coord: GeoCoord) -> Vec3 {
    let (sin_lat, cos_lat) = coord.lat_rad.sin_cos();
    let (sin_lon, cos_lon) = coord.lon_rad.sin_cos();
    Vec3::new(cos_lat * cos_lon, cos_lat * sin_lon, sin_lat)
}

/// Inverse of [`lat_lon_to_vec3`]. At the poles the longitude collapses
/// to zero.
pub fn vec3_to_lat_lon(v: Vec3) -> GeoCoord {
    let lat = v.z.atan2((v.x * v.x + v.y * v.y).sqrt());
    let lon = v.y.atan2(v.x);
    GeoCoord::new(lat, lon)
}

/// Great-circle angular distance between two coordinates, in [0, PI].
pub fn haversine(a: GeoCoord, b: GeoCoord) -> f64 {
    let sin_dlat = ((b.lat_rad - a.lat_rad) * 0.5).sin();
    let sin_dlon = ((b.lon_rad - a.lon_rad) * 0.5).sin();
    let h = sin_dlat * sin_dlat + a.lat_rad.cos() * b.lat_rad.cos() * sin_dlon * sin_dlon;
    2.0 * h.sqrt().atan2((1.0 - h).max(0.0).sqrt())
}

/// Initial great-circle bearing from `from` toward `to`, clockwise from
/// north in [0, TAU).
///
/// Degenerate when `from` sits on a pole or the points coincide; the
/// result is then an arbitrary in-range bearing rather than an error.
pub fn calc_azimuth(from: GeoCoord, to: GeoCoord) -> f64 {
    let dlon = to.lon_rad - from.lon_rad;
    let y = dlon.sin() * to.lat_rad.cos();
    let x = from.lat_rad.cos() * to.lat_rad.sin()
        - from.lat_rad.sin() * to.lat_rad.cos() * dlon.cos();
    wrap_azimuth(y.atan2(x))
}

/// Builds the drag rotation from the coordinate currently under the cursor
/// (`target`) and the coordinate grabbed at drag start (`anchor`), both
/// resolved through the same frozen world matrix. Composed onto that matrix
/// as `world.mul(roll)`, it re-orients the view so the grabbed coordinate
/// lands under the cursor.
///
/// Coincident or antipodal endpoints (where the rotation axis vanishes)
/// yield the identity.
pub fn build_roll_mat(target: GeoCoord, anchor: GeoCoord) -> Mat3 {
    let from = lat_lon_to_vec3(anchor);
    let to = lat_lon_to_vec3(target);
    let axis = from.cross(to);
    let len = axis.length();
    if len < 1e-12 || len.is_nan() {
        return Mat3::IDENTITY;
    }
    let angle = from.dot(to).clamp(-1.0, 1.0).acos();
    Mat3::from_axis_angle(axis, angle)
}

/// Applies a world-orientation matrix to a coordinate.
pub fn transform_coord(coord: GeoCoord, world: Mat3) -> GeoCoord {
    vec3_to_lat_lon(world.transform(lat_lon_to_vec3(coord)))
}
