use std::f64::consts::{FRAC_PI_2, PI, TAU};

use super::{GeoCoord, Vec2, Vec3, lat_lon_to_vec3, vec3_to_lat_lon, wrap_longitude};

/// Maps between geographic coordinates and a normalized [0, 1]^2 surface.
///
/// `to_lat_lon(to_normal(c))` recovers `c` everywhere the projection can
/// represent it; positions off the globe come back as
/// [`GeoCoord::INVALID`], never a panic.
pub trait Projection {
    fn to_normal(&self, coord: GeoCoord) -> Vec2;
    fn to_lat_lon(&self, normal: Vec2) -> GeoCoord;
    /// Canvas width/height ratio matching the projection's aspect.
    fn ratio(&self) -> f64;
}

/// Longitude and latitude mapped linearly onto the full rectangle.
///
/// x = 0 is the date line approached from the west, x = 1 from the east;
/// y = 1 is the north pole.
#[derive(Debug, Copy, Clone, Default)]
pub struct Equirectangular;

impl Projection for Equirectangular {
    fn to_normal(&self, coord: GeoCoord) -> Vec2 {
        let x = (wrap_longitude(coord.lon_rad) + PI) / TAU;
        let y = (coord.lat_rad + FRAC_PI_2) / PI;
        Vec2::new(x, y)
    }

    fn to_lat_lon(&self, normal: Vec2) -> GeoCoord {
        GeoCoord::new(normal.y * PI - FRAC_PI_2, normal.x * TAU - PI)
    }

    fn ratio(&self) -> f64 {
        2.0
    }
}

/// The near hemisphere seen from outside along the +x axis, projected onto
/// the unit disk inscribed in the square. The disk center shows lat 0,
/// lon 0; east is to the right, north up.
#[derive(Debug, Copy, Clone, Default)]
pub struct Orthographic;

impl Projection for Orthographic {
    /// Disk position of a coordinate. A far-hemisphere coordinate returns
    /// its mirror position; only `to_lat_lon` enforces visibility.
    fn to_normal(&self, coord: GeoCoord) -> Vec2 {
        let v = lat_lon_to_vec3(coord);
        Vec2::new((v.y + 1.0) * 0.5, (v.z + 1.0) * 0.5)
    }

    fn to_lat_lon(&self, normal: Vec2) -> GeoCoord {
        let y = normal.x * 2.0 - 1.0;
        let z = normal.y * 2.0 - 1.0;
        let r2 = y * y + z * z;
        if r2 > 1.0 {
            return GeoCoord::INVALID;
        }
        vec3_to_lat_lon(Vec3::new((1.0 - r2).sqrt(), y, z))
    }

    fn ratio(&self) -> f64 {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::{Equirectangular, Orthographic, Projection};
    use crate::math::{GeoCoord, Vec2, haversine, wrap_longitude};
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn equirectangular_round_trip() {
        let proj = Equirectangular;
        let mut lat_deg = -90.0;
        while lat_deg <= 90.0 {
            let mut lon_deg = -179.0;
            while lon_deg <= 179.0 {
                let coord = GeoCoord::from_degrees(lat_deg, lon_deg);
                let rt = proj.to_lat_lon(proj.to_normal(coord));
                assert_close(rt.lat_rad, coord.lat_rad, 1e-9);
                assert_close(rt.lon_rad, wrap_longitude(coord.lon_rad), 1e-9);
                lon_deg += 71.0;
            }
            lat_deg += 30.0;
        }
    }

    #[test]
    fn equirectangular_orientation() {
        let proj = Equirectangular;
        let north = proj.to_normal(GeoCoord::new(FRAC_PI_2, 0.0));
        assert_close(north.y, 1.0, 1e-12);
        let south = proj.to_normal(GeoCoord::new(-FRAC_PI_2, 0.0));
        assert_close(south.y, 0.0, 1e-12);
        let greenwich = proj.to_normal(GeoCoord::new(0.0, 0.0));
        assert_close(greenwich.x, 0.5, 1e-12);
        assert_close(proj.ratio(), 2.0, 0.0);
    }

    #[test]
    fn equirectangular_wraps_longitude_first() {
        let proj = Equirectangular;
        let wrapped = proj.to_normal(GeoCoord::new(0.0, 2.5 * PI));
        let direct = proj.to_normal(GeoCoord::new(0.0, 0.5 * PI));
        assert_close(wrapped.x, direct.x, 1e-9);
    }

    #[test]
    fn orthographic_center_faces_viewer() {
        let proj = Orthographic;
        let center = proj.to_lat_lon(Vec2::new(0.5, 0.5));
        assert_close(center.lat_rad, 0.0, 1e-12);
        assert_close(center.lon_rad, 0.0, 1e-12);
        assert_close(proj.ratio(), 1.0, 0.0);
    }

    #[test]
    fn orthographic_rejects_points_off_the_disk() {
        let proj = Orthographic;
        assert!(!proj.to_lat_lon(Vec2::new(0.0, 0.0)).is_valid());
        assert!(!proj.to_lat_lon(Vec2::new(1.0, 0.93)).is_valid());
        assert!(!proj.to_lat_lon(Vec2::new(-0.2, 0.5)).is_valid());
        // Just inside the rim is still a coordinate.
        assert!(proj.to_lat_lon(Vec2::new(0.999, 0.5)).is_valid());
    }

    #[test]
    fn orthographic_round_trip_near_hemisphere() {
        let proj = Orthographic;
        let samples = [
            GeoCoord::from_degrees(0.0, 0.0),
            GeoCoord::from_degrees(45.0, 30.0),
            GeoCoord::from_degrees(-60.0, -80.0),
            GeoCoord::from_degrees(10.0, 85.0),
        ];
        for coord in samples {
            let rt = proj.to_lat_lon(proj.to_normal(coord));
            assert!(rt.is_valid());
            assert!(haversine(rt, coord) < 1e-9);
        }
    }

    #[test]
    fn orthographic_east_is_right_north_is_up() {
        let proj = Orthographic;
        let east = proj.to_normal(GeoCoord::from_degrees(0.0, 90.0));
        assert_close(east.x, 1.0, 1e-12);
        assert_close(east.y, 0.5, 1e-12);
        let north = proj.to_normal(GeoCoord::from_degrees(90.0, 0.0));
        assert_close(north.x, 0.5, 1e-12);
        assert_close(north.y, 1.0, 1e-12);
    }
}
