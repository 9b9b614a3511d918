use super::Vec3;

/// 3x3 rotation matrix, stored row-major.
///
/// Vectors transform as the row-vector product `v * M`, so
/// `(a.mul(b)).transform(v)` applies `a` first, then `b`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat3 {
    pub rows: [[f64; 3]; 3],
}

impl Mat3 {
    pub const IDENTITY: Self = Self {
        rows: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
    };

    pub fn new(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }

    /// Rotation by `angle_rad` about `axis` (right-hand rule).
    ///
    /// The axis is normalized first; a degenerate axis yields the identity.
    pub fn from_axis_angle(axis: Vec3, angle_rad: f64) -> Self {
        let n = axis.normalized();
        if n.length() < 0.5 {
            return Self::IDENTITY;
        }
        let (sin, cos) = angle_rad.sin_cos();
        let t = 1.0 - cos;
        let (x, y, z) = (n.x, n.y, n.z);
        Self::new([
            [t * x * x + cos, t * x * y - sin * z, t * x * z + sin * y],
            [t * x * y + sin * z, t * y * y + cos, t * y * z - sin * x],
            [t * x * z - sin * y, t * y * z + sin * x, t * z * z + cos],
        ])
    }

    /// Standard matrix product `self * rhs`.
    pub fn mul(self, rhs: Self) -> Self {
        let mut rows = [[0.0; 3]; 3];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.rows[i][0] * rhs.rows[0][j]
                    + self.rows[i][1] * rhs.rows[1][j]
                    + self.rows[i][2] * rhs.rows[2][j];
            }
        }
        Self::new(rows)
    }

    /// Row-vector product `v * M`.
    pub fn transform(self, v: Vec3) -> Vec3 {
        let r = self.rows;
        Vec3::new(
            v.x * r[0][0] + v.y * r[1][0] + v.z * r[2][0],
            v.x * r[0][1] + v.y * r[1][1] + v.z * r[2][1],
            v.x * r[0][2] + v.y * r[1][2] + v.z * r[2][2],
        )
    }

    pub fn is_finite(self) -> bool {
        self.rows.iter().flatten().all(|v| v.is_finite())
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}
