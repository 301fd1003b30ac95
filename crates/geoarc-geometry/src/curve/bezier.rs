//! Cubic Bezier curve.

use geoarc_math::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Curve;

/// A cubic Bezier from `p0` to `p3` with interior controls `p1`, `p2`,
/// parameterized over `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub p0: Point3,
    pub p1: Point3,
    pub p2: Point3,
    pub p3: Point3,
}

impl CubicBezier {
    pub fn new(p0: Point3, p1: Point3, p2: Point3, p3: Point3) -> Self {
        Self { p0, p1, p2, p3 }
    }
}

impl Curve for CubicBezier {
    fn point_at(&self, t: f64) -> Point3 {
        let k = 1.0 - t;
        k * k * k * self.p0
            + 3.0 * k * k * t * self.p1
            + 3.0 * k * t * t * self.p2
            + t * t * t * self.p3
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        let k = 1.0 - t;
        3.0 * k * k * (self.p1 - self.p0)
            + 6.0 * k * t * (self.p2 - self.p1)
            + 3.0 * t * t * (self.p3 - self.p2)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geoarc_math::DVec3;

    fn sample() -> CubicBezier {
        CubicBezier::new(
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 2.0, 0.0),
            DVec3::new(3.0, 2.0, 0.0),
            DVec3::new(4.0, 0.0, 0.0),
        )
    }

    #[test]
    fn test_endpoints_are_exact() {
        let b = sample();
        assert_eq!(b.point_at(0.0), b.p0);
        assert_eq!(b.point_at(1.0), b.p3);
    }

    #[test]
    fn test_symmetric_midpoint() {
        let p = sample().point_at(0.5);
        assert!((p.x - 2.0).abs() < 1e-10);
        assert!((p.y - 1.5).abs() < 1e-10);
    }

    #[test]
    fn test_tangent_at_ends_follows_control_polygon() {
        let b = sample();
        let t0 = b.tangent_at(0.0);
        let t1 = b.tangent_at(1.0);
        assert!((t0 - 3.0 * (b.p1 - b.p0)).length() < 1e-10);
        assert!((t1 - 3.0 * (b.p3 - b.p2)).length() < 1e-10);
    }

    #[test]
    fn test_straight_line_degenerates() {
        let b = CubicBezier::new(DVec3::ZERO, DVec3::X, DVec3::X * 2.0, DVec3::X * 3.0);
        let p = b.point_at(0.25);
        assert!(p.y.abs() < 1e-12 && p.z.abs() < 1e-12);
        assert!((p.x - 0.75).abs() < 1e-10);
    }
}
