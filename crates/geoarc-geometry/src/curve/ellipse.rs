//! Planar ellipse embedded in 3D by a tilt about the X axis.

use std::f64::consts::PI;

use geoarc_math::{DQuat, DVec2, DVec3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use super::Curve;

/// An ellipse drawn in the XY plane, rotated in-plane by `rotation` and then
/// tilted about the X axis by `tilt`. Parameterized over `[0, 1]` for one
/// counter-clockwise revolution starting at the rotated +X direction.
///
/// This is the shape of the sun orbit: radius slightly larger than the globe,
/// in-plane rotation set by right ascension, tilt set by declination.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ellipse {
    pub center: DVec2,
    pub radii: DVec2,
    pub rotation: f64,
    pub tilt: f64,
}

impl Ellipse {
    pub fn new(center: DVec2, radii: DVec2, rotation: f64, tilt: f64) -> Self {
        Self {
            center,
            radii,
            rotation,
            tilt,
        }
    }

    pub fn circle(radius: f64, rotation: f64, tilt: f64) -> Self {
        Self::new(DVec2::ZERO, DVec2::splat(radius), rotation, tilt)
    }

    fn orientation(&self) -> DQuat {
        DQuat::from_rotation_x(self.tilt)
    }

    fn rotate_in_plane(&self, v: DVec2) -> DVec2 {
        let (s, c) = self.rotation.sin_cos();
        DVec2::new(v.x * c - v.y * s, v.x * s + v.y * c)
    }
}

impl Curve for Ellipse {
    fn point_at(&self, t: f64) -> Point3 {
        let angle = 2.0 * PI * t;
        let local = DVec2::new(self.radii.x * angle.cos(), self.radii.y * angle.sin());
        let planar = self.rotate_in_plane(local) + self.center;
        self.orientation() * DVec3::new(planar.x, planar.y, 0.0)
    }

    fn tangent_at(&self, t: f64) -> Vector3 {
        let angle = 2.0 * PI * t;
        let local = 2.0 * PI * DVec2::new(-self.radii.x * angle.sin(), self.radii.y * angle.cos());
        let planar = self.rotate_in_plane(local);
        self.orientation() * DVec3::new(planar.x, planar.y, 0.0)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn is_closed(&self) -> bool {
        true
    }
}
