//! Geographic coordinates and their projection onto the globe sphere.

use std::f64::consts::PI;

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees. Ranges are not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for GeoPoint {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// A Cartesian point on a sphere of known radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpherePoint {
    pub position: DVec3,
    pub radius: f64,
}

impl SpherePoint {
    pub fn position(&self) -> DVec3 {
        self.position
    }

    /// Straight-line distance to another point.
    pub fn chord_distance(&self, other: &SpherePoint) -> f64 {
        self.position.distance(other.position)
    }
}

/// Convert a geographic point to Cartesian coordinates on a sphere of
/// `radius`, with +Y through the north pole and longitude 180 on +X.
pub fn project(point: GeoPoint, radius: f64) -> SpherePoint {
    let phi = (90.0 - point.lat) * PI / 180.0;
    let theta = (180.0 - point.lng) * PI / 180.0;

    let x = radius * phi.sin() * theta.cos();
    let y = radius * phi.cos();
    let z = radius * phi.sin() * theta.sin();

    SpherePoint {
        position: DVec3::new(x, y, z),
        radius,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_project_deterministic() {
        let p = GeoPoint::new(37.6131904, -119.2725474);
        assert_eq!(project(p, 200.0), project(p, 200.0));
    }

    #[test]
    fn test_points_on_sphere() {
        for lat in [-80.0, -45.0, 0.0, 12.5, 60.0, 89.0] {
            for lng in [-170.0, -90.0, 0.0, 45.0, 179.0] {
                let p = project(GeoPoint::new(lat, lng), 200.0);
                assert_abs_diff_eq!(p.position.length(), 200.0, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_north_pole_collapses() {
        let a = project(GeoPoint::new(90.0, 0.0), 1.0);
        let b = project(GeoPoint::new(90.0, 123.0), 1.0);
        assert_abs_diff_eq!(a.position.y, 1.0, epsilon = 1e-12);
        assert!((a.position - b.position).length() < 1e-12);
    }

    #[test]
    fn test_prime_meridian_equator() {
        // lng 0 maps to theta = PI, i.e. the -X axis.
        let p = project(GeoPoint::new(0.0, 0.0), 200.0);
        assert_abs_diff_eq!(p.position.x, -200.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.position.y, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(p.position.z, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_out_of_range_input_still_projects() {
        let p = project(GeoPoint::new(135.0, 400.0), 200.0);
        assert!(p.position.is_finite());
        assert_abs_diff_eq!(p.position.length(), 200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_chord_distance_antipodal() {
        let a = project(GeoPoint::new(0.0, 0.0), 200.0);
        let b = project(GeoPoint::new(0.0, 180.0), 200.0);
        assert_abs_diff_eq!(a.chord_distance(&b), 400.0, epsilon = 1e-9);
    }
}
