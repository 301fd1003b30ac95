//! Sampling utilities for converting curves to polylines.

use geoarc_math::Point3;

use crate::curve::Curve;

/// Sample `divisions + 1` points at evenly spaced parameters across the
/// curve domain, both ends included.
pub fn sample_uniform(curve: &dyn Curve, divisions: usize) -> Vec<Point3> {
    let (t_min, t_max) = curve.domain();
    if divisions == 0 {
        return vec![curve.point_at(t_min)];
    }

    (0..=divisions)
        .map(|i| {
            let t = t_min + (t_max - t_min) * i as f64 / divisions as f64;
            curve.point_at(t)
        })
        .collect()
}

/// Running distance along a polyline: entry `i` is the length from the first
/// point to point `i`.
pub fn cumulative_lengths(points: &[Point3]) -> Vec<f64> {
    let mut lengths = Vec::with_capacity(points.len());
    let mut total = 0.0;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            total += p.distance(points[i - 1]);
        }
        lengths.push(total);
    }
    lengths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{CubicBezier, Ellipse};
    use geoarc_math::DVec3;

    #[test]
    fn test_sample_uniform_counts() {
        let line = CubicBezier::new(DVec3::ZERO, DVec3::X, DVec3::X * 2.0, DVec3::X * 3.0);
        assert_eq!(sample_uniform(&line, 100).len(), 101);
        assert_eq!(sample_uniform(&line, 0).len(), 1);
    }

    #[test]
    fn test_cumulative_lengths_straight_line() {
        let points = vec![DVec3::ZERO, DVec3::X, DVec3::X * 3.0];
        assert_eq!(cumulative_lengths(&points), vec![0.0, 1.0, 3.0]);
        assert!(cumulative_lengths(&[]).is_empty());
    }

    #[test]
    fn test_circle_perimeter_converges() {
        let circle = Ellipse::circle(1.0, 0.0, 0.0);
        let points = sample_uniform(&circle, 512);
        let total = *cumulative_lengths(&points).last().unwrap();
        assert!((total - 2.0 * std::f64::consts::PI).abs() < 1e-3);
    }
}
