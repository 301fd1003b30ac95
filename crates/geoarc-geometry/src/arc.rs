//! Link arcs: cubic Bezier curves bulging outward from the globe between two
//! projected points.

use geoarc_math::{LinearMap, Point3, SpherePoint};
use serde::{Deserialize, Serialize};

use crate::curve::{CubicBezier, Curve};
use crate::tessellate::{cumulative_lengths, sample_uniform};

/// Calibration for arc construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArcParams {
    /// Globe radius in model units.
    pub radius: f64,
    /// Chord distance to bulge factor (multiple of `radius`). Not clamped.
    pub bulge: LinearMap,
    /// Number of segments the curve is sampled into.
    pub segments: usize,
}

impl ArcParams {
    pub const EARTH_RADIUS: f64 = 200.0;
    pub const DEFAULT_SEGMENTS: usize = 100;
    pub const DEFAULT_BULGE: LinearMap = LinearMap::new((0.0, 400.0), (1.05, 1.80));
}

impl Default for ArcParams {
    fn default() -> Self {
        Self {
            radius: Self::EARTH_RADIUS,
            bulge: Self::DEFAULT_BULGE,
            segments: Self::DEFAULT_SEGMENTS,
        }
    }
}

/// Builds [`Arc`]s with a fixed calibration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArcBuilder {
    pub params: ArcParams,
}

impl ArcBuilder {
    pub fn new(params: ArcParams) -> Self {
        Self { params }
    }

    /// Bulge factor for a chord distance.
    pub fn bulge(&self, distance: f64) -> f64 {
        self.params.bulge.apply(distance)
    }

    pub fn build(&self, from: SpherePoint, to: SpherePoint) -> Arc {
        let start = from.position;
        let end = to.position;
        let chord = start.distance(end);
        let bulge = self.bulge(chord);
        let height = self.params.radius * bulge;

        let mid = ((start + end) * 0.5).normalize_or_zero() * height;
        let control_from = (start + mid).normalize_or_zero() * height;
        let control_to = (end + mid).normalize_or_zero() * height;

        let curve = CubicBezier::new(start, control_from, control_to, end);
        let samples = sample_uniform(&curve, self.params.segments);
        let lengths = cumulative_lengths(&samples);

        Arc {
            from,
            to,
            curve,
            chord,
            bulge,
            samples,
            lengths,
        }
    }
}

/// An immutable link arc with its sampled polyline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arc {
    from: SpherePoint,
    to: SpherePoint,
    curve: CubicBezier,
    chord: f64,
    bulge: f64,
    samples: Vec<Point3>,
    lengths: Vec<f64>,
}

impl Arc {
    pub fn from(&self) -> &SpherePoint {
        &self.from
    }

    pub fn to(&self) -> &SpherePoint {
        &self.to
    }

    pub fn curve(&self) -> &CubicBezier {
        &self.curve
    }

    /// Straight-line distance between the endpoints.
    pub fn chord_distance(&self) -> f64 {
        self.chord
    }

    pub fn bulge(&self) -> f64 {
        self.bulge
    }

    pub fn samples(&self) -> &[Point3] {
        &self.samples
    }

    pub fn cumulative_lengths(&self) -> &[f64] {
        &self.lengths
    }

    /// Length of the sampled polyline.
    pub fn length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Point at Bezier parameter `t`.
    pub fn point_at(&self, t: f64) -> Point3 {
        self.curve.point_at(t)
    }

    /// Point at distance `s` along the sampled polyline, clamped to the ends.
    pub fn point_at_length(&self, s: f64) -> Point3 {
        let (index, frac) = self.locate(s);
        if frac == 0.0 {
            return self.samples[index];
        }
        self.samples[index].lerp(self.samples[index + 1], frac)
    }

    /// Prefix of the polyline covering `fraction` of the arc length, ending
    /// with an interpolated point. Used for the draw-in reveal.
    pub fn revealed(&self, fraction: f64) -> Vec<Point3> {
        if self.samples.is_empty() {
            return Vec::new();
        }
        let s = fraction.clamp(0.0, 1.0) * self.length();
        let (index, frac) = self.locate(s);
        let mut points = self.samples[..=index].to_vec();
        if frac > 0.0 {
            points.push(self.samples[index].lerp(self.samples[index + 1], frac));
        }
        points
    }

    /// Segment index and fraction within it for distance `s`.
    fn locate(&self, s: f64) -> (usize, f64) {
        let last = self.samples.len().saturating_sub(1);
        if last == 0 || s <= 0.0 {
            return (0, 0.0);
        }
        if s >= self.length() {
            return (last, 0.0);
        }

        // First sample strictly beyond `s`; the segment starts one before it.
        let upper = self.lengths.partition_point(|&l| l <= s);
        let index = upper - 1;
        let segment = self.lengths[upper] - self.lengths[index];
        let frac = if segment > 0.0 {
            (s - self.lengths[index]) / segment
        } else {
            0.0
        };
        (index, frac)
    }
}
