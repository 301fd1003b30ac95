use serde::{Deserialize, Serialize};

/// Map `x` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// The map is not clamped: inputs outside the input range extrapolate along
/// the same line.
pub fn linear_map(x: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// A stored linear calibration, `input` range to `output` range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearMap {
    pub input: (f64, f64),
    pub output: (f64, f64),
}

impl LinearMap {
    pub const fn new(input: (f64, f64), output: (f64, f64)) -> Self {
        Self { input, output }
    }

    pub fn apply(&self, x: f64) -> f64 {
        linear_map(x, self.input.0, self.input.1, self.output.0, self.output.1)
    }

    /// True when the input range has non-zero width.
    pub fn is_well_formed(&self) -> bool {
        (self.input.1 - self.input.0).abs() > f64::EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints() {
        assert_eq!(linear_map(0.0, 0.0, 400.0, 1.05, 1.80), 1.05);
        assert!((linear_map(400.0, 0.0, 400.0, 1.05, 1.80) - 1.80).abs() < 1e-12);
    }

    #[test]
    fn test_extrapolates() {
        let m = LinearMap::new((0.0, 400.0), (1.0, 2.0));
        assert!((m.apply(800.0) - 3.0).abs() < 1e-12);
        assert!((m.apply(-400.0) - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_range_detected() {
        assert!(!LinearMap::new((5.0, 5.0), (0.0, 1.0)).is_well_formed());
        assert!(LinearMap::new((0.0, 1.0), (0.0, 1.0)).is_well_formed());
    }
}
