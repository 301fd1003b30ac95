/// How projected endpoint coordinates are compared when deciding whether two
/// arcs share a link group.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MatchTolerance {
    /// Bitwise float equality (`-0.0` and `0.0` are treated as equal).
    #[default]
    Exact,
    /// Coordinates are snapped to a grid of `step` model units before
    /// comparison. Points straddling a grid boundary can still fail to match.
    Quantized { step: f64 },
}

impl MatchTolerance {
    pub const DEFAULT_STEP: f64 = 1e-6;

    pub fn quantized() -> Self {
        Self::Quantized {
            step: Self::DEFAULT_STEP,
        }
    }

    /// Canonical hashable form of a single coordinate.
    pub fn key_component(self, v: f64) -> u64 {
        match self {
            MatchTolerance::Exact => (v + 0.0).to_bits(),
            MatchTolerance::Quantized { step } if step > 0.0 => {
                let snapped = (v / step).round() as i64;
                snapped as u64
            }
            MatchTolerance::Quantized { .. } => (v + 0.0).to_bits(),
        }
    }

    /// Check if two coordinates would produce the same key.
    pub fn coords_eq(self, a: f64, b: f64) -> bool {
        self.key_component(a) == self.key_component(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_distinguishes_tiny_differences() {
        let tol = MatchTolerance::Exact;
        assert!(tol.coords_eq(1.5, 1.5));
        assert!(!tol.coords_eq(1.5, 1.5 + 1e-12));
    }

    #[test]
    fn test_exact_signed_zero() {
        assert!(MatchTolerance::Exact.coords_eq(0.0, -0.0));
    }

    #[test]
    fn test_quantized_absorbs_noise() {
        let tol = MatchTolerance::quantized();
        assert!(tol.coords_eq(12.345_678_9, 12.345_678_9 + 1e-12));
        assert!(!tol.coords_eq(12.0, 12.001));
    }

    #[test]
    fn test_non_positive_step_falls_back_to_exact() {
        let tol = MatchTolerance::Quantized { step: 0.0 };
        assert!(!tol.coords_eq(1.0, 1.0 + 1e-12));
    }
}
