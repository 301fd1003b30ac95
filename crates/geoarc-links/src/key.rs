use geoarc_core::MatchTolerance;
use geoarc_math::Point3;

/// Unordered pair of projected endpoints, hashable.
///
/// `(a, b)` and `(b, a)` produce the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EndpointKey {
    lo: [u64; 3],
    hi: [u64; 3],
}

impl EndpointKey {
    pub fn new(a: Point3, b: Point3, tolerance: MatchTolerance) -> Self {
        let ka = Self::point_key(a, tolerance);
        let kb = Self::point_key(b, tolerance);
        if ka <= kb {
            Self { lo: ka, hi: kb }
        } else {
            Self { lo: kb, hi: ka }
        }
    }

    fn point_key(p: Point3, tolerance: MatchTolerance) -> [u64; 3] {
        [
            tolerance.key_component(p.x),
            tolerance.key_component(p.y),
            tolerance.key_component(p.z),
        ]
    }
}
