use std::path::Path;

use geoarc_anim::CameraLimits;
use geoarc_core::error::{GeoArcError, Result};
use geoarc_core::traits::Validate;
use geoarc_core::MatchTolerance;
use geoarc_geometry::ArcParams;
use geoarc_links::LinkTiming;
use serde::{Deserialize, Serialize};

/// Sun orbit and light animation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SunParams {
    /// Orbit radius above the globe surface.
    pub orbit_offset: f64,
    /// Time for the light to complete one orbit.
    pub day_ms: f64,
    /// Segments used for the sun-path and equator debug lines.
    pub path_segments: usize,
}

impl Default for SunParams {
    fn default() -> Self {
        Self {
            orbit_offset: 50.0,
            day_ms: 86_400_000.0,
            path_segments: 50,
        }
    }
}

/// Every tunable of the globe engine. Missing JSON fields take defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobeConfig {
    /// Live events kept before the oldest is evicted.
    pub max_events: usize,
    pub arc: ArcParams,
    pub timing: LinkTiming,
    pub camera: CameraLimits,
    pub match_tolerance: MatchTolerance,
    pub sun: SunParams,
}

impl GlobeConfig {
    pub const MAX_EVENTS: usize = 30;

    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self {
            max_events: Self::MAX_EVENTS,
            arc: ArcParams::default(),
            timing: LinkTiming::default(),
            camera: CameraLimits::default(),
            match_tolerance: MatchTolerance::Exact,
            sun: SunParams::default(),
        }
    }
}

fn invalid(msg: impl Into<String>) -> GeoArcError {
    GeoArcError::Config(msg.into())
}

impl Validate for GlobeConfig {
    fn validate(&self) -> Result<()> {
        if self.max_events == 0 {
            return Err(invalid("max_events must be at least 1"));
        }
        if !(self.arc.radius.is_finite() && self.arc.radius > 0.0) {
            return Err(invalid(format!("arc.radius must be positive, got {}", self.arc.radius)));
        }
        if self.arc.segments == 0 {
            return Err(invalid("arc.segments must be at least 1"));
        }
        for (name, map) in [
            ("arc.bulge", &self.arc.bulge),
            ("timing.marker_period", &self.timing.marker_period),
            ("timing.draw_in", &self.timing.draw_in),
        ] {
            if !map.is_well_formed() {
                return Err(invalid(format!("{name} has an empty input range")));
            }
        }
        for (name, ms) in [
            ("timing.fade_in_ms", self.timing.fade_in_ms),
            ("timing.group_fade_out_ms", self.timing.group_fade_out_ms),
            ("timing.marker_fade_out_ms", self.timing.marker_fade_out_ms),
            ("camera.flight_ms", self.camera.flight_ms),
        ] {
            if !(ms.is_finite() && ms >= 0.0) {
                return Err(invalid(format!("{name} must be a non-negative duration, got {ms}")));
            }
        }
        let cam = &self.camera;
        if !(cam.dist_min > 0.0 && cam.dist_min < cam.dist_max) {
            return Err(invalid(format!(
                "camera distance range [{}, {}] is empty",
                cam.dist_min, cam.dist_max
            )));
        }
        if !(cam.damping > 0.0 && cam.damping <= 1.0) {
            return Err(invalid(format!("camera.damping must be in (0, 1], got {}", cam.damping)));
        }
        if !(self.sun.day_ms > 0.0) {
            return Err(invalid("sun.day_ms must be positive"));
        }
        Ok(())
    }
}
