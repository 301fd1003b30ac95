//! Directional sun light orbiting the globe.
//!
//! The orbit is a circle of radius `R + orbit_offset`, rotated in-plane by
//! the sun's right ascension and tilted by `π/2 + declination`. A looping
//! tween walks the light around it once per configured day.

use std::f64::consts::FRAC_PI_2;

use geoarc_anim::Tween;
use geoarc_geometry::tessellate::sample_uniform;
use geoarc_geometry::{Curve, Ellipse};
use geoarc_math::{Point3, SolarPosition};
use tracing::debug;

use crate::config::SunParams;

/// Ambient light colour while the sun is on.
pub const AMBIENT_DIM: u32 = 0x404040;
/// Ambient light colour with the sun switched off: the globe is lit evenly.
pub const AMBIENT_FULL: u32 = 0xffffff;

#[derive(Debug, Clone)]
pub struct SunLight {
    solar: SolarPosition,
    orbit: Ellipse,
    globe_radius: f64,
    path_segments: usize,
    tween: Tween,
    position: Point3,
    enabled: bool,
    debug_visible: bool,
}

impl SunLight {
    pub fn new(solar: SolarPosition, globe_radius: f64, params: &SunParams) -> Self {
        let orbit = Ellipse::circle(
            globe_radius + params.orbit_offset,
            solar.right_ascension,
            FRAC_PI_2 + solar.declination,
        );
        Self {
            solar,
            orbit,
            globe_radius,
            path_segments: params.path_segments,
            tween: Tween::looping(0.0, 1.0, params.day_ms),
            position: orbit.point_at(0.0),
            enabled: true,
            debug_visible: false,
        }
    }

    pub fn solar(&self) -> &SolarPosition {
        &self.solar
    }

    pub fn orbit(&self) -> &Ellipse {
        &self.orbit
    }

    pub fn position(&self) -> Point3 {
        self.position
    }

    /// Fraction of the orbit covered, in `[0, 1)`.
    pub fn phase(&self) -> f64 {
        self.tween.value()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_debug_visible(&self) -> bool {
        self.debug_visible
    }

    pub fn ambient_color(&self) -> u32 {
        if self.enabled {
            AMBIENT_DIM
        } else {
            AMBIENT_FULL
        }
    }

    pub fn advance(&mut self, dt_ms: f64) {
        let phase = self.tween.advance(dt_ms);
        self.position = self.orbit.point_at(phase);
    }

    /// Switch between directional lighting and flat full-bright ambient.
    pub fn toggle_sun(&mut self) {
        self.enabled = !self.enabled;
        debug!(enabled = self.enabled, "sun light toggled");
    }

    /// Show or hide the orbit and equator helper lines.
    pub fn toggle_sun_debug(&mut self) {
        self.debug_visible = !self.debug_visible;
        debug!(visible = self.debug_visible, "sun debug lines toggled");
    }

    /// Closed polyline along the sun's orbit.
    pub fn sun_path(&self) -> Vec<Point3> {
        sample_uniform(&self.orbit, self.path_segments)
    }

    /// Closed polyline around the equator, just above the surface.
    pub fn equator_path(&self) -> Vec<Point3> {
        let equator = Ellipse::circle(self.orbit.radii.x, 0.0, FRAC_PI_2);
        sample_uniform(&equator, self.path_segments)
    }

    pub fn globe_radius(&self) -> f64 {
        self.globe_radius
    }
}
