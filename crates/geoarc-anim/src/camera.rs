use std::f64::consts::{FRAC_PI_2, PI, TAU};

use geoarc_math::{DVec2, DVec3, Point3};
use serde::{Deserialize, Serialize};

use crate::tween::Tween;

/// Tuning for the orbit camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraLimits {
    pub dist_min: f64,
    pub dist_max: f64,
    /// Fraction of the remaining delta closed every tick.
    pub damping: f64,
    /// Radians subtracted from the heading target every tick while rotating.
    pub auto_rotate_step: f64,
    pub drag_sensitivity: f64,
    pub wheel_factor: f64,
    pub flight_ms: f64,
    pub initial_distance: f64,
    pub initial_distance_target: f64,
    pub initial_target: DVec2,
}

impl CameraLimits {
    pub const DIST_MIN: f64 = 350.0;
    pub const DIST_MAX: f64 = 1500.0;

    pub fn clamp_distance(&self, d: f64) -> f64 {
        d.clamp(self.dist_min, self.dist_max)
    }
}

impl Default for CameraLimits {
    fn default() -> Self {
        Self {
            dist_min: Self::DIST_MIN,
            dist_max: Self::DIST_MAX,
            damping: 0.1,
            auto_rotate_step: 0.001,
            drag_sensitivity: 0.005,
            wheel_factor: 0.3,
            flight_ms: 1000.0,
            initial_distance: 100_000.0,
            initial_distance_target: 1000.0,
            initial_target: DVec2::new(PI, PI / 5.0),
        }
    }
}

/// Where the renderer should put the camera this frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub eye: Point3,
    pub look_at: Point3,
    pub distance: f64,
    pub rotation: DVec2,
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    mouse_on_down: DVec2,
    target_on_down: DVec2,
}

/// Animated move of `(heading, pitch, zoom)` to a new location.
#[derive(Debug, Clone, Copy)]
struct Flight {
    from: DVec3,
    to: DVec3,
    tween: Tween,
}

/// A camera orbiting the globe origin.
///
/// `rotation` and `distance` chase `target` and `distance_target` with
/// first-order damping each tick; input only moves the targets.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    pub limits: CameraLimits,
    rotation: DVec2,
    target: DVec2,
    distance: f64,
    distance_target: f64,
    auto_rotate: bool,
    hovered: bool,
    drag: Option<Drag>,
    flight: Option<Flight>,
}

impl OrbitCamera {
    pub fn new(limits: CameraLimits) -> Self {
        Self {
            rotation: DVec2::ZERO,
            target: limits.initial_target,
            distance: limits.initial_distance,
            distance_target: limits.initial_distance_target,
            auto_rotate: true,
            hovered: false,
            drag: None,
            flight: None,
            limits,
        }
    }

    pub fn rotation(&self) -> DVec2 {
        self.rotation
    }

    pub fn target(&self) -> DVec2 {
        self.target
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn distance_target(&self) -> f64 {
        self.distance_target
    }

    pub fn is_rotating(&self) -> bool {
        self.auto_rotate
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn is_flying(&self) -> bool {
        self.flight.is_some()
    }

    /// Start a drag at screen position `(x, y)`. Dragging stops auto-rotation
    /// and any flight in progress.
    pub fn begin_drag(&mut self, x: f64, y: f64) {
        self.drag = Some(Drag {
            mouse_on_down: DVec2::new(-x, y),
            target_on_down: self.target,
        });
        self.auto_rotate = false;
        self.flight = None;
    }

    /// Move the target with the pointer. Sensitivity scales with zoom so the
    /// globe tracks the cursor at any distance; pitch is limited to the poles.
    pub fn drag_to(&mut self, x: f64, y: f64) {
        let Some(drag) = self.drag else {
            return;
        };
        let mouse = DVec2::new(-x, y);
        let zoom_damp = self.distance / 1000.0;
        let target =
            drag.target_on_down + (mouse - drag.mouse_on_down) * self.limits.drag_sensitivity * zoom_damp;
        self.target = DVec2::new(target.x, target.y.clamp(-FRAC_PI_2, FRAC_PI_2));
    }

    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// The pointer moved over the globe surface.
    pub fn pointer_entered(&mut self) {
        self.hovered = true;
    }

    /// The pointer left the surface: drop the drag and resume rotating.
    pub fn pointer_left(&mut self) {
        self.hovered = false;
        self.drag = None;
        self.auto_rotate = true;
    }

    /// Mouse-wheel input; positive deltas zoom in. Ignored unless the pointer
    /// is over the globe.
    pub fn wheel(&mut self, delta_y: f64) {
        if !self.hovered {
            return;
        }
        self.zoom_by(delta_y * self.limits.wheel_factor);
    }

    pub fn zoom_by(&mut self, delta: f64) {
        self.distance_target = self.limits.clamp_distance(self.distance_target - delta);
    }

    /// Jump the targets; the camera eases there through normal damping.
    pub fn set_location(&mut self, x: f64, y: f64, zoom: f64) {
        self.target = DVec2::new(x, y);
        self.distance_target = self.limits.clamp_distance(zoom);
    }

    /// Animate the targets to `(x, y, zoom)`, turning whichever way round the
    /// globe is shorter.
    pub fn fly_to(&mut self, x: f64, y: f64, zoom: f64) {
        self.auto_rotate = false;
        let from = DVec3::new(self.target.x, self.target.y, self.distance_target);
        let to = DVec3::new(shortest_heading(self.target.x, x), y, zoom);
        self.flight = Some(Flight {
            from,
            to,
            tween: Tween::once(0.0, 1.0, self.limits.flight_ms),
        });
    }

    pub fn toggle_rotation(&mut self) {
        self.auto_rotate = !self.auto_rotate;
    }

    pub fn stop_rotation(&mut self) {
        self.auto_rotate = false;
    }

    /// One frame of camera motion.
    pub fn advance(&mut self, dt_ms: f64) {
        if let Some(flight) = self.flight.as_mut() {
            let t = flight.tween.advance(dt_ms);
            let p = flight.from.lerp(flight.to, t);
            let finished = flight.tween.is_finished();
            self.set_location(p.x, p.y, p.z);
            if finished {
                self.flight = None;
            }
        }

        if self.auto_rotate && self.drag.is_none() {
            self.target.x -= self.limits.auto_rotate_step;
        }

        let k = self.limits.damping;
        self.rotation += (self.target - self.rotation) * k;
        self.distance += (self.distance_target - self.distance) * k;
    }

    pub fn eye(&self) -> Point3 {
        let (rx, ry) = (self.rotation.x, self.rotation.y);
        DVec3::new(
            self.distance * rx.sin() * ry.cos(),
            self.distance * ry.sin(),
            self.distance * rx.cos() * ry.cos(),
        )
    }

    pub fn pose(&self) -> CameraPose {
        CameraPose {
            eye: self.eye(),
            look_at: Point3::ZERO,
            distance: self.distance,
            rotation: self.rotation,
        }
    }
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(CameraLimits::default())
    }
}

/// Heading equivalent to `dest` (mod 2π) that is closest to `current`.
pub fn shortest_heading(current: f64, dest: f64) -> f64 {
    let offset = (current - dest).rem_euclid(TAU);
    if offset > PI {
        current + (TAU - offset)
    } else {
        current - offset
    }
}
