//! geoarc animation: linear tweens driven by a single frame clock, and the
//! damped orbit camera the clock advances every tick.

pub mod camera;
pub mod clock;
pub mod tween;

pub use camera::{shortest_heading, CameraLimits, CameraPose, OrbitCamera};
pub use clock::{AnimationClock, TickReport, TweenCompletion, TweenId, TweenUpdate};
pub use tween::{Repeat, Tween};
