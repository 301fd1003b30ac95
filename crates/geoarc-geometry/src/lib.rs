//! geoarc geometry: parametric curves, link arcs, and the sun orbit.

pub mod arc;
pub mod curve;
pub mod tessellate;

pub use arc::{Arc, ArcBuilder, ArcParams};
pub use curve::{CubicBezier, Curve, Ellipse};
