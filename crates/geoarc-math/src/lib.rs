pub mod geo;
pub mod map;
pub mod solar;

pub use glam::{DQuat, DVec2, DVec3};
pub use geo::{project, GeoPoint, SpherePoint};
pub use map::{linear_map, LinearMap};
pub use solar::SolarPosition;

pub type Point3 = DVec3;
pub type Vector3 = DVec3;
