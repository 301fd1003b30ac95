//! geoarc link registry.
//!
//! Arcs between the same two points are shared: one [`LinkGroup`] owns the
//! curve and one [`Marker`] per event travelling along it. The registry
//! decides merge-or-create on insertion and drives fade-out and release on
//! eviction, using tweens registered on an
//! [`AnimationClock`](geoarc_anim::AnimationClock).

mod key;
pub mod registry;
pub mod types;
mod validate;

pub use key::EndpointKey;
pub use registry::{LinkClock, LinkRegistry};
pub use types::*;
