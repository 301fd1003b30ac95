//! geoarc engine: the explicit context object that owns every entity
//! collection, plus the surface exposed to renderer, event source and UI.

pub mod config;
pub mod context;
pub mod event;
pub mod snapshot;
pub mod sun;

pub use config::{GlobeConfig, SunParams};
pub use context::GlobeContext;
pub use event::{EventHandle, EventQueue, EventRecord, NewEvent};
pub use snapshot::{FrameSink, GroupView, MarkerView, SceneSnapshot, SunView};
pub use sun::SunLight;

pub use geoarc_links::{EventKind, Filter, LinkHandle};
pub use geoarc_math::GeoPoint;
